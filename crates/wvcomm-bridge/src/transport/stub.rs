// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub transport for pages running outside any host shell.
//
// Every submission returns `PlatformUnavailable`; the bridge drops the call.

use wvcomm_core::error::{CommunicatorError, Result};
use wvcomm_core::types::{NativeCall, Platform};

use crate::traits::PlatformTransport;

/// No-op transport used for `none`, overridden tags and missing hooks.
#[derive(Debug)]
pub struct StubTransport {
    platform: Platform,
}

impl StubTransport {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl PlatformTransport for StubTransport {
    fn platform(&self) -> Platform {
        self.platform.clone()
    }

    fn submit(&self, call: &NativeCall) -> Result<()> {
        tracing::debug!(
            platform = %self.platform,
            tag = %call.tag,
            method = %call.method,
            "no delivery path; call dropped"
        );
        Err(CommunicatorError::PlatformUnavailable)
    }
}
