// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android delivery: a direct synchronous call on the object the host injected
// into the page, passing tag, method, callback id and the JSON argument array.

use std::rc::Rc;

use tracing::{debug, warn};

use wvcomm_core::error::Result;
use wvcomm_core::types::{NativeCall, Platform};

use crate::traits::{AndroidInterface, PlatformTransport};

pub struct AndroidTransport {
    interface: Rc<dyn AndroidInterface>,
    /// Global name the host injected `interface` under.
    name: String,
}

impl AndroidTransport {
    pub fn new(interface: Rc<dyn AndroidInterface>, name: &str) -> Self {
        Self {
            interface,
            name: name.to_string(),
        }
    }
}

impl std::fmt::Debug for AndroidTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidTransport")
            .field("interface", &self.name)
            .finish_non_exhaustive()
    }
}

impl PlatformTransport for AndroidTransport {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn submit(&self, call: &NativeCall) -> Result<()> {
        let args_json = call.args_json()?;
        let accepted = self.interface.native_call(
            &call.tag,
            &call.method,
            call.callback_id,
            &args_json,
        );
        if accepted {
            debug!(
                interface = %self.name,
                tag = %call.tag,
                method = %call.method,
                id = %call.callback_id,
                "Android: call delivered"
            );
        } else {
            // The host answers unknown tags with a `__self.log` message of
            // its own; nothing else to do here.
            warn!(
                interface = %self.name,
                tag = %call.tag,
                method = %call.method,
                "Android: host has no object for tag"
            );
        }
        Ok(())
    }
}
