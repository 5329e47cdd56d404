// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS delivery: the call is encoded into a custom-scheme URL that is loaded
// in a transient invisible frame. The host intercepts the navigation attempt
// and cancels it.
//
// URL layout:
//   <prefix><tag>/<method>/<args>              fire-and-forget
//   <prefix><tag>/<method>/<callbackId>/<args> correlated
// Every component is percent-encoded, so plain identifiers appear verbatim.

use std::rc::Rc;

use tracing::debug;

use wvcomm_core::error::Result;
use wvcomm_core::types::{NativeCall, Platform, encode_component};

use crate::traits::{FrameNavigator, PlatformTransport};

pub struct IosTransport {
    navigator: Rc<dyn FrameNavigator>,
    prefix: String,
}

impl IosTransport {
    pub fn new(navigator: Rc<dyn FrameNavigator>, prefix: &str) -> Self {
        Self {
            navigator,
            prefix: prefix.to_string(),
        }
    }

    /// Encode `call` as a navigation URL.
    pub fn call_url(&self, call: &NativeCall) -> Result<String> {
        let args = encode_component(&call.args_json()?);
        let tag = encode_component(&call.tag);
        let method = encode_component(&call.method);

        let url = if call.callback_id.is_correlated() {
            format!("{}{tag}/{method}/{}/{args}", self.prefix, call.callback_id)
        } else {
            format!("{}{tag}/{method}/{args}", self.prefix)
        };
        Ok(url)
    }
}

impl std::fmt::Debug for IosTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IosTransport")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl PlatformTransport for IosTransport {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn submit(&self, call: &NativeCall) -> Result<()> {
        let url = self.call_url(call)?;
        debug!(
            tag = %call.tag,
            method = %call.method,
            id = %call.callback_id,
            "iOS: navigating transient frame"
        );
        self.navigator.load_transient_frame(&url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNavigator;
    use serde_json::json;
    use wvcomm_core::types::{CallbackId, DEFAULT_URL_PREFIX};

    #[test]
    fn fire_and_forget_url() {
        let nav = Rc::new(RecordingNavigator::default());
        let transport = IosTransport::new(nav.clone(), DEFAULT_URL_PREFIX);

        transport
            .submit(&NativeCall::new("device", "vibrate", vec![json!(200)]))
            .expect("submit");

        assert_eq!(
            nav.urls.borrow().as_slice(),
            &["js:WebViewCommunicator/device/vibrate/%5B200%5D".to_string()]
        );
    }

    #[test]
    fn correlated_url_carries_id() {
        let nav = Rc::new(RecordingNavigator::default());
        let transport = IosTransport::new(nav, DEFAULT_URL_PREFIX);

        let call = NativeCall::new("device", "getInfo", vec![]).with_callback_id(CallbackId(12));
        assert_eq!(
            transport.call_url(&call).expect("url"),
            "js:WebViewCommunicator/device/getInfo/12/%5B%5D"
        );
    }

    #[test]
    fn separators_in_components_are_escaped() {
        let nav = Rc::new(RecordingNavigator::default());
        let transport = IosTransport::new(nav, DEFAULT_URL_PREFIX);

        let call = NativeCall::new("a/b", "c d", vec![json!("e/f")]);
        let url = transport.call_url(&call).expect("url");
        let rest = url.strip_prefix(DEFAULT_URL_PREFIX).expect("prefix");
        assert_eq!(rest.split('/').count(), 3);
        assert!(rest.starts_with("a%2Fb/c%20d/"));
    }
}
