// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transport selection.
//
// The embedding host states what it injected into the page through
// `HostCapabilities`; the platform tag and delivery path follow from that.

pub mod android;
pub mod ios;
pub mod stub;

use std::rc::Rc;

use tracing::info;

use wvcomm_core::config::CommunicatorConfig;
use wvcomm_core::types::Platform;

use crate::traits::{AndroidInterface, FrameNavigator, PlatformTransport};

pub use android::AndroidTransport;
pub use ios::IosTransport;
pub use stub::StubTransport;

/// Delivery hooks the embedding host makes available to the page.
#[derive(Clone, Default)]
pub struct HostCapabilities {
    /// Call object injected by an Android host.
    pub android: Option<Rc<dyn AndroidInterface>>,
    /// Frame hook available when the page runs on an iOS device.
    pub ios: Option<Rc<dyn FrameNavigator>>,
    /// The page runs inside an embedded web view rather than a full browser.
    pub embedded_webview: bool,
}

impl HostCapabilities {
    /// No host at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// An Android host that injected `interface`.
    pub fn android(interface: Rc<dyn AndroidInterface>) -> Self {
        Self {
            android: Some(interface),
            ios: None,
            embedded_webview: true,
        }
    }

    /// An iOS web view whose navigations are intercepted by the host.
    pub fn ios(navigator: Rc<dyn FrameNavigator>) -> Self {
        Self {
            android: None,
            ios: Some(navigator),
            embedded_webview: true,
        }
    }

    /// Decide which platform these capabilities describe.
    ///
    /// An injected call object wins. The iOS path additionally requires an
    /// embedded web view, since a full browser on an iOS device has no host
    /// to intercept navigations.
    pub fn detect(&self) -> Platform {
        let platform = if self.android.is_some() {
            Platform::Android
        } else if self.ios.is_some() && self.embedded_webview {
            Platform::Ios
        } else {
            Platform::None
        };
        info!(%platform, "host platform detected");
        platform
    }

    /// Build the delivery path for `platform`. Platforms whose hook is
    /// missing get the stub, which drops everything.
    pub fn transport_for(
        &self,
        platform: &Platform,
        config: &CommunicatorConfig,
    ) -> Rc<dyn PlatformTransport> {
        match platform {
            Platform::Android => match &self.android {
                Some(interface) => Rc::new(AndroidTransport::new(
                    Rc::clone(interface),
                    &config.android_interface,
                )),
                None => Rc::new(StubTransport::new(platform.clone())),
            },
            Platform::Ios => match &self.ios {
                Some(navigator) => Rc::new(IosTransport::new(
                    Rc::clone(navigator),
                    &config.url_prefix,
                )),
                None => Rc::new(StubTransport::new(platform.clone())),
            },
            other => Rc::new(StubTransport::new(other.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingAndroid, RecordingNavigator};

    #[test]
    fn injected_call_object_means_android() {
        let caps = HostCapabilities::android(Rc::new(RecordingAndroid::default()));
        assert_eq!(caps.detect(), Platform::Android);
    }

    #[test]
    fn android_wins_over_ios() {
        let caps = HostCapabilities {
            android: Some(Rc::new(RecordingAndroid::default())),
            ios: Some(Rc::new(RecordingNavigator::default())),
            embedded_webview: true,
        };
        assert_eq!(caps.detect(), Platform::Android);
    }

    #[test]
    fn ios_requires_embedded_webview() {
        let mut caps = HostCapabilities::ios(Rc::new(RecordingNavigator::default()));
        assert_eq!(caps.detect(), Platform::Ios);

        caps.embedded_webview = false;
        assert_eq!(caps.detect(), Platform::None);
    }

    #[test]
    fn nothing_injected_means_none() {
        assert_eq!(HostCapabilities::none().detect(), Platform::None);
    }

    #[test]
    fn missing_hook_falls_back_to_stub() {
        let caps = HostCapabilities::none();
        let transport = caps.transport_for(&Platform::Ios, &CommunicatorConfig::default());
        assert_eq!(transport.platform(), Platform::Ios);
        let call = wvcomm_core::types::NativeCall::new("t", "m", vec![]);
        assert!(transport.submit(&call).is_err());
    }
}
