// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process wiring of a page bridge and a host communicator.
//
// The page reaches the host through `HostLink` (Android call object or iOS
// frame navigation); the host reaches the page through `PageLink`, which
// feeds `raiseEvent` directly instead of evaluating script source.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use wvcomm_bridge::{
    AndroidInterface, ConsoleSink, FrameNavigator, HostCapabilities, TracingConsole, WebViewBridge,
};
use wvcomm_core::config::CommunicatorConfig;
use wvcomm_core::types::{CallbackId, HostEvent, Platform};
use wvcomm_host::{HostCommunicator, ScriptEvaluator};

/// Page-side view of the host.
struct HostLink {
    host: Rc<HostCommunicator>,
}

impl AndroidInterface for HostLink {
    fn native_call(
        &self,
        tag: &str,
        method: &str,
        callback_id: CallbackId,
        args_json: &str,
    ) -> bool {
        self.host.native_call(tag, method, callback_id, args_json)
    }
}

impl FrameNavigator for HostLink {
    fn load_transient_frame(&self, url: &str) {
        if !self.host.intercept_url(url) {
            debug!(url, "navigation not intercepted by host");
        }
    }
}

/// Host-side view of the page.
#[derive(Default)]
struct PageLink {
    bridge: RefCell<Weak<WebViewBridge>>,
}

impl ScriptEvaluator for PageLink {
    fn evaluate(&self, event: &HostEvent) {
        let bridge = self.bridge.borrow().upgrade();
        match bridge {
            Some(bridge) => bridge.raise_event(&event.object, &event.method, &event.params),
            None => debug!("page gone; host call dropped"),
        }
    }
}

pub struct Loopback {
    pub host: Rc<HostCommunicator>,
    pub bridge: Rc<WebViewBridge>,
}

impl Loopback {
    /// Wire a page and host together as if the page ran on `platform`.
    pub fn new(config: CommunicatorConfig, platform: &Platform) -> Self {
        Self::with_console(config, platform, Rc::new(TracingConsole))
    }

    pub fn with_console(
        config: CommunicatorConfig,
        platform: &Platform,
        console: Rc<dyn ConsoleSink>,
    ) -> Self {
        let page = Rc::new(PageLink::default());
        let host = Rc::new(HostCommunicator::new(config.clone(), page.clone()));
        let link = Rc::new(HostLink {
            host: Rc::clone(&host),
        });

        let capabilities = match platform {
            Platform::Android => {
                debug!(interface = host.android_interface(), "host call object injected");
                HostCapabilities::android(link)
            }
            Platform::Ios => HostCapabilities::ios(link),
            _ => HostCapabilities::none(),
        };
        let bridge = Rc::new(WebViewBridge::with_console(config, capabilities, console));
        *page.bridge.borrow_mut() = Rc::downgrade(&bridge);

        Self { host, bridge }
    }

    /// Let the host work through everything the page sent it, including
    /// calls made while answering. Returns the number of delivered calls.
    pub fn pump(&self) -> usize {
        self.host.run_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};
    use wvcomm_bridge::MethodTable;
    use wvcomm_core::types::ConsoleEntry;
    use wvcomm_host::MessageReceiver;

    #[derive(Default)]
    struct Console {
        lines: RefCell<Vec<String>>,
    }

    impl ConsoleSink for Console {
        fn log(&self, entry: ConsoleEntry) {
            self.lines.borrow_mut().push(entry.message);
        }
    }

    /// Host object answering `getInfo` and recording everything else.
    struct Device {
        host: Weak<HostCommunicator>,
        seen: RefCell<Vec<(String, Vec<Value>)>>,
    }

    impl MessageReceiver for Device {
        fn receive_call_from_js(&self, method: &str, callback_id: CallbackId, args: Vec<Value>) {
            self.seen.borrow_mut().push((method.to_string(), args));
            if method == "getInfo" {
                if let Some(host) = self.host.upgrade() {
                    let mut fields = Map::new();
                    fields.insert("model".into(), json!("Loopback"));
                    host.respond(callback_id, fields).expect("respond");
                }
            }
        }
    }

    fn wired(platform: Platform) -> (Loopback, Rc<Device>, Rc<Console>) {
        let console = Rc::new(Console::default());
        let loopback =
            Loopback::with_console(CommunicatorConfig::default(), &platform, console.clone());
        let device = Rc::new(Device {
            host: Rc::downgrade(&loopback.host),
            seen: RefCell::new(Vec::new()),
        });
        loopback
            .host
            .register_object("device", device.clone())
            .expect("register device");
        (loopback, device, console)
    }

    fn round_trip(platform: Platform) {
        let (loopback, device, _) = wired(platform);
        let answers = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&answers);

        let id = loopback
            .bridge
            .native_call_with_callback(
                "device",
                "getInfo",
                Some(Box::new(move |v: Value| sink.borrow_mut().push(v))),
                vec![json!("verbose")],
            )
            .expect("submitted");
        assert!(loopback.bridge.is_pending(id));

        assert_eq!(loopback.pump(), 1);
        assert_eq!(
            answers.borrow().as_slice(),
            &[json!({ "callbackId": id.0, "model": "Loopback" })]
        );
        assert_eq!(loopback.bridge.pending_callbacks(), 0);
        assert_eq!(
            device.seen.borrow().as_slice(),
            &[("getInfo".to_string(), vec![json!("verbose")])]
        );
    }

    #[test]
    fn android_round_trip() {
        round_trip(Platform::Android);
    }

    #[test]
    fn ios_round_trip() {
        round_trip(Platform::Ios);
    }

    #[test]
    fn detached_page_answers_locally() {
        let (loopback, device, _) = wired(Platform::None);
        let answers = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&answers);

        loopback.bridge.native_call_with_callback(
            "device",
            "getInfo",
            Some(Box::new(move |v: Value| sink.borrow_mut().push(v))),
            vec![],
        );
        loopback.bridge.native_call("device", "vibrate", vec![]);

        assert_eq!(loopback.pump(), 0);
        assert_eq!(
            answers.borrow().as_slice(),
            &[json!({ "isSdk": false, "enableNative": false })]
        );
        assert!(device.seen.borrow().is_empty());
    }

    #[test]
    fn unknown_host_tag_is_logged_in_page() {
        let (loopback, _, console) = wired(Platform::Android);
        loopback.bridge.native_call("printer", "print", vec![]);
        assert_eq!(
            console.lines.borrow().as_slice(),
            &["Error: No object with tag 'printer' registered on application".to_string()]
        );
    }

    #[test]
    fn host_invokes_page_object() {
        let (loopback, _, _) = wired(Platform::Ios);
        let toasts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&toasts);
        let ui = MethodTable::new().method("showToast", move |args| {
            sink.borrow_mut().extend(args);
            Ok(Value::Null)
        });
        loopback.bridge.register("ui", Rc::new(ui)).expect("register ui");

        loopback
            .host
            .call_js("ui", "showToast", &[json!("it's done / 100%")])
            .expect("call_js");
        assert_eq!(toasts.borrow().as_slice(), &[json!("it's done / 100%")]);
    }
}
