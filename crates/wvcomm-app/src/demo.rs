// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Demo scenario: a host `device` object and a page `ui` object talking to
// each other over the loopback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::{Map, Value, json};
use tracing::{info, warn};

use wvcomm_bridge::MethodTable;
use wvcomm_core::types::CallbackId;
use wvcomm_host::{HostCommunicator, MessageReceiver};

use crate::loopback::Loopback;

/// What the demo observed.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Calls the host delivered to its receivers.
    pub host_calls: usize,
    /// Payloads handed to page callbacks.
    pub answers: Vec<Value>,
    /// Arguments the page's `ui.showToast` received.
    pub toasts: Vec<Value>,
}

/// Host receiver standing in for a native device API.
struct Device {
    host: Weak<HostCommunicator>,
}

impl MessageReceiver for Device {
    fn receive_call_from_js(&self, method: &str, callback_id: CallbackId, args: Vec<Value>) {
        let Some(host) = self.host.upgrade() else {
            return;
        };
        let result = match method {
            "getInfo" => {
                let mut fields = Map::new();
                fields.insert("isSdk".into(), json!(true));
                fields.insert("enableNative".into(), json!(true));
                fields.insert("model".into(), json!("loopback"));
                host.respond(callback_id, fields)
            }
            "vibrate" => {
                info!(?args, "device: vibrate");
                host.call_js("ui", "showToast", &[json!("vibrated")])
            }
            other => {
                warn!(method = other, "device: unknown method");
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(error = %e, method, "device: reply failed");
        }
    }
}

/// Run one fire-and-forget call and one correlated call, then drain the host.
pub fn run(loopback: &Loopback) -> Outcome {
    let toasts = Rc::new(RefCell::new(Vec::new()));
    let answers = Rc::new(RefCell::new(Vec::new()));

    let device = Rc::new(Device {
        host: Rc::downgrade(&loopback.host),
    });
    if let Err(e) = loopback.host.register_object("device", device) {
        warn!(error = %e, "device registration failed");
    }

    let sink = Rc::clone(&toasts);
    let ui = MethodTable::new().method("showToast", move |args| {
        info!(?args, "ui: toast");
        sink.borrow_mut().extend(args);
        Ok(Value::Null)
    });
    if let Err(e) = loopback.bridge.register("ui", Rc::new(ui)) {
        warn!(error = %e, "ui registration failed");
    }

    loopback.bridge.native_call("device", "vibrate", vec![json!(200)]);

    let sink = Rc::clone(&answers);
    loopback.bridge.native_call_with_callback(
        "device",
        "getInfo",
        Some(Box::new(move |answer: Value| sink.borrow_mut().push(answer))),
        vec![],
    );

    let host_calls = loopback.pump();

    Outcome {
        host_calls,
        answers: answers.take(),
        toasts: toasts.take(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wvcomm_core::CommunicatorConfig;
    use wvcomm_core::types::Platform;

    #[test]
    fn android_demo_completes_both_calls() {
        let loopback = Loopback::new(CommunicatorConfig::default(), &Platform::Android);
        let outcome = run(&loopback);

        assert_eq!(outcome.host_calls, 2);
        assert_eq!(outcome.toasts, vec![json!("vibrated")]);
        assert_eq!(outcome.answers.len(), 1);
        assert_eq!(outcome.answers[0]["model"], json!("loopback"));
        assert_eq!(loopback.bridge.pending_callbacks(), 0);
    }

    #[test]
    fn detached_demo_reports_unavailable_native_layer() {
        let loopback = Loopback::new(CommunicatorConfig::default(), &Platform::None);
        let outcome = run(&loopback);

        assert_eq!(outcome.host_calls, 0);
        assert!(outcome.toasts.is_empty());
        assert_eq!(
            outcome.answers,
            vec![json!({ "isSdk": false, "enableNative": false })]
        );
    }
}
