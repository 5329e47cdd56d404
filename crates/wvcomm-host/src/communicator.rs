// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host communicator.
//
// Calls arriving from the page are queued and handed to receivers when the
// host drains the queue with `run_pending` (the equivalent of posting to the
// UI thread). Calls into the page go through the injected `ScriptEvaluator`.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::{debug, error, info, trace, warn};

use wvcomm_core::config::CommunicatorConfig;
use wvcomm_core::error::{CommunicatorError, Result};
use wvcomm_core::types::{
    CALLBACK_ID_FIELD, CallbackId, HostEvent, SELF_CALLBACK, SELF_LOG, SELF_TAG,
};

use crate::evaluator::ScriptEvaluator;
use crate::url::parse_call_url;

/// Host object that receives calls made from the page.
pub trait MessageReceiver {
    /// `callback_id` is non-zero when the page expects an answer through
    /// [`HostCommunicator::respond`].
    fn receive_call_from_js(&self, method: &str, callback_id: CallbackId, args: Vec<Value>);
}

/// A call accepted from the page, waiting for `run_pending`.
struct QueuedCall {
    tag: String,
    method: String,
    callback_id: CallbackId,
    args: QueuedArgs,
}

enum QueuedArgs {
    /// Raw JSON from the Android call object, parsed when delivered.
    Json(String),
    /// Already parsed from an intercepted URL.
    Parsed(Vec<Value>),
}

pub struct HostCommunicator {
    config: CommunicatorConfig,
    evaluator: Rc<dyn ScriptEvaluator>,
    receivers: RefCell<HashMap<String, Rc<dyn MessageReceiver>>>,
    queue: RefCell<VecDeque<QueuedCall>>,
}

impl HostCommunicator {
    pub fn new(config: CommunicatorConfig, evaluator: Rc<dyn ScriptEvaluator>) -> Self {
        Self {
            config,
            evaluator,
            receivers: RefCell::new(HashMap::new()),
            queue: RefCell::new(VecDeque::new()),
        }
    }

    pub fn config(&self) -> &CommunicatorConfig {
        &self.config
    }

    // -- Registration --------------------------------------------------------

    /// Register `receiver` for calls addressed to `tag`.
    ///
    /// A tag already in use fails with `DuplicateTag`; the existing receiver
    /// keeps the tag.
    pub fn register_object(&self, tag: &str, receiver: Rc<dyn MessageReceiver>) -> Result<()> {
        let mut receivers = self.receivers.borrow_mut();
        if receivers.contains_key(tag) {
            error!(tag, "an object is already registered with the given tag");
            return Err(CommunicatorError::DuplicateTag(tag.to_string()));
        }
        receivers.insert(tag.to_string(), receiver);
        debug!(tag, "host receiver registered");
        Ok(())
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.receivers.borrow().contains_key(tag)
    }

    // -- Page -> host --------------------------------------------------------

    /// Global name this communicator is injected under in Android pages.
    pub fn android_interface(&self) -> &str {
        &self.config.android_interface
    }

    /// Entry point of the call object injected into Android pages.
    ///
    /// Returns false when no receiver is registered under `tag`; the page is
    /// told through `__self.log` in that case.
    pub fn native_call(
        &self,
        tag: &str,
        method: &str,
        callback_id: CallbackId,
        args_json: &str,
    ) -> bool {
        trace!(
            interface = self.android_interface(),
            tag,
            method,
            %callback_id,
            "Android call"
        );
        if !self.is_registered(tag) {
            self.report_unknown_tag(tag);
            return false;
        }
        self.enqueue(QueuedCall {
            tag: tag.to_string(),
            method: method.to_string(),
            callback_id,
            args: QueuedArgs::Json(args_json.to_string()),
        });
        true
    }

    /// Navigation hook for iOS web views.
    ///
    /// Returns true when `url` carries the communicator prefix, meaning the
    /// navigation must be cancelled. Malformed calls are logged and dropped.
    pub fn intercept_url(&self, url: &str) -> bool {
        let Some(parsed) = parse_call_url(&self.config.url_prefix, url) else {
            return false;
        };
        match parsed {
            Ok(call) if self.is_registered(&call.tag) => self.enqueue(QueuedCall {
                tag: call.tag,
                method: call.method,
                callback_id: call.callback_id,
                args: QueuedArgs::Parsed(call.args),
            }),
            Ok(call) => self.report_unknown_tag(&call.tag),
            Err(e) => warn!(error = %e, url, "malformed call URL dropped"),
        }
        true
    }

    fn enqueue(&self, call: QueuedCall) {
        debug!(tag = %call.tag, method = %call.method, id = %call.callback_id, "call queued");
        self.queue.borrow_mut().push_back(call);
    }

    fn report_unknown_tag(&self, tag: &str) {
        warn!(tag, "no host object registered for tag");
        let message = format!("Error: No object with tag '{tag}' registered on application");
        if let Err(e) = self.log_to_script(&message) {
            warn!(error = %e, "could not report unknown tag to page");
        }
    }

    /// Number of calls waiting for [`run_pending`](Self::run_pending).
    pub fn pending_calls(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Deliver queued calls to their receivers until the queue is empty.
    ///
    /// Receivers may call back into the communicator; calls they queue are
    /// delivered in the same run. Returns how many calls were delivered.
    pub fn run_pending(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(call) = next else { break };
            if self.deliver(call) {
                delivered += 1;
            }
        }
        delivered
    }

    fn deliver(&self, call: QueuedCall) -> bool {
        let receiver = self.receivers.borrow().get(&call.tag).cloned();
        let Some(receiver) = receiver else {
            warn!(tag = %call.tag, "receiver vanished before delivery");
            return false;
        };

        let args = match call.args {
            QueuedArgs::Parsed(args) => args,
            QueuedArgs::Json(json) => match serde_json::from_str::<Vec<Value>>(&json) {
                Ok(args) => args,
                Err(e) => {
                    warn!(
                        error = %e,
                        tag = %call.tag,
                        method = %call.method,
                        "JSON parsing failed"
                    );
                    return false;
                }
            },
        };

        receiver.receive_call_from_js(&call.method, call.callback_id, args);
        true
    }

    // -- Host -> page --------------------------------------------------------

    /// Invoke `tag.method(args...)` on a script object.
    pub fn call_js(&self, tag: &str, method: &str, args: &[Value]) -> Result<()> {
        let event = HostEvent::encode(tag, method, args)?;
        debug!(tag, method, "calling script object");
        self.evaluator.evaluate(&event);
        Ok(())
    }

    /// Invoke `tag.method()` with no arguments.
    pub fn call_js_no_args(&self, tag: &str, method: &str) -> Result<()> {
        self.call_js(tag, method, &[])
    }

    /// Write `message` to the page's console.
    pub fn log_to_script(&self, message: &str) -> Result<()> {
        self.call_js(SELF_TAG, SELF_LOG, &[Value::String(message.to_string())])
    }

    /// Answer a correlated call. `fields` become the response object next to
    /// `callbackId`. Uncorrelated ids are ignored.
    pub fn respond(&self, callback_id: CallbackId, fields: Map<String, Value>) -> Result<()> {
        if !callback_id.is_correlated() {
            debug!("response for uncorrelated call ignored");
            return Ok(());
        }
        let mut response = Map::new();
        response.insert(CALLBACK_ID_FIELD.to_string(), Value::from(callback_id.0));
        for (key, value) in fields {
            if key != CALLBACK_ID_FIELD {
                response.insert(key, value);
            }
        }
        info!(id = %callback_id, "responding to page");
        self.call_js(SELF_TAG, SELF_CALLBACK, &[Value::Object(response)])
    }
}
