// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The script-side bridge: one owner for the object registry, the callback
// correlation table and the active transport.
//
// All state sits behind `RefCell`s and every operation runs to completion on
// the page's event-loop thread. Borrows are never held while user code
// (registered objects, callbacks) runs, so that code may call back into the
// bridge.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info, warn};

use wvcomm_core::config::CommunicatorConfig;
use wvcomm_core::error::Result;
use wvcomm_core::types::{
    CallbackId, ConsoleEntry, ConsoleLevel, NativeCall, Platform, unavailable_payload,
};

use crate::correlation::CorrelationTable;
use crate::dispatch::{self, InboundCall};
use crate::registry::ObjectRegistry;
use crate::self_object::SelfObject;
use crate::traits::{Callback, ConsoleSink, PlatformTransport, ScriptObject, TracingConsole};
use crate::transport::HostCapabilities;

pub struct WebViewBridge {
    config: CommunicatorConfig,
    capabilities: HostCapabilities,
    platform: RefCell<Platform>,
    transport: RefCell<Rc<dyn PlatformTransport>>,
    registry: RefCell<ObjectRegistry>,
    callbacks: Rc<RefCell<CorrelationTable>>,
    console: Rc<dyn ConsoleSink>,
}

impl WebViewBridge {
    /// Create a bridge whose console output goes to `tracing`.
    pub fn new(config: CommunicatorConfig, capabilities: HostCapabilities) -> Self {
        Self::with_console(config, capabilities, Rc::new(TracingConsole))
    }

    /// Create a bridge writing console output to `console`.
    ///
    /// Detects the platform from `capabilities`, registers `__self`, then
    /// applies `config.platform_override` through [`set_platform`](Self::set_platform).
    pub fn with_console(
        config: CommunicatorConfig,
        capabilities: HostCapabilities,
        console: Rc<dyn ConsoleSink>,
    ) -> Self {
        let platform = capabilities.detect();
        let transport = capabilities.transport_for(&platform, &config);
        let callbacks = Rc::new(RefCell::new(CorrelationTable::new()));

        let mut registry = ObjectRegistry::new();
        let self_object = SelfObject::new(Rc::clone(&callbacks), Rc::clone(&console));
        // A fresh registry cannot already hold `__self`.
        if let Err(e) = registry.register_internal(Rc::new(self_object)) {
            warn!(error = %e, "internal object registration failed");
        }

        let bridge = Self {
            config,
            capabilities,
            platform: RefCell::new(platform),
            transport: RefCell::new(transport),
            registry: RefCell::new(registry),
            callbacks,
            console,
        };

        if let Some(tag) = bridge.config.platform_override.clone() {
            bridge.set_platform(&tag);
        }
        bridge
    }

    pub fn config(&self) -> &CommunicatorConfig {
        &self.config
    }

    // -- Registry ------------------------------------------------------------

    /// Expose `object` to the host under `tag`.
    ///
    /// Fails with `DuplicateTag` when the tag is taken, `__self` included;
    /// the first binding stays.
    pub fn register(&self, tag: &str, object: Rc<dyn ScriptObject>) -> Result<()> {
        self.registry.borrow_mut().register(tag, object)
    }

    pub fn resolve(&self, tag: &str) -> Option<Rc<dyn ScriptObject>> {
        self.registry.borrow().resolve(tag)
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.registry.borrow().contains(tag)
    }

    /// All registered tags, `__self` included, sorted.
    pub fn registered_tags(&self) -> Vec<String> {
        self.registry.borrow().tags()
    }

    // -- Inbound -------------------------------------------------------------

    /// Entry point the host calls with three URL-encoded strings.
    ///
    /// Never fails: unresolved objects or methods, malformed arguments and
    /// errors raised by the target are logged and the call is dropped.
    pub fn raise_event(&self, object: &str, method: &str, params: &str) {
        if let Err(e) = self.dispatch(object, method, params) {
            warn!(error = %e, object, method, "inbound call dropped");
            if self.config.log_unresolved {
                self.console.log(ConsoleEntry::new(
                    ConsoleLevel::Warn,
                    format!("WebViewCommunicator: {e} called from host"),
                ));
            }
        }
    }

    /// Like [`raise_event`](Self::raise_event) but reports why a call failed.
    pub fn dispatch(&self, object: &str, method: &str, params: &str) -> Result<()> {
        let call = InboundCall::decode(object, method, params)?;
        dispatch::dispatch(&self.registry, call)
    }

    // -- Outbound ------------------------------------------------------------

    /// Fire-and-forget call to `tag.method(args...)` on the host.
    ///
    /// Dropped silently when no delivery path exists.
    pub fn native_call(&self, tag: &str, method: &str, args: Vec<Value>) {
        let call = NativeCall::new(tag, method, args);
        self.submit(&call);
    }

    /// Correlated call to `tag.method(args...)` on the host.
    ///
    /// `callback` runs once the host answers through `__self.callback`.
    /// A `None` callback aborts the call without submitting anything. With no
    /// host at all (`none`) the callback runs immediately with
    /// `{isSdk: false, enableNative: false}` and nothing stays pending.
    ///
    /// Returns the id the call was submitted under.
    pub fn native_call_with_callback(
        &self,
        tag: &str,
        method: &str,
        callback: Option<Callback>,
        args: Vec<Value>,
    ) -> Option<CallbackId> {
        let callback = callback?;

        if *self.platform.borrow() == Platform::None {
            debug!(tag, method, "no host; answering callback locally");
            callback(unavailable_payload());
            return None;
        }

        let id = self.callbacks.borrow_mut().insert(callback);
        let call = NativeCall::new(tag, method, args).with_callback_id(id);
        self.submit(&call);
        Some(id)
    }

    fn submit(&self, call: &NativeCall) {
        let transport = self.transport.borrow().clone();
        if let Err(e) = transport.submit(call) {
            debug!(
                error = %e,
                platform = %transport.platform(),
                tag = %call.tag,
                method = %call.method,
                "outbound call dropped"
            );
        }
    }

    // -- Correlation ---------------------------------------------------------

    /// Number of correlated calls still waiting for an answer.
    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_pending(&self, id: CallbackId) -> bool {
        self.callbacks.borrow().contains(id)
    }

    /// Drop the pending callback for `id` without running it.
    ///
    /// Opt-in only; nothing calls this automatically, so unanswered calls
    /// otherwise stay pending forever.
    pub fn cancel_callback(&self, id: CallbackId) -> bool {
        let removed = self.callbacks.borrow_mut().take(id).is_some();
        if removed {
            debug!(%id, "callback cancelled");
        }
        removed
    }

    // -- Platform ------------------------------------------------------------

    pub fn platform(&self) -> Platform {
        self.platform.borrow().clone()
    }

    /// Force the platform tag.
    ///
    /// Only honoured while the current platform is `android` or `ios`; an
    /// undetected (`none`) or already-overridden platform cannot be changed.
    /// Returns whether the override took effect.
    pub fn set_platform(&self, tag: &str) -> bool {
        let current = self.platform();
        if !current.is_known() {
            warn!(%current, requested = tag, "platform override ignored");
            return false;
        }

        let platform = Platform::from_tag(tag);
        let transport = self.capabilities.transport_for(&platform, &self.config);
        info!(
            from = %current,
            to = %platform,
            delivers_to = %transport.platform(),
            "platform overridden"
        );
        *self.transport.borrow_mut() = transport;
        *self.platform.borrow_mut() = platform;
        true
    }
}

impl std::fmt::Debug for WebViewBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebViewBridge")
            .field("platform", &self.platform())
            .field("transport", &self.transport.borrow())
            .field("registered", &self.registered_tags())
            .field("pending_callbacks", &self.pending_callbacks())
            .field("last_callback_id", &self.callbacks.borrow().last_id())
            .finish()
    }
}
