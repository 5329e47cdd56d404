// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Trait seams of the script-side bridge.
//
// Objects registered with the bridge, the script console, and the two host
// delivery mechanisms are all injected through these traits. Everything runs
// on the page's single event-loop thread, so none of them require
// `Send + Sync`.

use serde_json::Value;

use wvcomm_core::error::Result;
use wvcomm_core::types::{CallbackId, ConsoleEntry, ConsoleLevel, NativeCall, Platform};

/// A completion handler for a correlated outbound call.
pub type Callback = Box<dyn FnOnce(Value)>;

/// An object the host can invoke methods on by name.
///
/// The object maps method names to its own handlers; the bridge never
/// inspects it beyond these two calls.
pub trait ScriptObject {
    /// Whether `method` names a callable member of this object.
    fn has_method(&self, method: &str) -> bool;

    /// Invoke `method` with positional arguments. Only called after
    /// [`has_method`](Self::has_method) returned true.
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value>;
}

/// Destination for script console output.
pub trait ConsoleSink {
    fn log(&self, entry: ConsoleEntry);
}

/// Console that forwards every line to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl ConsoleSink for TracingConsole {
    fn log(&self, entry: ConsoleEntry) {
        match entry.level {
            ConsoleLevel::Log => {
                tracing::info!(target: "webview_console", "{}", entry.message)
            }
            ConsoleLevel::Warn => {
                tracing::warn!(target: "webview_console", "{}", entry.message)
            }
        }
    }
}

/// A platform-specific path for delivering calls to the host.
pub trait PlatformTransport: std::fmt::Debug {
    /// The platform this transport delivers to.
    fn platform(&self) -> Platform;

    /// Hand a call to the host. Delivery is best-effort; an `Err` means the
    /// call was not handed over at all.
    fn submit(&self, call: &NativeCall) -> Result<()>;
}

/// The call object an Android host injects into the page.
pub trait AndroidInterface {
    /// Synchronous call into the host. Returns false when the host has no
    /// object registered under `tag`.
    fn native_call(
        &self,
        tag: &str,
        method: &str,
        callback_id: CallbackId,
        args_json: &str,
    ) -> bool;
}

/// Page-side hook used by the iOS transport: attach `url` as the source of a
/// transient invisible frame, then remove the frame again.
pub trait FrameNavigator {
    fn load_transient_frame(&self, url: &str);
}
