// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! WebView communicator — script-side bridge.
//!
//! Lets script code expose named objects to the native host, accept method
//! invocations from it, and call named methods on the host, optionally
//! awaiting an answer correlated by callback id.
//!
//! Delivery to the host is pluggable: Android hosts inject a call object,
//! iOS hosts intercept custom-scheme navigations, and outside any host the
//! stub transport drops outbound calls.

pub mod bridge;
pub mod correlation;
pub mod dispatch;
pub mod object;
pub mod registry;
mod self_object;
pub mod traits;
pub mod transport;

#[cfg(test)]
mod testing;

pub use bridge::WebViewBridge;
pub use object::MethodTable;
pub use traits::{
    AndroidInterface, Callback, ConsoleSink, FrameNavigator, PlatformTransport, ScriptObject,
    TracingConsole,
};
pub use transport::HostCapabilities;
