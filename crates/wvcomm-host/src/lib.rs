// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WebView communicator — host side.
//
// The native shell registers receivers under tags, accepts calls coming out
// of the page (Android call object or intercepted iOS navigation), and
// invokes script objects through `raiseEvent`.

pub mod communicator;
pub mod evaluator;
pub mod url;

pub use communicator::{HostCommunicator, MessageReceiver};
pub use evaluator::{JavascriptUrlEvaluator, ScriptEvaluator};
pub use url::parse_call_url;
