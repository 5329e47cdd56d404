// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WebView communicator — core types, errors and configuration shared by the
// script-side bridge and the host-side communicator.

pub mod config;
pub mod error;
pub mod types;

pub use config::CommunicatorConfig;
pub use error::CommunicatorError;
pub use types::*;
