// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the WebView communicator.

use thiserror::Error;

/// Top-level error type for all communicator operations.
#[derive(Debug, Error)]
pub enum CommunicatorError {
    // -- Registration --
    #[error("another object already registered with tag '{0}'")]
    DuplicateTag(String),

    // -- Inbound dispatch --
    #[error("could not find object '{0}'")]
    ObjectNotFound(String),

    #[error("could not find method '{method}' on object '{tag}'")]
    MethodNotFound { tag: String, method: String },

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    // -- Wire encoding --
    #[error("URL decoding failed: {0}")]
    Decode(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Delivery --
    #[error("native layer not available on this platform")]
    PlatformUnavailable,

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CommunicatorError>;
