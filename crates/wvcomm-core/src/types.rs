// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the WebView communicator: platform tags, callback
// correlation ids and the two message shapes crossing the script/host
// boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{CommunicatorError, Result};

/// Tag of the internal object every script bridge registers at start-up.
pub const SELF_TAG: &str = "__self";

/// Method on [`SELF_TAG`] that writes to the script console.
pub const SELF_LOG: &str = "log";

/// Method on [`SELF_TAG`] that completes a pending callback.
pub const SELF_CALLBACK: &str = "callback";

/// Field carrying the correlation id inside a callback response.
pub const CALLBACK_ID_FIELD: &str = "callbackId";

/// Navigation URLs having this prefix are intercepted by the iOS host.
pub const DEFAULT_URL_PREFIX: &str = "js:WebViewCommunicator/";

/// Global script object the host invokes `raiseEvent` on.
pub const DEFAULT_JS_OBJECT: &str = "WebViewCommunicator";

/// Name of the call object the Android host injects into the page.
pub const DEFAULT_ANDROID_INTERFACE: &str = "_WebViewCommunicator";

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Host platform the script is running inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    /// Calls go through an injected synchronous call object.
    Android,
    /// Calls go through intercepted custom-scheme navigations.
    Ios,
    /// No host detected; outbound calls are dropped or answered locally.
    None,
    /// A value forced through an override that names no known transport.
    Other(String),
}

impl Platform {
    /// Parse a platform tag. Unknown tags are kept verbatim as `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "android" => Self::Android,
            "ios" => Self::Ios,
            "none" => Self::None,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire tag for this platform.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::None => "none",
            Self::Other(tag) => tag,
        }
    }

    /// True for the two platforms that have a delivery path.
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Android | Self::Ios)
    }
}

impl From<String> for Platform {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_tag().to_string()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ---------------------------------------------------------------------------
// Callback correlation
// ---------------------------------------------------------------------------

/// Integer linking an outbound call to its eventual response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(pub u64);

impl CallbackId {
    /// "No correlation expected."
    pub const NONE: CallbackId = CallbackId(0);

    /// Whether a response is expected for this id.
    pub fn is_correlated(self) -> bool {
        self.0 > 0
    }

    /// Extract the id from a callback response object.
    ///
    /// Whole floats (`1.0`) name the same id as the integer. Missing,
    /// negative or fractional values are treated as [`CallbackId::NONE`].
    pub fn from_response(response: &Value) -> Self {
        let Some(id) = response.get(CALLBACK_ID_FIELD) else {
            return Self::NONE;
        };
        id.as_u64()
            .or_else(|| {
                id.as_f64()
                    .filter(|f| *f > 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .map(CallbackId)
            .unwrap_or(Self::NONE)
    }
}

impl std::fmt::Display for CallbackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload handed to a correlated callback when no host is present.
pub fn unavailable_payload() -> Value {
    json!({ "isSdk": false, "enableNative": false })
}

// ---------------------------------------------------------------------------
// Script -> host
// ---------------------------------------------------------------------------

/// A call from the script to a named object on the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeCall {
    pub tag: String,
    pub method: String,
    pub callback_id: CallbackId,
    pub args: Vec<Value>,
}

impl NativeCall {
    pub fn new(tag: impl Into<String>, method: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            tag: tag.into(),
            method: method.into(),
            callback_id: CallbackId::NONE,
            args,
        }
    }

    pub fn with_callback_id(mut self, id: CallbackId) -> Self {
        self.callback_id = id;
        self
    }

    /// The positional arguments as a JSON array string.
    pub fn args_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.args)?)
    }
}

// ---------------------------------------------------------------------------
// Host -> script
// ---------------------------------------------------------------------------

/// The three URL-encoded strings the host passes to `raiseEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEvent {
    pub object: String,
    pub method: String,
    pub params: String,
}

impl HostEvent {
    /// Encode a host call addressed to `tag.method(args...)`.
    pub fn encode(tag: &str, method: &str, args: &[Value]) -> Result<Self> {
        let params = serde_json::to_string(args)?;
        Ok(Self {
            object: urlencoding::encode(tag).into_owned(),
            method: urlencoding::encode(method).into_owned(),
            params: urlencoding::encode(&params).into_owned(),
        })
    }

    /// Render the script statement the host evaluates inside the web view.
    pub fn to_js_code(&self, js_object: &str) -> String {
        format!(
            "{js_object}.raiseEvent('{}', '{}', '{}')",
            self.object, self.method, self.params
        )
    }
}

/// Percent-decode one wire component.
pub fn decode_component(raw: &str) -> Result<String> {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .map_err(|e| CommunicatorError::Decode(format!("'{raw}': {e}")))
}

/// Percent-encode one wire component.
pub fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

// ---------------------------------------------------------------------------
// Script console
// ---------------------------------------------------------------------------

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConsoleLevel {
    /// Plain `log` output, including messages sent by the host.
    Log,
    /// Diagnostics produced by the bridge itself.
    Warn,
}

/// One line written to the script console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    pub timestamp: DateTime<Utc>,
    pub level: ConsoleLevel,
    pub message: String,
}

impl ConsoleEntry {
    pub fn new(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }
}
