// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parsing of intercepted navigation URLs.
//
//   <prefix><tag>/<method>/<args>
//   <prefix><tag>/<method>/<callbackId>/<args>

use serde_json::Value;

use wvcomm_core::error::{CommunicatorError, Result};
use wvcomm_core::types::{CallbackId, NativeCall, decode_component};

/// Parse `url` into a call if it carries `prefix`.
///
/// Returns `None` for ordinary navigations. A prefixed but malformed URL is
/// `Some(Err(..))`; it is still ours and must not be loaded.
pub fn parse_call_url(prefix: &str, url: &str) -> Option<Result<NativeCall>> {
    let rest = url.strip_prefix(prefix)?;
    Some(parse_components(rest))
}

fn parse_components(rest: &str) -> Result<NativeCall> {
    let parts: Vec<&str> = rest.split('/').collect();
    let (tag, method, callback_id, args) = match parts.as_slice() {
        [tag, method, args] => (*tag, *method, CallbackId::NONE, *args),
        [tag, method, id, args] => {
            let id = id.parse::<u64>().map_err(|e| {
                CommunicatorError::InvalidArguments(format!("callback id '{id}': {e}"))
            })?;
            (*tag, *method, CallbackId(id), *args)
        }
        _ => {
            return Err(CommunicatorError::InvalidArguments(format!(
                "expected 3 or 4 path components, got {}",
                parts.len()
            )));
        }
    };

    let args = match serde_json::from_str::<Value>(&decode_component(args)?)? {
        Value::Array(args) => args,
        other => {
            return Err(CommunicatorError::InvalidArguments(format!(
                "expected a JSON array of arguments, got {other}"
            )));
        }
    };

    Ok(NativeCall::new(decode_component(tag)?, decode_component(method)?, args)
        .with_callback_id(callback_id))
}
