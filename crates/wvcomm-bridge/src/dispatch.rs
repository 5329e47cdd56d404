// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inbound dispatch — host to script.
//
// The host hands over three URL-encoded strings: object tag, method name and
// a JSON array of arguments. They are decoded, the target is resolved through
// the registry, and the method is invoked. The method's return value is
// discarded; replies travel back through separate outbound calls.

use std::cell::RefCell;

use serde_json::Value;
use tracing::trace;

use wvcomm_core::error::{CommunicatorError, Result};
use wvcomm_core::types::decode_component;

use crate::registry::ObjectRegistry;

/// A decoded host-to-script call.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundCall {
    pub tag: String,
    pub method: String,
    pub args: Vec<Value>,
}

impl InboundCall {
    /// Decode the three wire strings passed to `raiseEvent`.
    ///
    /// A `null` (or empty) parameter string means "no arguments", which is
    /// what a host sends for argument-less calls. Any other non-array value
    /// is rejected.
    pub fn decode(object: &str, method: &str, params: &str) -> Result<Self> {
        let tag = decode_component(object)?;
        let method = decode_component(method)?;
        let params = decode_component(params)?;

        let args = if params.trim().is_empty() {
            Vec::new()
        } else {
            match serde_json::from_str::<Value>(&params)? {
                Value::Array(args) => args,
                Value::Null => Vec::new(),
                other => {
                    return Err(CommunicatorError::InvalidArguments(format!(
                        "expected a JSON array of arguments, got {other}"
                    )));
                }
            }
        };

        Ok(Self { tag, method, args })
    }
}

/// Resolve and invoke `call`.
///
/// The registry borrow is released before the target runs, so targets may
/// register objects or issue calls of their own.
pub fn dispatch(registry: &RefCell<ObjectRegistry>, call: InboundCall) -> Result<()> {
    let target = registry
        .borrow()
        .resolve(&call.tag)
        .ok_or_else(|| CommunicatorError::ObjectNotFound(call.tag.clone()))?;

    if !target.has_method(&call.method) {
        return Err(CommunicatorError::MethodNotFound {
            tag: call.tag,
            method: call.method,
        });
    }

    trace!(tag = %call.tag, method = %call.method, argc = call.args.len(), "invoking");
    target.invoke(&call.method, call.args)?;
    Ok(())
}
