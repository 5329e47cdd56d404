// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The internal `__self` object: host-callable `log` and `callback`.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use wvcomm_core::error::{CommunicatorError, Result};
use wvcomm_core::types::{CallbackId, ConsoleEntry, ConsoleLevel, SELF_CALLBACK, SELF_LOG};

use crate::correlation::CorrelationTable;
use crate::traits::{ConsoleSink, ScriptObject};

pub(crate) struct SelfObject {
    callbacks: Rc<RefCell<CorrelationTable>>,
    console: Rc<dyn ConsoleSink>,
}

impl SelfObject {
    pub(crate) fn new(
        callbacks: Rc<RefCell<CorrelationTable>>,
        console: Rc<dyn ConsoleSink>,
    ) -> Self {
        Self { callbacks, console }
    }

    fn log(&self, args: Vec<Value>) {
        let message = match args.into_iter().next() {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        self.console.log(ConsoleEntry::new(ConsoleLevel::Log, message));
    }

    /// Complete the pending callback named by the response's `callbackId`.
    ///
    /// The callback receives the whole response object. The table borrow is
    /// released before the callback runs so it may issue further calls.
    fn complete(&self, args: Vec<Value>) -> Result<()> {
        let response = args.into_iter().next().unwrap_or(Value::Null);
        if !response.is_object() {
            return Err(CommunicatorError::InvalidArguments(format!(
                "callback response must be an object, got {response}"
            )));
        }

        let id = CallbackId::from_response(&response);
        let callback = self.callbacks.borrow_mut().take(id);
        match callback {
            Some(callback) => {
                debug!(%id, "completing callback");
                callback(response);
            }
            None => debug!(%id, "no pending callback for response"),
        }
        Ok(())
    }
}

impl ScriptObject for SelfObject {
    fn has_method(&self, method: &str) -> bool {
        method == SELF_LOG || method == SELF_CALLBACK
    }

    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        match method {
            SELF_LOG => self.log(args),
            SELF_CALLBACK => self.complete(args)?,
            other => {
                return Err(CommunicatorError::MethodNotFound {
                    tag: wvcomm_core::types::SELF_TAG.into(),
                    method: other.into(),
                });
            }
        }
        Ok(Value::Null)
    }
}
