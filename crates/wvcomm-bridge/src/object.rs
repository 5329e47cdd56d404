// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Closure-backed script objects.

use std::collections::HashMap;

use serde_json::Value;

use wvcomm_core::error::{CommunicatorError, Result};

use crate::traits::ScriptObject;

type Handler = Box<dyn Fn(Vec<Value>) -> Result<Value>>;

/// A [`ScriptObject`] built from named closures.
///
/// ```ignore
/// let ui = MethodTable::new()
///     .method("showToast", |args| {
///         println!("{:?}", args.first());
///         Ok(Value::Null)
///     });
/// bridge.register("ui", Rc::new(ui))?;
/// ```
#[derive(Default)]
pub struct MethodTable {
    handlers: HashMap<String, Handler>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the handler for `name`.
    pub fn method<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    /// Names of all methods, sorted.
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ScriptObject for MethodTable {
    fn has_method(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let handler = self.handlers.get(method).ok_or_else(|| {
            CommunicatorError::MethodNotFound {
                tag: String::new(),
                method: method.to_string(),
            }
        })?;
        handler(args)
    }
}

impl std::fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodTable")
            .field("methods", &self.method_names())
            .finish()
    }
}
