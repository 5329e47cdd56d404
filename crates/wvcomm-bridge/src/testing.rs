// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording fakes shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use wvcomm_core::error::Result;
use wvcomm_core::types::{CallbackId, ConsoleEntry, ConsoleLevel};

use crate::traits::{AndroidInterface, ConsoleSink, FrameNavigator, ScriptObject};

#[derive(Default)]
pub struct RecordingConsole {
    entries: RefCell<Vec<ConsoleEntry>>,
}

impl RecordingConsole {
    pub fn messages(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|e| e.message.clone()).collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == ConsoleLevel::Warn)
            .map(|e| e.message.clone())
            .collect()
    }
}

impl ConsoleSink for RecordingConsole {
    fn log(&self, entry: ConsoleEntry) {
        self.entries.borrow_mut().push(entry);
    }
}

/// Object exposing a fixed set of methods that records every invocation.
pub struct RecordingObject {
    methods: Vec<&'static str>,
    pub calls: RefCell<Vec<(String, Vec<Value>)>>,
}

impl RecordingObject {
    pub fn new(methods: &[&'static str]) -> Rc<Self> {
        Rc::new(Self {
            methods: methods.to_vec(),
            calls: RefCell::new(Vec::new()),
        })
    }
}

impl ScriptObject for RecordingObject {
    fn has_method(&self, method: &str) -> bool {
        self.methods.contains(&method)
    }

    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        self.calls.borrow_mut().push((method.to_string(), args));
        Ok(Value::Null)
    }
}

/// Android call object that records calls and reports every tag as known.
#[derive(Default)]
pub struct RecordingAndroid {
    pub calls: RefCell<Vec<(String, String, CallbackId, String)>>,
}

impl AndroidInterface for RecordingAndroid {
    fn native_call(
        &self,
        tag: &str,
        method: &str,
        callback_id: CallbackId,
        args_json: &str,
    ) -> bool {
        self.calls.borrow_mut().push((
            tag.to_string(),
            method.to_string(),
            callback_id,
            args_json.to_string(),
        ));
        true
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub urls: RefCell<Vec<String>>,
}

impl FrameNavigator for RecordingNavigator {
    fn load_transient_frame(&self, url: &str) {
        self.urls.borrow_mut().push(url.to_string());
    }
}
