// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Running script code inside the web view.

use wvcomm_core::types::HostEvent;

/// Hands a host-to-script call to the page.
pub trait ScriptEvaluator {
    fn evaluate(&self, event: &HostEvent);
}

/// Evaluator that renders the `raiseEvent` statement as a `javascript:` URL
/// and passes it to a web view's URL loader.
pub struct JavascriptUrlEvaluator<F> {
    js_object: String,
    load_url: F,
}

impl<F: Fn(&str)> JavascriptUrlEvaluator<F> {
    pub fn new(js_object: impl Into<String>, load_url: F) -> Self {
        Self {
            js_object: js_object.into(),
            load_url,
        }
    }
}

impl<F: Fn(&str)> ScriptEvaluator for JavascriptUrlEvaluator<F> {
    fn evaluate(&self, event: &HostEvent) {
        let url = format!("javascript:{}", event.to_js_code(&self.js_object));
        (self.load_url)(&url);
    }
}
