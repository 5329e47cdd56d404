// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Callback correlation table.
//
// Ids come from a counter that starts at 1 and is never reused. An entry is
// removed only when its response arrives (or it is explicitly cancelled);
// calls the host never answers stay pending for the life of the bridge.

use std::collections::HashMap;

use tracing::trace;

use wvcomm_core::types::CallbackId;

use crate::traits::Callback;

#[derive(Default)]
pub struct CorrelationTable {
    last_id: u64,
    pending: HashMap<CallbackId, Callback>,
}

impl CorrelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `callback` under the next id and return that id.
    pub fn insert(&mut self, callback: Callback) -> CallbackId {
        self.last_id += 1;
        let id = CallbackId(self.last_id);
        self.pending.insert(id, callback);
        trace!(%id, pending = self.pending.len(), "callback pending");
        id
    }

    /// Remove and return the callback for `id`. Uncorrelated or unknown ids
    /// yield `None`.
    pub fn take(&mut self, id: CallbackId) -> Option<Callback> {
        if !id.is_correlated() {
            return None;
        }
        self.pending.remove(&id)
    }

    pub fn contains(&self, id: CallbackId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of calls still waiting for a response.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The most recently issued id, or `CallbackId::NONE` before the first.
    pub fn last_id(&self) -> CallbackId {
        CallbackId(self.last_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn noop() -> Callback {
        Box::new(|_: Value| {})
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut table = CorrelationTable::new();
        assert_eq!(table.last_id(), CallbackId::NONE);
        assert_eq!(table.insert(noop()), CallbackId(1));
        assert_eq!(table.insert(noop()), CallbackId(2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_take() {
        let mut table = CorrelationTable::new();
        let first = table.insert(noop());
        assert!(table.take(first).is_some());
        let second = table.insert(noop());
        assert!(second > first);
    }

    #[test]
    fn take_removes_entry() {
        let seen = Rc::new(RefCell::new(Vec::<Value>::new()));
        let sink = Rc::clone(&seen);

        let mut table = CorrelationTable::new();
        let id = table.insert(Box::new(move |v: Value| sink.borrow_mut().push(v)));

        let callback = table.take(id).expect("pending");
        callback(json!({ "ok": true }));
        assert!(table.take(id).is_none());
        assert!(table.is_empty());
        assert_eq!(seen.borrow().as_slice(), &[json!({ "ok": true })]);
    }

    #[test]
    fn zero_id_never_matches() {
        let mut table = CorrelationTable::new();
        table.insert(noop());
        assert!(table.take(CallbackId::NONE).is_none());
        assert!(table.take(CallbackId(99)).is_none());
        assert_eq!(table.len(), 1);
    }
}
