// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Object registry — tag to script object, bound exactly once per tag.
//
// Entries live for the lifetime of the bridge; there is no unregister.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use wvcomm_core::error::{CommunicatorError, Result};
use wvcomm_core::types::SELF_TAG;

use crate::traits::ScriptObject;

#[derive(Default)]
pub struct ObjectRegistry {
    objects: HashMap<String, Rc<dyn ScriptObject>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `object` to `tag`.
    ///
    /// Fails with `DuplicateTag` if the tag is already bound; the existing
    /// binding is left untouched. `__self` always counts as bound.
    pub fn register(&mut self, tag: &str, object: Rc<dyn ScriptObject>) -> Result<()> {
        if tag == SELF_TAG {
            return Err(CommunicatorError::DuplicateTag(tag.to_string()));
        }
        self.insert(tag, object)
    }

    /// Bind the internal `__self` object. Only the bridge calls this.
    pub(crate) fn register_internal(&mut self, object: Rc<dyn ScriptObject>) -> Result<()> {
        self.insert(SELF_TAG, object)
    }

    fn insert(&mut self, tag: &str, object: Rc<dyn ScriptObject>) -> Result<()> {
        if self.objects.contains_key(tag) {
            return Err(CommunicatorError::DuplicateTag(tag.to_string()));
        }
        debug!(tag, "object registered");
        self.objects.insert(tag.to_string(), object);
        Ok(())
    }

    /// Look up the object bound to `tag`.
    pub fn resolve(&self, tag: &str) -> Option<Rc<dyn ScriptObject>> {
        self.objects.get(tag).cloned()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.objects.contains_key(tag)
    }

    /// All bound tags, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.objects.keys().cloned().collect();
        tags.sort_unstable();
        tags
    }
}
