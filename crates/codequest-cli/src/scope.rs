//! Two-tier variable scope.
//!
//! A run owns one [`GlobalScope`]. Each executing body sees a [`BlockScope`]:
//! loop iterations get a fresh one, `if`/`else` bodies share their parent's.
//! Writes stay in the block only for names the block already owns; every
//! other write lands in the globals, however deeply nested.

use std::collections::HashMap;

use crate::value::Value;

/// Bindings that live for the whole run.
#[derive(Debug, Default)]
pub struct GlobalScope {
    bindings: HashMap<String, Value>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Bindings owned by one executing body.
#[derive(Debug, Default, Clone)]
pub struct BlockScope {
    bindings: HashMap<String, Value>,
}

impl BlockScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope for one loop iteration: a copy of this scope's bindings with
    /// the loop variable set on top.
    pub fn for_iteration(&self, var: &str, value: Value) -> BlockScope {
        let mut scope = self.clone();
        scope.bindings.insert(var.to_string(), value);
        scope
    }

    /// Whether `name` is bound directly in this scope.
    pub fn owns(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }
}

/// Read-only overlay of a block scope on the globals, built fresh for each
/// statement so it always sees the latest writes.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveScope<'a> {
    block: &'a BlockScope,
    global: &'a GlobalScope,
}

impl<'a> EffectiveScope<'a> {
    pub fn new(block: &'a BlockScope, global: &'a GlobalScope) -> Self {
        Self { block, global }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        resolve_read(name, self.block, self.global)
    }
}

/// Block binding if present, else global binding.
pub fn resolve_read<'a>(
    name: &str,
    block: &'a BlockScope,
    global: &'a GlobalScope,
) -> Option<&'a Value> {
    block.get(name).or_else(|| global.get(name))
}

/// Overwrite in `block` when it owns `name`, otherwise write the global.
pub fn write(name: &str, value: Value, block: &mut BlockScope, global: &mut GlobalScope) {
    if block.owns(name) {
        block.bindings.insert(name.to_string(), value);
    } else {
        global.set(name, value);
    }
}
