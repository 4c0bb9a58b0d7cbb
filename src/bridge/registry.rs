//! Exposed function table: script name → (module, minimum arity, shim).

use super::decode::CallContext;
use super::value::ScriptValue;
use crate::core::error::BridgeResult;
use crate::raylib::Raylib;
use std::collections::HashMap;
use std::fmt;

/// Parameter-conversion shim for one native function.
pub type NativeFn<R> = fn(&mut CallContext<'_, R>) -> BridgeResult<ScriptValue>;

/// raylib module a function belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Core,
    Shapes,
    Textures,
    Text,
    Models,
    Handles,
}

pub struct FunctionEntry<R: Raylib> {
    pub name: &'static str,
    pub arity: usize,
    pub module: Module,
    pub func: NativeFn<R>,
}

impl<R: Raylib> Clone for FunctionEntry<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Raylib> Copy for FunctionEntry<R> {}

impl<R: Raylib> fmt::Debug for FunctionEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("module", &self.module)
            .finish()
    }
}

pub struct FunctionTable<R: Raylib> {
    entries: Vec<FunctionEntry<R>>,
    by_name: HashMap<&'static str, usize>,
}

impl<R: Raylib> Default for FunctionTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Raylib> FunctionTable<R> {
    /// Empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Every raylib function and handle helper exposed to scripts.
    pub fn standard() -> Self {
        let mut table = Self::new();
        super::core::register(&mut table);
        super::shapes::register(&mut table);
        super::textures::register(&mut table);
        super::text::register(&mut table);
        super::models::register(&mut table);
        super::fields::register(&mut table);
        tracing::debug!(target: "bridge", functions = table.len(), "Function table built");
        table
    }

    /// Register a shim. A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, module: Module, name: &'static str, arity: usize, func: NativeFn<R>) {
        let entry = FunctionEntry {
            name,
            arity,
            module,
            func,
        };
        match self.by_name.get(name) {
            Some(&index) => {
                tracing::warn!(target: "bridge", name, "Function registered twice, replacing");
                self.entries[index] = entry;
            }
            None => {
                self.by_name.insert(name, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionEntry<R>> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionEntry<R>> {
        self.entries.iter()
    }

    pub fn in_module(&self, module: Module) -> impl Iterator<Item = &FunctionEntry<R>> {
        self.entries.iter().filter(move |entry| entry.module == module)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
