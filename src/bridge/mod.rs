//! Native handle marshaling bridge.
//!
//! [`Bridge::call`] looks a script-visible name up in the [`FunctionTable`],
//! checks the minimum arity and runs the shim. Shims decode arguments through
//! [`CallContext`], call the [`Raylib`] backend once and encode the result.
//!
//! - `value` - host-independent script values
//! - `handle` - typed handle arena
//! - `decode` - argument decoder / result encoder
//! - `registry` - name → shim table
//! - `core`, `shapes`, `textures`, `text`, `models` - shims per raylib module
//! - `fields` - struct constructors, field access, handle release

pub mod decode;
pub mod handle;
pub mod registry;
pub mod value;

mod core;
mod fields;
mod models;
mod shapes;
mod text;
mod textures;

pub use decode::CallContext;
pub use handle::{HandleId, HandleTable, Marshal, NativeValue, ReleaseQueue, TypeTag};
pub use registry::{FunctionEntry, FunctionTable, Module, NativeFn};
pub use value::{HandleRef, ScriptValue};

use crate::config::HostConfig;
use crate::core::error::{BridgeError, BridgeResult};
use crate::raylib::Raylib;

/// Dispatcher owning the backend, the handle table and the function table.
pub struct Bridge<R: Raylib> {
    rl: R,
    handles: HandleTable,
    functions: FunctionTable<R>,
    releases: ReleaseQueue,
}

impl<R: Raylib> Bridge<R> {
    pub fn new(rl: R, config: &HostConfig) -> Self {
        Self::with_functions(rl, config, FunctionTable::standard())
    }

    pub fn with_functions(rl: R, config: &HostConfig, functions: FunctionTable<R>) -> Self {
        tracing::info!(
            target: "bridge",
            functions = functions.len(),
            max_handles = config.max_handles,
            "Bridge created"
        );
        Self {
            rl,
            handles: HandleTable::new(config.max_handles),
            functions,
            releases: ReleaseQueue::new(),
        }
    }

    /// Call an exposed function by its script name.
    pub fn call(&mut self, name: &str, args: &[ScriptValue]) -> BridgeResult<ScriptValue> {
        self.collect_released();
        let entry = *self
            .functions
            .get(name)
            .ok_or_else(|| BridgeError::UnknownFunction(name.to_string()))?;

        if args.len() < entry.arity {
            return Err(BridgeError::Arity {
                function: entry.name,
                expected: entry.arity,
                found: args.len(),
            });
        }

        let mut cx = CallContext::new(entry.name, args, &mut self.rl, &mut self.handles);
        let result = (entry.func)(&mut cx);
        if let Err(err) = &result {
            tracing::debug!(target: "bridge", function = entry.name, kind = ?err.kind(), "{}", err);
        }
        result
    }

    /// Wrap a value from the host side (e.g. palette constants).
    pub fn wrap<T: Marshal>(&mut self, value: T) -> BridgeResult<ScriptValue> {
        self.collect_released();
        let mut cx = CallContext::new("wrap", &[], &mut self.rl, &mut self.handles);
        cx.wrap(value)
    }

    /// Queue shared with the script host for handles its garbage collector dropped.
    pub fn release_queue(&self) -> ReleaseQueue {
        self.releases.clone()
    }

    /// Drop the cells of every queued handle. Ids that are already stale are skipped.
    pub fn collect_released(&mut self) -> usize {
        let mut released = 0;
        for id in self.releases.take() {
            let closed = self.handles.is_closed(id).unwrap_or(true);
            let Ok(value) = self.handles.release(id) else {
                continue;
            };
            if !closed && value.tag().owns_resource() {
                tracing::warn!(
                    target: "bridge",
                    handle = %id,
                    tag = %value.tag(),
                    "Collected a resource handle that was never unloaded"
                );
            }
            released += 1;
        }
        if released > 0 {
            tracing::trace!(target: "bridge", released, live = self.handles.len(), "Collected handles");
        }
        released
    }

    /// Read a handle's value from the host side.
    pub fn get<T: Marshal>(&self, handle: HandleRef) -> BridgeResult<T> {
        self.handles.get::<T>(handle.id).map_err(|e| BridgeError::Argument {
            function: "get",
            index: 0,
            source: e.into(),
        })
    }

    pub fn backend(&self) -> &R {
        &self.rl
    }

    pub fn backend_mut(&mut self) -> &mut R {
        &mut self.rl
    }

    pub fn handles(&self) -> &HandleTable {
        &self.handles
    }

    pub fn functions(&self) -> &FunctionTable<R> {
        &self.functions
    }

    pub fn into_backend(self) -> R {
        self.rl
    }
}
