//! Script host bindings.
//!
//! A host adapter exposes a [`Bridge`](crate::bridge::Bridge) to one script
//! engine. It converts the engine's values into
//! [`ScriptValue`](crate::bridge::ScriptValue)s, calls the bridge and converts
//! the result back. Bridge errors surface as script exceptions.
//!
//! ```text
//!   script ──> adapter (js) ──> Bridge::call ──> shim ──> Raylib
//!     ^                                                     │
//!     └──────────── handle / primitive result ──────────────┘
//! ```

pub mod js;

pub use js::JsBindingAdapter;

use crate::core::error::ScriptResult;

/// A script engine hosting the bridge.
pub trait BindingAdapter {
    /// Install the function table, constants and helpers into the engine.
    fn init(&mut self) -> ScriptResult<()>;

    /// Evaluate a script for its side effects.
    fn execute_script(&mut self, code: &str) -> ScriptResult<()>;

    fn shutdown(&mut self);
}
