//! # rayscript
//!
//! raylib bindings for QuickJS scripts.
//!
//! Scripts call raylib through a fixed function table. Every native struct a
//! script receives lives in a typed handle table; the script only holds a
//! reference that the bridge validates on each call.
//!
//! ## Architecture
//!
//! - **Backend**: the [`raylib::Raylib`] trait, implemented by the in-process
//!   [`raylib::HeadlessRaylib`] and, with the `native` feature, by the system
//!   raylib library
//! - **Bridge**: argument decoding, dispatch and result encoding
//!   ([`bridge::Bridge`])
//! - **Bindings**: the QuickJS host adapter ([`bindings::JsBindingAdapter`])
//!
//! ### Example
//!
//! ```ignore
//! use rayscript::bindings::{BindingAdapter, JsBindingAdapter};
//! use rayscript::bridge::Bridge;
//! use rayscript::config::BridgeConfig;
//! use rayscript::raylib::HeadlessRaylib;
//!
//! let config = BridgeConfig::default();
//! let bridge = Bridge::new(HeadlessRaylib::from_config(&config), &config.host);
//! let mut js = JsBindingAdapter::new(bridge, &config.host)?;
//! js.init()?;
//! js.execute_script("rl.initWindow(800, 450, 'hello')")?;
//! ```
//!
//! ## Modules
//!
//! - [`core`]: errors, macros and logging
//! - [`config`]: configuration
//! - [`raylib`]: native library interface and backends
//! - [`bridge`]: handle table and function table
//! - [`bindings`]: script host adapters

/// Errors, macros and logging setup
pub mod core;
/// Configuration system
pub mod config;
/// raylib interface, types, constants and backends
pub mod raylib;
/// Native handle marshaling bridge
pub mod bridge;
/// Script host bindings
pub mod bindings;
