//! JavaScript binding adapter using rquickjs
//!
//! Every entry of the bridge's function table becomes a method of one global
//! object (`rl` by default) together with the raylib constants and the named
//! color palette. Handles cross into JavaScript as instances of the opaque
//! `RaylibHandle` class. When QuickJS frees one, its id goes onto the bridge's
//! [`ReleaseQueue`] and the cell is dropped before the next call, so scripts
//! that never call `releaseHandle` do not exhaust the table. Plain objects are
//! never read as handles.

use super::BindingAdapter;
use crate::bridge::{Bridge, HandleRef, ReleaseQueue, ScriptValue};
use crate::config::HostConfig;
use crate::core::error::{ScriptError, ScriptResult};
use crate::raylib::{consts, Raylib};
use rquickjs::class::{Trace, Tracer};
use rquickjs::function::Rest;
use rquickjs::{Array, Class, Context, Ctx, Exception, Function, Object, Runtime, Type, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Nesting limit when converting arrays and objects.
const MAX_DEPTH: usize = 32;

/// Script-side owner of one handle cell.
#[rquickjs::class(rename = "RaylibHandle")]
pub struct JsHandle {
    handle: HandleRef,
    releases: ReleaseQueue,
}

// holds no JavaScript values
impl<'js> Trace<'js> for JsHandle {
    fn trace<'a>(&self, _tracer: Tracer<'a, 'js>) {}
}

impl JsHandle {
    pub fn handle(&self) -> HandleRef {
        self.handle
    }
}

impl Drop for JsHandle {
    fn drop(&mut self) {
        self.releases.push(self.handle.id);
    }
}

pub struct JsBindingAdapter<R: Raylib + 'static> {
    runtime: Runtime,
    context: Context,
    bridge: Rc<RefCell<Bridge<R>>>,
    global_name: String,
    initialized: bool,
}

impl<R: Raylib + 'static> JsBindingAdapter<R> {
    pub fn new(bridge: Bridge<R>, config: &HostConfig) -> ScriptResult<Self> {
        let runtime = Runtime::new().map_err(|e| ScriptError::Runtime(e.to_string()))?;
        let context = Context::full(&runtime).map_err(|e| ScriptError::Runtime(e.to_string()))?;

        Ok(Self {
            runtime,
            context,
            bridge: Rc::new(RefCell::new(bridge)),
            global_name: config.global_name.clone(),
            initialized: false,
        })
    }

    /// Shared bridge, e.g. for inspecting the backend after a script ran.
    pub fn bridge(&self) -> Rc<RefCell<Bridge<R>>> {
        Rc::clone(&self.bridge)
    }

    pub fn with_bridge<T>(&self, f: impl FnOnce(&mut Bridge<R>) -> T) -> T {
        f(&mut self.bridge.borrow_mut())
    }

    pub fn global_name(&self) -> &str {
        &self.global_name
    }

    /// Evaluate a script and convert its completion value.
    pub fn evaluate(&self, code: &str) -> ScriptResult<ScriptValue> {
        self.context.with(|ctx| {
            let value: Value = ctx.eval(code).map_err(|e| caught(&ctx, e))?;
            to_script(&value, 0).map_err(|e| caught(&ctx, e))
        })
    }

    /// Run the QuickJS collector and drop the cells of every freed handle object.
    pub fn collect_garbage(&self) -> usize {
        self.runtime.run_gc();
        self.bridge
            .try_borrow_mut()
            .map_or(0, |mut bridge| bridge.collect_released())
    }

    fn bind_raylib_api(&self) -> ScriptResult<usize> {
        self.context.with(|ctx| {
            let installed = install(&ctx, &self.bridge, &self.global_name).map_err(|e| caught(&ctx, e))?;
            install_console(&ctx).map_err(|e| caught(&ctx, e))?;
            Ok(installed)
        })
    }
}

impl<R: Raylib + 'static> BindingAdapter for JsBindingAdapter<R> {
    fn init(&mut self) -> ScriptResult<()> {
        if self.initialized {
            return Ok(());
        }
        let functions = self.bind_raylib_api()?;
        self.initialized = true;
        tracing::info!(
            target: "bindings",
            global = %self.global_name,
            functions,
            constants = consts::ALL.len(),
            colors = consts::COLORS.len(),
            "JavaScript bindings installed"
        );
        Ok(())
    }

    fn execute_script(&mut self, code: &str) -> ScriptResult<()> {
        self.context
            .with(|ctx| ctx.eval::<(), _>(code).map_err(|e| caught(&ctx, e)))
    }

    fn shutdown(&mut self) {
        let collected = self.collect_garbage();
        let handles = self.bridge.borrow().handles().len();
        tracing::info!(target: "bindings", collected, handles, "JavaScript runtime shut down");
    }
}

/// Build the global object: functions, constants and palette colors.
fn install<'js, R: Raylib + 'static>(
    ctx: &Ctx<'js>,
    bridge: &Rc<RefCell<Bridge<R>>>,
    global_name: &str,
) -> rquickjs::Result<usize> {
    let rl = Object::new(ctx.clone())?;
    let releases = bridge.borrow().release_queue();

    let names: Vec<&'static str> = bridge.borrow().functions().iter().map(|e| e.name).collect();
    for name in &names {
        let name: &'static str = name;
        let shared = Rc::clone(bridge);
        let releases = releases.clone();
        let func = Function::new(ctx.clone(), move |ctx: Ctx<'js>, args: Rest<Value<'js>>| {
            call(&ctx, &shared, &releases, name, &args.0)
        })?;
        rl.set(name, func)?;
    }

    for (name, value) in consts::ALL {
        rl.set(*name, *value)?;
    }
    for (name, color) in consts::COLORS {
        let handle = bridge
            .borrow_mut()
            .wrap(*color)
            .map_err(|e| Exception::throw_message(ctx, &e.to_string()))?;
        rl.set(*name, from_script(ctx, handle, &releases)?)?;
    }

    ctx.globals().set(global_name, rl)?;
    Ok(names.len())
}

fn call<'js, R: Raylib>(
    ctx: &Ctx<'js>,
    bridge: &RefCell<Bridge<R>>,
    releases: &ReleaseQueue,
    name: &str,
    args: &[Value<'js>],
) -> rquickjs::Result<Value<'js>> {
    let args = args
        .iter()
        .map(|v| to_script(v, 0))
        .collect::<rquickjs::Result<Vec<_>>>()?;

    let result = bridge
        .try_borrow_mut()
        .map_err(|_| Exception::throw_message(ctx, &format!("{}: bridge is busy", name)))?
        .call(name, &args);

    match result {
        Ok(value) => from_script(ctx, value, releases),
        Err(err) => Err(Exception::throw_message(ctx, &err.to_string())),
    }
}

fn install_console<'js>(ctx: &Ctx<'js>) -> rquickjs::Result<()> {
    let console = Object::new(ctx.clone())?;
    console.set(
        "log",
        Function::new(ctx.clone(), |args: Rest<Value<'js>>| {
            tracing::info!(target: "script.console", "{}", console_line(&args.0));
        })?,
    )?;
    console.set(
        "warn",
        Function::new(ctx.clone(), |args: Rest<Value<'js>>| {
            tracing::warn!(target: "script.console", "{}", console_line(&args.0));
        })?,
    )?;
    console.set(
        "error",
        Function::new(ctx.clone(), |args: Rest<Value<'js>>| {
            tracing::error!(target: "script.console", "{}", console_line(&args.0));
        })?,
    )?;
    ctx.globals().set("console", console)?;
    Ok(())
}

fn console_line(args: &[Value<'_>]) -> String {
    args.iter()
        .map(|v| to_script(v, 0).map_or_else(|e| e.to_string(), |v| display(&v)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// String form used by `console.*`.
fn display(value: &ScriptValue) -> String {
    match value {
        ScriptValue::Undefined => "undefined".to_string(),
        ScriptValue::Null => "null".to_string(),
        ScriptValue::Bool(b) => b.to_string(),
        ScriptValue::Int(i) => i.to_string(),
        ScriptValue::Float(f) if f.is_nan() => "NaN".to_string(),
        ScriptValue::Float(f) => f.to_string(),
        ScriptValue::String(s) => s.clone(),
        ScriptValue::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(","),
        ScriptValue::Object(_) => "[object Object]".to_string(),
        ScriptValue::Handle(handle) => format!("[{} {}]", handle.tag, handle.id),
    }
}

/// Describe a failed evaluation, taking the pending exception if there is one.
fn caught(ctx: &Ctx<'_>, err: rquickjs::Error) -> ScriptError {
    if !matches!(err, rquickjs::Error::Exception) {
        return ScriptError::Runtime(err.to_string());
    }
    let value = ctx.catch();
    let message = match value.as_exception() {
        Some(exception) => exception
            .message()
            .unwrap_or_else(|| "uncaught exception".to_string()),
        None => to_script(&value, 0).map_or_else(|e| e.to_string(), |v| display(&v)),
    };
    ScriptError::Exception(message)
}

// ---- value conversion ----

pub fn to_script(value: &Value<'_>, depth: usize) -> rquickjs::Result<ScriptValue> {
    if depth > MAX_DEPTH {
        return Ok(ScriptValue::Undefined);
    }
    let converted = match value.type_of() {
        Type::Uninitialized | Type::Undefined => ScriptValue::Undefined,
        Type::Null => ScriptValue::Null,
        Type::Bool => ScriptValue::Bool(value.as_bool().unwrap_or(false)),
        Type::Int => ScriptValue::Int(value.as_int().map_or(0, i64::from)),
        Type::Float => ScriptValue::Float(value.as_float().unwrap_or(f64::NAN)),
        Type::String => match value.as_string() {
            Some(s) => ScriptValue::String(s.to_string()?),
            None => ScriptValue::Undefined,
        },
        Type::Array => match value.as_array() {
            Some(array) => ScriptValue::Array(
                array
                    .iter::<Value>()
                    .map(|item| item.and_then(|item| to_script(&item, depth + 1)))
                    .collect::<rquickjs::Result<_>>()?,
            ),
            None => ScriptValue::Array(Vec::new()),
        },
        Type::Object => match value.as_object() {
            Some(object) => object_to_script(object, depth)?,
            None => ScriptValue::Object(HashMap::new()),
        },
        // functions, symbols and the like have no numeric or string reading
        _ => ScriptValue::Object(HashMap::new()),
    };
    Ok(converted)
}

fn object_to_script(object: &Object<'_>, depth: usize) -> rquickjs::Result<ScriptValue> {
    if let Some(owner) = Class::<JsHandle>::from_object(object.clone()) {
        return Ok(ScriptValue::Handle(owner.borrow().handle()));
    }
    let mut fields = HashMap::new();
    for prop in object.props::<String, Value>() {
        let (key, value) = prop?;
        fields.insert(key, to_script(&value, depth + 1)?);
    }
    Ok(ScriptValue::Object(fields))
}

pub fn from_script<'js>(
    ctx: &Ctx<'js>,
    value: ScriptValue,
    releases: &ReleaseQueue,
) -> rquickjs::Result<Value<'js>> {
    let converted = match value {
        ScriptValue::Undefined => Value::new_undefined(ctx.clone()),
        ScriptValue::Null => Value::new_null(ctx.clone()),
        ScriptValue::Bool(b) => Value::new_bool(ctx.clone(), b),
        ScriptValue::Int(i) => match i32::try_from(i) {
            Ok(i) => Value::new_int(ctx.clone(), i),
            Err(_) => Value::new_float(ctx.clone(), i as f64),
        },
        ScriptValue::Float(f) => Value::new_float(ctx.clone(), f),
        ScriptValue::String(s) => rquickjs::String::from_str(ctx.clone(), &s)?.into_value(),
        ScriptValue::Array(items) => {
            let array = Array::new(ctx.clone())?;
            for (i, item) in items.into_iter().enumerate() {
                array.set(i, from_script(ctx, item, releases)?)?;
            }
            array.into_value()
        }
        ScriptValue::Object(fields) => {
            let object = Object::new(ctx.clone())?;
            for (key, item) in fields {
                object.set(key, from_script(ctx, item, releases)?)?;
            }
            object.into_value()
        }
        ScriptValue::Handle(handle) => Class::instance(
            ctx.clone(),
            JsHandle {
                handle,
                releases: releases.clone(),
            },
        )?
        .into_value(),
    };
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raylib::HeadlessRaylib;

    fn adapter() -> JsBindingAdapter<HeadlessRaylib> {
        let config = HostConfig::default();
        let bridge = Bridge::new(HeadlessRaylib::new(), &config);
        let mut adapter = JsBindingAdapter::new(bridge, &config).unwrap();
        adapter.init().unwrap();
        adapter
    }

    #[test]
    fn test_constants_installed() {
        let adapter = adapter();
        assert_eq!(adapter.evaluate("rl.KEY_SPACE").unwrap(), ScriptValue::Int(32));
        assert_eq!(
            adapter.evaluate("rl.typeOf(rl.RAYWHITE)").unwrap(),
            ScriptValue::from("Color")
        );
    }

    #[test]
    fn test_bridge_error_becomes_exception() {
        let adapter = adapter();
        let caught = adapter
            .evaluate("try { rl.initWindow('wide', 600, 'x'); 'no' } catch (e) { e.message }")
            .unwrap();
        let message = caught.as_str().unwrap().to_string();
        assert!(message.contains("initWindow"), "{}", message);
        adapter.with_bridge(|b| assert_eq!(b.backend().calls_to("InitWindow"), 0));
    }

    #[test]
    fn test_uncaught_exception_is_reported() {
        let mut adapter = adapter();
        let err = adapter.execute_script("rl.noSuchFunction()").unwrap_err();
        assert!(matches!(err, ScriptError::Exception(_)));
    }

    #[test]
    fn test_plain_objects_are_not_handles() {
        let adapter = adapter();
        let message = adapter
            .evaluate(
                "const p = rl.Vector2(1, 2);
                 const copy = Object.assign({}, p);
                 try { rl.typeOf(copy); 'accepted' } catch (e) { e.message }",
            )
            .unwrap();
        assert!(message.as_str().unwrap().contains("typeOf"), "{:?}", message);
        assert_eq!(adapter.evaluate("rl.typeOf(p)").unwrap(), ScriptValue::from("Vector2"));
    }

    #[test]
    fn test_collected_objects_release_cells() {
        let adapter = adapter();
        let palette = adapter.with_bridge(|b| b.handles().len());
        adapter
            .evaluate("for (let i = 0; i < 50; i++) { rl.Vector2(i, i); } globalThis.kept = rl.Vector2(7, 7);")
            .unwrap();
        adapter.collect_garbage();
        adapter.with_bridge(|b| assert_eq!(b.handles().len(), palette + 1));
        assert_eq!(adapter.evaluate("rl.getField(kept, 'x')").unwrap().to_number(), Some(7.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&ScriptValue::Float(2.0)), "2");
        assert_eq!(
            display(&ScriptValue::Array(vec![ScriptValue::Int(1), ScriptValue::Null])),
            "1,null"
        );
    }
}
