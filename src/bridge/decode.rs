//! Argument decoding and result encoding for a single call.
//!
//! Shims decode every argument into locals first, then reach the native
//! library through [`CallContext::rl`]. The borrow of the backend only starts
//! once decoding is over, so a failing argument never reaches native code.

use super::handle::{HandleId, HandleTable, Marshal, NativeValue, TypeTag};
use super::value::{HandleRef, ScriptValue};
use crate::core::error::{ArgError, ArgResult, BridgeError, BridgeResult, HandleError};
use crate::raylib::{Color, Raylib};

pub struct CallContext<'a, R: Raylib> {
    function: &'static str,
    args: &'a [ScriptValue],
    rl: &'a mut R,
    handles: &'a mut HandleTable,
}

impl<'a, R: Raylib> CallContext<'a, R> {
    pub fn new(
        function: &'static str,
        args: &'a [ScriptValue],
        rl: &'a mut R,
        handles: &'a mut HandleTable,
    ) -> Self {
        Self {
            function,
            args,
            rl,
            handles,
        }
    }

    pub fn function(&self) -> &'static str {
        self.function
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// The native library. Only call this after every argument is decoded.
    pub fn rl(&mut self) -> &mut R {
        &mut *self.rl
    }

    pub fn handles(&self) -> &HandleTable {
        &*self.handles
    }

    /// Argument error for checks a shim makes itself.
    pub fn fail(&self, index: usize, source: ArgError) -> BridgeError {
        BridgeError::Argument {
            function: self.function,
            index,
            source,
        }
    }

    fn at<T>(&self, index: usize, result: ArgResult<T>) -> BridgeResult<T> {
        result.map_err(|source| self.fail(index, source))
    }

    fn raw(&self, index: usize) -> ArgResult<&'a ScriptValue> {
        self.args.get(index).ok_or(ArgError::Missing)
    }

    // ---- primitives ----

    pub fn int(&self, index: usize) -> BridgeResult<i32> {
        self.at(index, self.raw(index).and_then(int_of))
    }

    pub fn uint(&self, index: usize) -> BridgeResult<u32> {
        self.at(
            index,
            self.raw(index)
                .and_then(|v| v.to_uint32().ok_or(ArgError::NotNumeric(v.type_name()))),
        )
    }

    pub fn float(&self, index: usize) -> BridgeResult<f64> {
        self.at(index, self.raw(index).and_then(number_of))
    }

    pub fn f32(&self, index: usize) -> BridgeResult<f32> {
        self.float(index).map(|f| f as f32)
    }

    /// Count arguments; negative counts read as zero.
    pub fn count(&self, index: usize) -> BridgeResult<usize> {
        self.int(index).map(|n| usize::try_from(n).unwrap_or(0))
    }

    pub fn string(&self, index: usize) -> BridgeResult<&'a str> {
        self.at(
            index,
            self.raw(index)
                .and_then(|v| v.as_str().ok_or(ArgError::NotString(v.type_name()))),
        )
    }

    /// `null`, `undefined` or missing.
    pub fn is_nullish(&self, index: usize) -> bool {
        self.args.get(index).map_or(true, ScriptValue::is_nullish)
    }

    /// ToBoolean; a missing argument is false.
    pub fn truthy(&self, index: usize) -> bool {
        self.args.get(index).is_some_and(ScriptValue::truthy)
    }

    // ---- handles ----

    fn handle_value<T: Marshal>(&self, value: &ScriptValue) -> ArgResult<T> {
        match value {
            ScriptValue::Handle(handle) => Ok(self.handles.get::<T>(handle.id)?),
            v if v.is_nullish() => Err(ArgError::Null(T::TAG)),
            v => Err(ArgError::NotHandle {
                expected: T::TAG,
                found: v.type_name(),
            }),
        }
    }

    /// A handle of type `T`, live and not closed.
    pub fn arg<T: Marshal>(&self, index: usize) -> BridgeResult<T> {
        self.at(index, self.raw(index).and_then(|v| self.handle_value::<T>(v)))
    }

    /// Any handle, regardless of tag or closed state.
    pub fn handle_id(&self, index: usize) -> BridgeResult<HandleId> {
        let result = self.raw(index).and_then(|v| match v {
            ScriptValue::Handle(handle) => {
                self.handles.tag(handle.id)?;
                Ok(handle.id)
            }
            v => Err(ArgError::NotAnyHandle(v.type_name())),
        });
        self.at(index, result)
    }

    /// Any live, open handle together with its value.
    pub fn native(&self, index: usize) -> BridgeResult<(HandleId, NativeValue)> {
        let id = self.handle_id(index)?;
        let value = self.handles.value(id).map_err(ArgError::from);
        self.at(index, value).map(|value| (id, *value))
    }

    /// A live, open handle whose tag must be `tag`.
    pub fn native_arg(&self, index: usize, tag: TypeTag) -> BridgeResult<NativeValue> {
        let result = self.raw(index).and_then(|v| match v {
            ScriptValue::Handle(handle) => {
                let value = *self.handles.value(handle.id)?;
                if value.tag() != tag {
                    return Err(HandleError::TypeMismatch {
                        expected: tag,
                        found: value.tag(),
                    }
                    .into());
                }
                Ok(value)
            }
            v if v.is_nullish() => Err(ArgError::Null(tag)),
            v => Err(ArgError::NotHandle {
                expected: tag,
                found: v.type_name(),
            }),
        });
        self.at(index, result)
    }

    /// Mutable access to a cell already checked by [`native`](Self::native).
    pub fn native_mut(&mut self, index: usize, id: HandleId) -> BridgeResult<&mut NativeValue> {
        let function = self.function;
        self.handles
            .value_mut(id)
            .map_err(|e| BridgeError::Argument {
                function,
                index,
                source: e.into(),
            })
    }

    /// Color argument that also takes a packed `0xRRGGBBAA` number.
    pub fn color(&self, index: usize) -> BridgeResult<Color> {
        let result = self.raw(index).and_then(|v| match v {
            ScriptValue::Handle(_) => self.handle_value::<Color>(v),
            ScriptValue::Int(_) | ScriptValue::Float(_) => v
                .to_uint32()
                .map(Color::from_hex)
                .ok_or(ArgError::NotColor(v.type_name())),
            v if v.is_nullish() => Err(ArgError::Null(TypeTag::Color)),
            v => Err(ArgError::NotColor(v.type_name())),
        });
        self.at(index, result)
    }

    // ---- sequences ----

    fn elements(&self, index: usize, count: Option<usize>) -> ArgResult<&'a [ScriptValue]> {
        let value = self.raw(index)?;
        let items = value
            .as_array()
            .ok_or(ArgError::NotArray(value.type_name()))?;
        match count {
            Some(n) if n > items.len() => Err(ArgError::TooShort {
                expected: n,
                found: items.len(),
            }),
            Some(n) => Ok(&items[..n]),
            None => Ok(items),
        }
    }

    fn each<T>(
        &self,
        index: usize,
        count: Option<usize>,
        decode: impl Fn(&ScriptValue) -> ArgResult<T>,
    ) -> BridgeResult<Vec<T>> {
        let result = self.elements(index, count).and_then(|items| {
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    decode(item).map_err(|e| ArgError::Element {
                        index: i,
                        source: Box::new(e),
                    })
                })
                .collect()
        });
        self.at(index, result)
    }

    /// Array of `T` handles, every element decoded before returning.
    pub fn list<T: Marshal>(&self, index: usize) -> BridgeResult<Vec<T>> {
        self.each(index, None, |v| self.handle_value::<T>(v))
    }

    /// The first `count` elements of an array of `T` handles.
    pub fn list_n<T: Marshal>(&self, index: usize, count: usize) -> BridgeResult<Vec<T>> {
        self.each(index, Some(count), |v| self.handle_value::<T>(v))
    }

    pub fn int_list(&self, index: usize, count: Option<usize>) -> BridgeResult<Vec<i32>> {
        self.each(index, count, int_of)
    }

    /// Array of numbers narrowed to bytes (modulo 256).
    pub fn byte_list(&self, index: usize) -> BridgeResult<Vec<u8>> {
        self.each(index, None, |v| {
            v.to_uint32()
                .map(|n| n as u8)
                .ok_or(ArgError::NotNumeric(v.type_name()))
        })
    }

    // ---- native access ----

    /// Hand a handle's value to native code by reference, writing back any change.
    pub fn with_arg_mut<T: Marshal>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut R, &mut T),
    ) -> BridgeResult<()> {
        let function = self.function;
        let id = match self.raw(index) {
            Ok(ScriptValue::Handle(handle)) => handle.id,
            Ok(v) if v.is_nullish() => return Err(self.fail(index, ArgError::Null(T::TAG))),
            Ok(v) => {
                return Err(self.fail(
                    index,
                    ArgError::NotHandle {
                        expected: T::TAG,
                        found: v.type_name(),
                    },
                ))
            }
            Err(e) => return Err(self.fail(index, e)),
        };
        let value = self
            .handles
            .get_mut::<T>(id)
            .map_err(|e| BridgeError::Argument {
                function,
                index,
                source: e.into(),
            })?;
        f(&mut *self.rl, value);
        Ok(())
    }

    /// Native teardown of a resource handle.
    ///
    /// The closed flag is not checked, so a second unload reaches `teardown`
    /// again. The cell is marked closed afterwards and stays in the table.
    pub fn unload<T: Marshal>(
        &mut self,
        index: usize,
        teardown: impl FnOnce(&mut R, T),
    ) -> BridgeResult<ScriptValue> {
        let decoded = self.raw(index).and_then(|v| match v {
            ScriptValue::Handle(handle) => Ok((handle.id, self.handles.get_for_unload::<T>(handle.id)?)),
            v if v.is_nullish() => Err(ArgError::Null(T::TAG)),
            v => Err(ArgError::NotHandle {
                expected: T::TAG,
                found: v.type_name(),
            }),
        });
        let (id, value) = self.at(index, decoded)?;

        teardown(&mut *self.rl, value);
        self.handles.close(id).map_err(|e| BridgeError::Argument {
            function: self.function,
            index,
            source: e.into(),
        })?;
        tracing::trace!(target: "bridge", handle = %id, tag = %T::TAG, "Closed handle");
        Ok(ScriptValue::Undefined)
    }

    // ---- results ----

    /// Wrap a native struct in a new handle.
    ///
    /// When the table is full a resource-owning value is torn down before the
    /// error is returned.
    pub fn wrap<T: Marshal>(&mut self, value: T) -> BridgeResult<ScriptValue> {
        let native = value.into_native();
        match self.handles.insert(native) {
            Ok(id) => Ok(ScriptValue::Handle(HandleRef { id, tag: T::TAG })),
            Err(source) => {
                if native.release(&mut *self.rl) {
                    tracing::warn!(
                        target: "bridge",
                        function = self.function,
                        tag = %T::TAG,
                        "Handle table full, native resource released"
                    );
                }
                Err(BridgeError::Allocation {
                    function: self.function,
                    source,
                })
            }
        }
    }

    /// Wrap a copy of a value another cell still owns (e.g. a font's atlas
    /// texture). Nothing is torn down on failure.
    pub fn wrap_view<T: Marshal>(&mut self, value: T) -> BridgeResult<ScriptValue> {
        self.handles
            .insert(value.into_native())
            .map(|id| ScriptValue::Handle(HandleRef { id, tag: T::TAG }))
            .map_err(|source| BridgeError::Allocation {
                function: self.function,
                source,
            })
    }

    /// Drop the cell behind a handle already checked by [`handle_id`](Self::handle_id).
    pub fn release(&mut self, index: usize, id: HandleId) -> BridgeResult<NativeValue> {
        let function = self.function;
        self.handles.release(id).map_err(|e| BridgeError::Argument {
            function,
            index,
            source: e.into(),
        })
    }

    /// Wrap every element; on failure no handle from this call survives.
    pub fn wrap_all<T: Marshal>(&mut self, values: Vec<T>) -> BridgeResult<ScriptValue> {
        let mut wrapped = Vec::with_capacity(values.len());
        for value in &values {
            match self.handles.insert(value.into_native()) {
                Ok(id) => wrapped.push(id),
                Err(source) => {
                    for id in wrapped {
                        let _ = self.handles.release(id);
                    }
                    let released = values
                        .iter()
                        .filter(|v| v.into_native().release(&mut *self.rl))
                        .count();
                    tracing::warn!(
                        target: "bridge",
                        function = self.function,
                        tag = %T::TAG,
                        released,
                        "Handle table full, partial result discarded"
                    );
                    return Err(BridgeError::Allocation {
                        function: self.function,
                        source,
                    });
                }
            }
        }
        Ok(ScriptValue::Array(
            wrapped
                .into_iter()
                .map(|id| ScriptValue::Handle(HandleRef { id, tag: T::TAG }))
                .collect(),
        ))
    }
}

fn number_of(value: &ScriptValue) -> ArgResult<f64> {
    value
        .to_number()
        .ok_or(ArgError::NotNumeric(value.type_name()))
}

fn int_of(value: &ScriptValue) -> ArgResult<i32> {
    value
        .to_int32()
        .ok_or(ArgError::NotNumeric(value.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raylib::{HeadlessRaylib, Image, Vector2};

    fn handle(table: &mut HandleTable, value: NativeValue) -> ScriptValue {
        let tag = value.tag();
        let id = table.insert(value).unwrap();
        ScriptValue::Handle(HandleRef { id, tag })
    }

    #[test]
    fn test_primitive_decoding() {
        let mut rl = HeadlessRaylib::new();
        let mut table = HandleTable::new(16);
        let args = vec![
            ScriptValue::Float(3.7),
            ScriptValue::from("12"),
            ScriptValue::Bool(true),
            ScriptValue::from("title"),
        ];
        let cx = CallContext::new("test", &args, &mut rl, &mut table);
        assert_eq!(cx.int(0).unwrap(), 3);
        assert_eq!(cx.int(1).unwrap(), 12);
        assert_eq!(cx.int(2).unwrap(), 1);
        assert_eq!(cx.string(3).unwrap(), "title");
        assert!(cx.string(0).is_err());
        assert!(cx.int(3).is_err());
        assert!(matches!(
            cx.int(9),
            Err(BridgeError::Argument { index: 9, source: ArgError::Missing, .. })
        ));
        assert!(cx.truthy(2));
        assert!(!cx.truthy(9));
    }

    #[test]
    fn test_color_polymorphism() {
        let mut rl = HeadlessRaylib::new();
        let mut table = HandleTable::new(16);
        let color = handle(&mut table, Color::new(1, 2, 3, 4).into_native());
        let args = vec![
            ScriptValue::Int(0xFF00_00FF),
            color,
            ScriptValue::Null,
            ScriptValue::from("red"),
        ];
        let cx = CallContext::new("clearBackground", &args, &mut rl, &mut table);
        assert_eq!(cx.color(0).unwrap(), Color::new(255, 0, 0, 255));
        assert_eq!(cx.color(1).unwrap(), Color::new(1, 2, 3, 4));
        assert!(cx.color(2).is_err());
        assert!(cx.color(3).is_err());
    }

    #[test]
    fn test_list_reports_element_index() {
        let mut rl = HeadlessRaylib::new();
        let mut table = HandleTable::new(16);
        let p = handle(&mut table, Vector2::ONE.into_native());
        let args = vec![ScriptValue::Array(vec![p.clone(), p.clone(), ScriptValue::Int(7)])];
        let cx = CallContext::new("drawLineStrip", &args, &mut rl, &mut table);
        match cx.list::<Vector2>(0) {
            Err(BridgeError::Argument {
                index: 0,
                source: ArgError::Element { index: 2, .. },
                ..
            }) => {}
            other => panic!("unexpected: {:?}", other),
        }

        let args = vec![ScriptValue::Array(vec![ScriptValue::Int(1), ScriptValue::Int(2)])];
        let cx = CallContext::new("loadFontEx", &args, &mut rl, &mut table);
        assert_eq!(cx.int_list(0, Some(1)).unwrap(), vec![1]);
        assert!(matches!(
            cx.int_list(0, Some(3)),
            Err(BridgeError::Argument { source: ArgError::TooShort { expected: 3, found: 2 }, .. })
        ));
    }

    #[test]
    fn test_wrap_releases_resource_when_full() {
        let mut rl = HeadlessRaylib::new();
        let mut table = HandleTable::new(0);
        let args = vec![];
        let mut cx = CallContext::new("genImageColor", &args, &mut rl, &mut table);
        let image = Image {
            data: crate::raylib::DataPtr(1),
            width: 1,
            height: 1,
            mipmaps: 1,
            format: 7,
        };
        assert!(matches!(cx.wrap(image), Err(BridgeError::Allocation { .. })));
        assert!(matches!(cx.wrap(Vector2::ZERO), Err(BridgeError::Allocation { .. })));
        assert_eq!(rl.calls_to("UnloadImage"), 1);
    }

    #[test]
    fn test_unload_ignores_closed_flag() {
        let mut rl = HeadlessRaylib::new();
        let mut table = HandleTable::new(4);
        let image = handle(&mut table, Image::default().into_native());
        let args = vec![image];
        for _ in 0..2 {
            let mut cx = CallContext::new("unloadImage", &args, &mut rl, &mut table);
            cx.unload::<Image>(0, |rl, image| rl.unload_image(image)).unwrap();
        }
        assert_eq!(rl.calls_to("UnloadImage"), 2);

        let cx = CallContext::new("exportImage", &args, &mut rl, &mut table);
        assert!(matches!(
            cx.arg::<Image>(0).map_err(|e| e.kind()),
            Err(crate::core::error::ErrorKind::Handle)
        ));
    }
}
