//! Typed handle arena.
//!
//! Every native struct handed to a script lives in one [`HandleTable`] cell
//! together with its [`TypeTag`]. Scripts only ever see a [`HandleId`]; the
//! bridge confirms the tag before reading a cell.

use crate::core::error::{HandleError, HandleResult};
use crate::raylib::{
    Camera2D, Camera3D, CharInfo, Color, Font, Image, Matrix, Ray, Raylib, Rectangle,
    RenderTexture2D, Texture2D, Vector2, Vector3, Vector4,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A native value type that can be stored in a handle cell.
pub trait Marshal: Copy + 'static {
    const TAG: TypeTag;

    fn from_native(value: &NativeValue) -> Option<&Self>;
    fn from_native_mut(value: &mut NativeValue) -> Option<&mut Self>;
    fn into_native(self) -> NativeValue;
}

macro_rules! native_values {
    ($($name:ident => $ty:ty),* $(,)?) => {
        /// Type identifier stored next to every cell value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TypeTag {
            $($name),*
        }

        impl TypeTag {
            pub const ALL: &'static [TypeTag] = &[$(TypeTag::$name),*];

            pub fn name(self) -> &'static str {
                match self {
                    $(TypeTag::$name => stringify!($name)),*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($name) => Some(TypeTag::$name),)*
                    _ => None,
                }
            }
        }

        /// A native struct owned by a handle cell.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum NativeValue {
            $($name($ty)),*
        }

        impl NativeValue {
            pub fn tag(&self) -> TypeTag {
                match self {
                    $(NativeValue::$name(_) => TypeTag::$name),*
                }
            }
        }

        $(
            impl Marshal for $ty {
                const TAG: TypeTag = TypeTag::$name;

                fn from_native(value: &NativeValue) -> Option<&Self> {
                    match value {
                        NativeValue::$name(v) => Some(v),
                        _ => None,
                    }
                }

                fn from_native_mut(value: &mut NativeValue) -> Option<&mut Self> {
                    match value {
                        NativeValue::$name(v) => Some(v),
                        _ => None,
                    }
                }

                fn into_native(self) -> NativeValue {
                    NativeValue::$name(self)
                }
            }
        )*
    };
}

native_values! {
    Vector2 => Vector2,
    Vector3 => Vector3,
    Vector4 => Vector4,
    Color => Color,
    Rectangle => Rectangle,
    Camera2D => Camera2D,
    Camera3D => Camera3D,
    Ray => Ray,
    Matrix => Matrix,
    Image => Image,
    Texture2D => Texture2D,
    RenderTexture2D => RenderTexture2D,
    Font => Font,
    CharInfo => CharInfo,
}

impl TypeTag {
    /// Whether values of this type hold native memory that needs an unload.
    pub fn owns_resource(self) -> bool {
        matches!(
            self,
            TypeTag::Image
                | TypeTag::Texture2D
                | TypeTag::RenderTexture2D
                | TypeTag::Font
                | TypeTag::CharInfo
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl NativeValue {
    /// Run the native teardown for resource-owning values.
    ///
    /// Returns false for plain values, which have nothing to tear down.
    pub fn release<R: Raylib + ?Sized>(self, rl: &mut R) -> bool {
        match self {
            NativeValue::Image(image) => rl.unload_image(image),
            NativeValue::Texture2D(texture) => rl.unload_texture(texture),
            NativeValue::RenderTexture2D(target) => rl.unload_render_texture(target),
            NativeValue::Font(font) => rl.unload_font(font),
            NativeValue::CharInfo(info) if !info.image.data.is_null() => rl.unload_image(info.image),
            _ => return false,
        }
        true
    }
}

/// Generational index into a [`HandleTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    index: u32,
    generation: u32,
}

impl HandleId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Cell {
    value: NativeValue,
    closed: bool,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    cell: Option<Cell>,
}

/// Arena of native values addressed by [`HandleId`].
#[derive(Debug)]
pub struct HandleTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
    capacity: usize,
}

impl HandleTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store a value in a fresh cell.
    pub fn insert(&mut self, value: NativeValue) -> HandleResult<HandleId> {
        if self.len >= self.capacity {
            return Err(HandleError::Exhausted(self.len));
        }

        let cell = Cell { value, closed: false };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].cell = Some(cell);
                index
            }
            None => {
                let index = u32::try_from(self.slots.len())
                    .map_err(|_| HandleError::Exhausted(self.len))?;
                self.slots.push(Slot { generation: 0, cell: Some(cell) });
                index
            }
        };
        self.len += 1;

        Ok(HandleId {
            index,
            generation: self.slots[index as usize].generation,
        })
    }

    fn cell(&self, id: HandleId) -> HandleResult<&Cell> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.cell.as_ref())
            .ok_or(HandleError::Stale(id))
    }

    fn cell_mut(&mut self, id: HandleId) -> HandleResult<&mut Cell> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.cell.as_mut())
            .ok_or(HandleError::Stale(id))
    }

    /// Tag of a cell, closed or not.
    pub fn tag(&self, id: HandleId) -> HandleResult<TypeTag> {
        self.cell(id).map(|cell| cell.value.tag())
    }

    pub fn is_closed(&self, id: HandleId) -> HandleResult<bool> {
        self.cell(id).map(|cell| cell.closed)
    }

    /// Value of a live, open cell.
    pub fn value(&self, id: HandleId) -> HandleResult<&NativeValue> {
        let cell = self.cell(id)?;
        if cell.closed {
            return Err(HandleError::Closed(cell.value.tag()));
        }
        Ok(&cell.value)
    }

    pub fn value_mut(&mut self, id: HandleId) -> HandleResult<&mut NativeValue> {
        let cell = self.cell_mut(id)?;
        if cell.closed {
            return Err(HandleError::Closed(cell.value.tag()));
        }
        Ok(&mut cell.value)
    }

    /// Copy a typed value out of a live, open cell.
    pub fn get<T: Marshal>(&self, id: HandleId) -> HandleResult<T> {
        let cell = self.cell(id)?;
        let value = T::from_native(&cell.value).ok_or(HandleError::TypeMismatch {
            expected: T::TAG,
            found: cell.value.tag(),
        })?;
        if cell.closed {
            return Err(HandleError::Closed(T::TAG));
        }
        Ok(*value)
    }

    pub fn get_mut<T: Marshal>(&mut self, id: HandleId) -> HandleResult<&mut T> {
        let cell = self.cell_mut(id)?;
        let found = cell.value.tag();
        if cell.closed && T::from_native(&cell.value).is_some() {
            return Err(HandleError::Closed(T::TAG));
        }
        T::from_native_mut(&mut cell.value).ok_or(HandleError::TypeMismatch {
            expected: T::TAG,
            found,
        })
    }

    /// Like [`get`](Self::get) but ignores the closed flag, so unloading twice
    /// reaches the native teardown twice.
    pub fn get_for_unload<T: Marshal>(&self, id: HandleId) -> HandleResult<T> {
        let cell = self.cell(id)?;
        T::from_native(&cell.value)
            .copied()
            .ok_or(HandleError::TypeMismatch {
                expected: T::TAG,
                found: cell.value.tag(),
            })
    }

    /// Mark a cell as natively torn down.
    pub fn close(&mut self, id: HandleId) -> HandleResult<()> {
        self.cell_mut(id)?.closed = true;
        Ok(())
    }

    /// Drop a cell. Its id becomes stale.
    pub fn release(&mut self, id: HandleId) -> HandleResult<NativeValue> {
        self.cell(id)?;
        let slot = &mut self.slots[id.index as usize];
        let cell = slot.cell.take().ok_or(HandleError::Stale(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Ok(cell.value)
    }

    /// Live cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = (HandleId, &NativeValue)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.cell.as_ref().map(|cell| {
                (
                    HandleId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    &cell.value,
                )
            })
        })
    }
}

/// Ids whose script-side owner has been collected.
///
/// Script hosts push into the queue from finalizers, which may run while the
/// bridge is borrowed; the bridge drains it before its next call.
#[derive(Debug, Clone, Default)]
pub struct ReleaseQueue(Rc<RefCell<Vec<HandleId>>>);

impl ReleaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, id: HandleId) {
        if let Ok(mut pending) = self.0.try_borrow_mut() {
            pending.push(id);
        }
    }

    pub fn take(&self) -> Vec<HandleId> {
        self.0
            .try_borrow_mut()
            .map(|mut pending| std::mem::take(&mut *pending))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.try_borrow().map_or(0, |pending| pending.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        for tag in TypeTag::ALL {
            assert_eq!(TypeTag::from_name(tag.name()), Some(*tag));
        }
        assert_eq!(TypeTag::from_name("Texture"), None);
        assert_eq!(TypeTag::RenderTexture2D.to_string(), "RenderTexture2D");
        assert!(TypeTag::Font.owns_resource());
        assert!(!TypeTag::Camera3D.owns_resource());
    }

    #[test]
    fn test_insert_and_get() {
        let mut table = HandleTable::new(4);
        let id = table.insert(Vector2::new(1.0, 2.0).into_native()).unwrap();
        assert_eq!(table.get::<Vector2>(id).unwrap(), Vector2::new(1.0, 2.0));
        assert_eq!(table.tag(id).unwrap(), TypeTag::Vector2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_type_mismatch() {
        let mut table = HandleTable::new(4);
        let id = table.insert(Color::new(1, 2, 3, 4).into_native()).unwrap();
        assert_eq!(
            table.get::<Vector2>(id),
            Err(HandleError::TypeMismatch {
                expected: TypeTag::Vector2,
                found: TypeTag::Color,
            })
        );
    }

    #[test]
    fn test_closed_cells() {
        let mut table = HandleTable::new(4);
        let image = Image { width: 2, height: 2, ..Default::default() };
        let id = table.insert(image.into_native()).unwrap();
        table.close(id).unwrap();

        assert_eq!(table.get::<Image>(id), Err(HandleError::Closed(TypeTag::Image)));
        assert!(table.value(id).is_err());
        assert_eq!(table.get_for_unload::<Image>(id).unwrap(), image);
        assert_eq!(table.tag(id).unwrap(), TypeTag::Image);
        // a wrong tag is still a mismatch, even when closed
        assert!(matches!(
            table.get_for_unload::<Font>(id),
            Err(HandleError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_release_makes_id_stale() {
        let mut table = HandleTable::new(4);
        let id = table.insert(Vector3::ONE.into_native()).unwrap();
        table.release(id).unwrap();
        assert_eq!(table.get::<Vector3>(id), Err(HandleError::Stale(id)));
        assert_eq!(table.release(id), Err(HandleError::Stale(id)));

        // the slot is reused under a new generation
        let reused = table.insert(Vector3::ZERO.into_native()).unwrap();
        assert_eq!(reused.index(), id.index());
        assert_ne!(reused.generation(), id.generation());
        assert_eq!(table.get::<Vector3>(id), Err(HandleError::Stale(id)));
        assert!(!table.is_empty());
    }

    #[test]
    fn test_capacity() {
        let mut table = HandleTable::new(2);
        table.insert(Vector2::ZERO.into_native()).unwrap();
        let b = table.insert(Vector2::ZERO.into_native()).unwrap();
        assert_eq!(
            table.insert(Vector2::ZERO.into_native()),
            Err(HandleError::Exhausted(2))
        );
        table.release(b).unwrap();
        assert!(table.insert(Vector2::ZERO.into_native()).is_ok());
    }

    #[test]
    fn test_get_mut() {
        let mut table = HandleTable::new(4);
        let id = table.insert(Rectangle::new(0.0, 0.0, 1.0, 1.0).into_native()).unwrap();
        table.get_mut::<Rectangle>(id).unwrap().width = 5.0;
        assert_eq!(table.get::<Rectangle>(id).unwrap().width, 5.0);
        assert!(table.get_mut::<Ray>(id).is_err());
    }

    #[test]
    fn test_iter_skips_released() {
        let mut table = HandleTable::new(8);
        let a = table.insert(Vector2::ZERO.into_native()).unwrap();
        let b = table.insert(Vector3::ZERO.into_native()).unwrap();
        table.release(a).unwrap();
        let ids: Vec<_> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b]);
    }

    #[test]
    fn test_release_queue_is_shared() {
        let queue = ReleaseQueue::new();
        let finalizer = queue.clone();
        finalizer.push(HandleId::new(3, 1));
        finalizer.push(HandleId::new(4, 0));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.take(), vec![HandleId::new(3, 1), HandleId::new(4, 0)]);
        assert!(queue.is_empty());
    }
}
