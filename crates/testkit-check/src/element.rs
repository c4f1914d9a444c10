//! Element types, and type-erased elements for heterogeneous containers

use std::any::Any;
use std::fmt;

/// Any value that can take part in a container comparison.
///
/// Blanket-implemented for every type with `PartialEq` and `Debug`, borrowed
/// types included, so callers never implement it by hand.
pub trait Item: PartialEq + fmt::Debug {}

impl<T: PartialEq + fmt::Debug + ?Sized> Item for T {}

/// Object-safe view of an owned [`Item`]
trait ErasedItem: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn eq_erased(&self, other: &dyn ErasedItem) -> bool;
}

impl<T: Item + Any> ErasedItem for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_erased(&self, other: &dyn ErasedItem) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// An owned element whose concrete type is hidden
///
/// Two elements are equal when they hold the same concrete type and that
/// type's `PartialEq` says so. Elements of different types are never equal.
/// Only containers put behind [`Erased`](crate::Erased) produce these.
pub struct Element(Box<dyn ErasedItem>);

impl Element {
    /// Wrap a value
    pub fn new<T: Item + Any>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Borrow the payload as `T` if that is its concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_erased(other.0.as_ref())
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// The element type a container declares
///
/// Identified by its full type name. Lifetimes are not part of the name, so
/// `&'a str` and `&'static str` are the same element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementType {
    name: &'static str,
}

impl ElementType {
    pub fn of<T: ?Sized>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
        }
    }

    /// Full type name with module paths
    pub fn full_name(&self) -> &'static str {
        self.name
    }

    /// Short display name, e.g. `String`
    pub fn name(&self) -> String {
        short_type_name(self.name)
    }

    /// True for string types, whose values are shown as quoted literals
    pub fn is_text(&self) -> bool {
        matches!(
            self.name.trim_start_matches('&'),
            "str" | "alloc::string::String" | "alloc::boxed::Box<str>" | "alloc::borrow::Cow<str>"
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Strip module paths from a full type name
///
/// `core::option::Option<alloc::vec::Vec<i32>>` becomes `Option<Vec<i32>>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(c);
        if matches!(
            c,
            '<' | '>' | ',' | ' ' | '[' | ']' | '(' | ')' | '&' | ';' | '*'
        ) {
            segment_start = out.len();
        }
    }

    out
}
