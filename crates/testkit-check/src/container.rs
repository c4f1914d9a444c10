//! Container shapes and the [`Container`] capability

use crate::element::{short_type_name, Element, ElementType, Item};
use crate::extract::{drain, ElementSequence, TryReceive};
use std::any::Any;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::sync::mpsc;
use tokio::sync::{broadcast, mpsc as tokio_mpsc};

/// Runtime shape of a value handed to the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerShape {
    /// Fixed-size array
    FixedArray,
    /// Vector or slice, possibly nil
    DynamicSequence,
    /// Receiving end of a channel
    ReadableStream,
    Ineligible(IneligibleKind),
}

/// Why a value cannot be compared as a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleKind {
    /// Sending end of a channel; it cannot be observed
    SendOnlyStream,
    Mapping,
    Scalar,
}

/// Classification of a value: its shape, its type, and its element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerDescriptor {
    pub shape: ContainerShape,
    type_name: &'static str,
    pub element: Option<ElementType>,
}

impl ContainerDescriptor {
    pub fn new(
        shape: ContainerShape,
        type_name: &'static str,
        element: Option<ElementType>,
    ) -> Self {
        Self {
            shape,
            type_name,
            element,
        }
    }

    /// Descriptor for a container of `T` whose own type is `C`
    pub fn of<C: ?Sized, T: ?Sized>(shape: ContainerShape) -> Self {
        Self::new(shape, std::any::type_name::<C>(), Some(ElementType::of::<T>()))
    }

    /// Descriptor for a value with no comparable element type
    pub fn scalar<C: ?Sized>(kind: IneligibleKind) -> Self {
        Self::new(
            ContainerShape::Ineligible(kind),
            std::any::type_name::<C>(),
            None,
        )
    }

    /// Short type label of the container itself, e.g. `Vec<i32>`
    pub fn type_name(&self) -> String {
        short_type_name(self.type_name)
    }
}

impl fmt::Display for ContainerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// A value the checker can classify and, when eligible, extract elements from
///
/// Extraction borrows mutably because streams are consumed by it; arrays and
/// vectors are left untouched and lend their elements.
pub trait Container {
    type Item: Item;

    fn describe(&self) -> ContainerDescriptor;

    fn extract(&mut self) -> ElementSequence<'_, Self::Item>;
}

impl<C: Container + ?Sized> Container for &mut C {
    type Item = C::Item;

    fn describe(&self) -> ContainerDescriptor {
        (**self).describe()
    }

    fn extract(&mut self) -> ElementSequence<'_, C::Item> {
        (**self).extract()
    }
}

impl<C: Container + ?Sized> Container for Box<C> {
    type Item = C::Item;

    fn describe(&self) -> ContainerDescriptor {
        (**self).describe()
    }

    fn extract(&mut self) -> ElementSequence<'_, C::Item> {
        (**self).extract()
    }
}

// Fixed arrays

impl<T: Item, const N: usize> Container for [T; N] {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<Self, T>(ContainerShape::FixedArray)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        ElementSequence::Borrowed(self.as_slice())
    }
}

impl<T: Item, const N: usize> Container for &[T; N] {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<[T; N], T>(ContainerShape::FixedArray)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        ElementSequence::Borrowed(self.as_slice())
    }
}

// Dynamic sequences

impl<T: Item> Container for Vec<T> {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<Self, T>(ContainerShape::DynamicSequence)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        ElementSequence::Borrowed(self.as_slice())
    }
}

impl<T: Item> Container for &Vec<T> {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<Vec<T>, T>(ContainerShape::DynamicSequence)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        ElementSequence::Borrowed(self.as_slice())
    }
}

impl<T: Item> Container for &[T] {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<[T], T>(ContainerShape::DynamicSequence)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        ElementSequence::Borrowed(*self)
    }
}

impl<T: Item + Clone> Container for &VecDeque<T> {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<VecDeque<T>, T>(ContainerShape::DynamicSequence)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        self.iter().cloned().collect::<Vec<_>>().into()
    }
}

// Nil-able dynamic sequences; `None` is the nil sequence

impl<T: Item> Container for Option<Vec<T>> {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<Self, T>(ContainerShape::DynamicSequence)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        self.as_deref().map_or(ElementSequence::Nil, ElementSequence::Borrowed)
    }
}

impl<T: Item> Container for Option<&Vec<T>> {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<Self, T>(ContainerShape::DynamicSequence)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        self.map_or(ElementSequence::Nil, |v| ElementSequence::Borrowed(v.as_slice()))
    }
}

impl<T: Item> Container for Option<&[T]> {
    type Item = T;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<Self, T>(ContainerShape::DynamicSequence)
    }

    fn extract(&mut self) -> ElementSequence<'_, T> {
        self.map_or(ElementSequence::Nil, ElementSequence::Borrowed)
    }
}

// Readable streams

/// Adapter that makes any [`TryReceive`] source a readable stream container
#[derive(Debug)]
pub struct Readable<R>(pub R);

impl<R> Container for Readable<R>
where
    R: TryReceive,
    R::Item: Item,
{
    type Item = R::Item;

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::of::<R, R::Item>(ContainerShape::ReadableStream)
    }

    fn extract(&mut self) -> ElementSequence<'_, R::Item> {
        drain(&mut self.0).into()
    }
}

macro_rules! readable_stream {
    ($($stream:ident)::+ $(, $bound:ident)?) => {
        impl<T: Item $(+ $bound)?> Container for $($stream)::+<T> {
            type Item = T;

            fn describe(&self) -> ContainerDescriptor {
                ContainerDescriptor::of::<Self, T>(ContainerShape::ReadableStream)
            }

            fn extract(&mut self) -> ElementSequence<'_, T> {
                drain(self).into()
            }
        }
    };
}

readable_stream!(mpsc::Receiver);
readable_stream!(tokio_mpsc::Receiver);
readable_stream!(tokio_mpsc::UnboundedReceiver);
readable_stream!(broadcast::Receiver, Clone);

// Send-only streams are classified but never read

macro_rules! send_only_stream {
    ($($stream:ident)::+) => {
        impl<T: Item> Container for $($stream)::+<T> {
            type Item = T;

            fn describe(&self) -> ContainerDescriptor {
                ContainerDescriptor::new(
                    ContainerShape::Ineligible(IneligibleKind::SendOnlyStream),
                    std::any::type_name::<Self>(),
                    Some(ElementType::of::<T>()),
                )
            }

            fn extract(&mut self) -> ElementSequence<'_, T> {
                ElementSequence::Owned(Vec::new())
            }
        }
    };
}

send_only_stream!(mpsc::Sender);
send_only_stream!(mpsc::SyncSender);
send_only_stream!(tokio_mpsc::Sender);
send_only_stream!(tokio_mpsc::UnboundedSender);
send_only_stream!(broadcast::Sender);

// Everything else is ineligible

impl<K: Item, V: Item, S> Container for HashMap<K, V, S> {
    type Item = (K, V);

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::scalar::<Self>(IneligibleKind::Mapping)
    }

    fn extract(&mut self) -> ElementSequence<'_, (K, V)> {
        ElementSequence::Owned(Vec::new())
    }
}

impl<K: Item, V: Item> Container for BTreeMap<K, V> {
    type Item = (K, V);

    fn describe(&self) -> ContainerDescriptor {
        ContainerDescriptor::scalar::<Self>(IneligibleKind::Mapping)
    }

    fn extract(&mut self) -> ElementSequence<'_, (K, V)> {
        ElementSequence::Owned(Vec::new())
    }
}

macro_rules! scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Container for $ty {
                type Item = Self;

                fn describe(&self) -> ContainerDescriptor {
                    ContainerDescriptor::scalar::<Self>(IneligibleKind::Scalar)
                }

                fn extract(&mut self) -> ElementSequence<'_, Self> {
                    ElementSequence::Owned(Vec::new())
                }
            }
        )+
    };
}

scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &str,
);

// Type erasure

/// Adapter that hides a container's element type behind [`Element`]
///
/// Containers of different element types can then share one
/// `Box<dyn Container<Item = Element>>`. Their descriptors still name the
/// real element type, so classification rejects a mismatched pair at runtime
/// rather than at compile time.
#[derive(Debug)]
pub struct Erased<C>(pub C);

impl<C> Container for Erased<C>
where
    C: Container,
    C::Item: Any + Clone,
{
    type Item = Element;

    fn describe(&self) -> ContainerDescriptor {
        self.0.describe()
    }

    fn extract(&mut self) -> ElementSequence<'_, Element> {
        self.0.extract().erase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_shapes() {
        let array = [1, 2, 3];
        assert_eq!(array.describe().shape, ContainerShape::FixedArray);
        assert_eq!((&array).describe().shape, ContainerShape::FixedArray);
        assert_eq!(array.describe().type_name(), "[i32; 3]");
        assert_eq!(array.describe().element, Some(ElementType::of::<i32>()));
    }

    #[test]
    fn test_sequence_shapes() {
        let v = vec!["a".to_string()];
        assert_eq!(v.describe().shape, ContainerShape::DynamicSequence);
        assert_eq!((&v).describe().type_name(), "Vec<String>");
        assert_eq!((&v[0..1]).describe().type_name(), "[String]");
        assert_eq!(
            Option::<Vec<u8>>::None.describe().shape,
            ContainerShape::DynamicSequence
        );
        assert_eq!(
            (&VecDeque::from([1u8])).describe().shape,
            ContainerShape::DynamicSequence
        );
    }

    #[test]
    fn test_optional_sequences_name_their_own_type() {
        let v = vec![1, 2];
        assert_eq!(Some(&v).describe().type_name(), "Option<&Vec<i32>>");
        assert_eq!(
            Option::<&Vec<i32>>::None.describe().type_name(),
            "Option<&Vec<i32>>"
        );
        assert_eq!(Some(v.as_slice()).describe().type_name(), "Option<&[i32]>");
        assert_eq!(Some(v.clone()).describe().type_name(), "Option<Vec<i32>>");
    }

    #[test]
    fn test_nil_extraction() {
        assert!(Option::<Vec<i32>>::None.extract().is_nil());
        assert!(Option::<&[i32]>::None.extract().is_nil());
        assert!(Option::<&Vec<i32>>::None.extract().is_nil());

        let mut empty: Option<Vec<i32>> = Some(Vec::new());
        let extracted = empty.extract();
        assert!(!extracted.is_nil());
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_borrowed_elements() {
        let first = String::from("first");
        let second = String::from("second");
        let mut borrowed = vec![first.as_str(), second.as_str()];

        let descriptor = borrowed.describe();
        assert_eq!(descriptor.type_name(), "Vec<&str>");
        assert_eq!(descriptor.element, Some(ElementType::of::<&str>()));
        assert_eq!(borrowed.extract().as_slice(), ["first", "second"]);
    }

    #[test]
    fn test_stream_shapes() {
        let (tx, rx) = mpsc::channel::<String>();
        assert_eq!(rx.describe().shape, ContainerShape::ReadableStream);
        assert_eq!(
            tx.describe().shape,
            ContainerShape::Ineligible(IneligibleKind::SendOnlyStream)
        );
        assert_eq!(tx.describe().element, Some(ElementType::of::<String>()));

        let (tx, rx) = tokio_mpsc::channel::<i32>(1);
        assert_eq!(rx.describe().shape, ContainerShape::ReadableStream);
        assert_eq!(
            tx.describe().shape,
            ContainerShape::Ineligible(IneligibleKind::SendOnlyStream)
        );

        let (tx, rx) = broadcast::channel::<i32>(1);
        assert_eq!(rx.describe().shape, ContainerShape::ReadableStream);
        assert_eq!(
            tx.describe().shape,
            ContainerShape::Ineligible(IneligibleKind::SendOnlyStream)
        );
    }

    #[test]
    fn test_ineligible_shapes() {
        assert_eq!(
            7i32.describe().shape,
            ContainerShape::Ineligible(IneligibleKind::Scalar)
        );
        assert_eq!("x".describe().element, None);
        assert_eq!(
            HashMap::<String, i32>::new().describe().shape,
            ContainerShape::Ineligible(IneligibleKind::Mapping)
        );
        assert_eq!(
            BTreeMap::<String, i32>::new().describe().type_name(),
            "BTreeMap<String, i32>"
        );
    }

    #[test]
    fn test_trait_object() {
        let mut boxed: Box<dyn Container<Item = i32>> = Box::new(vec![1, 2]);
        assert_eq!(boxed.describe().shape, ContainerShape::DynamicSequence);
        assert_eq!(boxed.extract().len(), 2);
    }

    #[test]
    fn test_erased_trait_objects() {
        let mut containers: Vec<Box<dyn Container<Item = Element>>> = vec![
            Box::new(Erased(vec![1, 2])),
            Box::new(Erased(["a".to_string()])),
            Box::new(Erased(None::<Vec<u8>>)),
        ];

        assert_eq!(containers[0].describe().type_name(), "Vec<i32>");
        assert_eq!(containers[1].describe().element, Some(ElementType::of::<String>()));
        assert_eq!(
            containers[0].extract().as_slice(),
            &[Element::new(1), Element::new(2)]
        );
        assert_eq!(
            containers[1].extract().as_slice()[0].downcast_ref::<String>(),
            Some(&"a".to_string())
        );
        assert!(containers[2].extract().is_nil());
    }
}
