//! Element extraction from containers
//!
//! Arrays and vectors are copied out in iteration order without touching the
//! source. Streams are drained: every value that can be received without
//! blocking is consumed, and draining stops at the first receive that would
//! block or that finds the stream closed and empty. Nothing waits for a
//! producer, so an unclosed stream yields a point-in-time snapshot.

use crate::container::{Container, ContainerDescriptor, ContainerShape};
use crate::element::{Element, Item};
use std::any::Any;
use std::sync::mpsc;
use tokio::sync::{broadcast, mpsc as tokio_mpsc};
use tracing::{debug, trace};

/// Ordered elements materialized from one container
///
/// Arrays and vectors lend their elements; drained streams own theirs.
#[derive(Debug, PartialEq)]
pub enum ElementSequence<'a, T> {
    /// An absent dynamic sequence, distinct from an empty one
    Nil,
    Borrowed(&'a [T]),
    Owned(Vec<T>),
}

impl<'a, T> ElementSequence<'a, T> {
    pub fn is_nil(&self) -> bool {
        matches!(self, ElementSequence::Nil)
    }

    /// The elements in extraction order; a nil sequence has none
    pub fn as_slice(&self) -> &[T] {
        match self {
            ElementSequence::Nil => &[],
            ElementSequence::Borrowed(elements) => elements,
            ElementSequence::Owned(elements) => elements,
        }
    }

    /// The elements, or `None` for a nil sequence
    pub fn present(&self) -> Option<&[T]> {
        match self {
            ElementSequence::Nil => None,
            _ => Some(self.as_slice()),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<'a, T: Item + Any + Clone> ElementSequence<'a, T> {
    /// Hide the element type; nil stays nil
    pub fn erase(self) -> ElementSequence<'static, Element> {
        match self {
            ElementSequence::Nil => ElementSequence::Nil,
            ElementSequence::Borrowed(items) => {
                ElementSequence::Owned(items.iter().cloned().map(Element::new).collect())
            }
            ElementSequence::Owned(items) => {
                ElementSequence::Owned(items.into_iter().map(Element::new).collect())
            }
        }
    }
}

impl<T> From<Vec<T>> for ElementSequence<'_, T> {
    fn from(elements: Vec<T>) -> Self {
        ElementSequence::Owned(elements)
    }
}

impl<'a, T> From<&'a [T]> for ElementSequence<'a, T> {
    fn from(elements: &'a [T]) -> Self {
        ElementSequence::Borrowed(elements)
    }
}

/// A stream that can be polled for a value without blocking
///
/// `None` means the receive would block, or the stream is closed and empty.
pub trait TryReceive {
    type Item;

    fn try_receive(&mut self) -> Option<Self::Item>;
}

impl<T> TryReceive for mpsc::Receiver<T> {
    type Item = T;

    fn try_receive(&mut self) -> Option<T> {
        self.try_recv().ok()
    }
}

impl<T> TryReceive for tokio_mpsc::Receiver<T> {
    type Item = T;

    fn try_receive(&mut self) -> Option<T> {
        self.try_recv().ok()
    }
}

impl<T> TryReceive for tokio_mpsc::UnboundedReceiver<T> {
    type Item = T;

    fn try_receive(&mut self) -> Option<T> {
        self.try_recv().ok()
    }
}

impl<T: Clone> TryReceive for broadcast::Receiver<T> {
    type Item = T;

    fn try_receive(&mut self) -> Option<T> {
        loop {
            match self.try_recv() {
                Ok(value) => return Some(value),
                // The receiver jumped past the lost values; the rest is still buffered
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    trace!(skipped, "Broadcast receiver lagged while draining");
                }
                Err(_) => return None,
            }
        }
    }
}

/// Consume every value currently available on a stream
pub fn drain<R: TryReceive + ?Sized>(stream: &mut R) -> Vec<R::Item> {
    let mut elements = Vec::new();
    while let Some(value) = stream.try_receive() {
        elements.push(value);
    }
    trace!(drained = elements.len(), "Drained stream");
    elements
}

/// Materialize a classified container into an element sequence
///
/// Ineligible containers yield an empty sequence; callers classify first.
pub fn extract<'a, C>(
    container: &'a mut C,
    descriptor: &ContainerDescriptor,
) -> ElementSequence<'a, C::Item>
where
    C: Container + ?Sized,
{
    if let ContainerShape::Ineligible(kind) = descriptor.shape {
        debug!(
            container = %descriptor.type_name(),
            ?kind,
            "Refusing to extract from an ineligible container"
        );
        return ElementSequence::Owned(Vec::new());
    }

    let sequence = container.extract();
    debug!(
        container = %descriptor.type_name(),
        shape = ?descriptor.shape,
        nil = sequence.is_nil(),
        len = sequence.len(),
        "Extracted elements"
    );
    sequence
}
