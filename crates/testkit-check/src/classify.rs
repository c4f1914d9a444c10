//! Container classification
//!
//! Decides from type metadata alone whether two values may be compared:
//! the got side may be an array, a sequence, or a readable stream; the want
//! side must be an array or a sequence; and both must hold the same element
//! type.

use crate::container::{ContainerDescriptor, ContainerShape, IneligibleKind};
use crate::element::ElementType;
use crate::error::{ClassificationError, Side};
use tracing::debug;

/// Check that `got` and `want` are comparable and return their shared element type
pub fn classify(
    got: &ContainerDescriptor,
    want: &ContainerDescriptor,
) -> Result<ElementType, ClassificationError> {
    let result = check_shapes(got, want);
    if let Err(err) = &result {
        debug!(got = %got, want = %want, error = %err, "Containers are not comparable");
    }
    result
}

fn check_shapes(
    got: &ContainerDescriptor,
    want: &ContainerDescriptor,
) -> Result<ElementType, ClassificationError> {
    match got.shape {
        ContainerShape::FixedArray
        | ContainerShape::DynamicSequence
        | ContainerShape::ReadableStream => {}
        ContainerShape::Ineligible(IneligibleKind::SendOnlyStream) => {
            return Err(ClassificationError::NonReceivableStream {
                got: got.type_name(),
            });
        }
        ContainerShape::Ineligible(_) => {
            return Err(not_a_container(Side::Got, got));
        }
    }

    if !matches!(
        want.shape,
        ContainerShape::FixedArray | ContainerShape::DynamicSequence
    ) {
        return Err(not_a_container(Side::Want, want));
    }

    match (got.element, want.element) {
        (Some(got_element), Some(want_element)) if got_element == want_element => Ok(got_element),
        (Some(_), Some(_)) => Err(ClassificationError::TypeMismatch {
            got: got.type_name(),
            want: want.type_name(),
        }),
        (None, _) => Err(not_a_container(Side::Got, got)),
        (_, None) => Err(not_a_container(Side::Want, want)),
    }
}

fn not_a_container(side: Side, descriptor: &ContainerDescriptor) -> ClassificationError {
    ClassificationError::NotAContainer {
        side,
        type_name: descriptor.type_name(),
    }
}
