//! Error classification surfaced by the serializers.

use stratalog::archetypes::Mesh3D;
use stratalog::components::{Position3D, TensorData};
use stratalog::datatypes::{TensorBuffer, TensorDimension};
use stratalog::{AsComponents, Collection, Component, ErrorCategory, ErrorKind};

#[test]
fn null_positions_are_unexpected_null() {
    // SAFETY: a null collection is never dereferenced
    let positions = unsafe { Collection::<Position3D>::from_raw_parts(std::ptr::null(), 8) };
    let err = Mesh3D::new(positions).serialize().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedNullArgument);
    assert_eq!(err.category(), ErrorCategory::InputValidation);
}

#[test]
fn null_tensor_buffer_is_unexpected_null() {
    // SAFETY: as above
    let elements = unsafe { Collection::<f32>::from_raw_parts(std::ptr::null(), 2) };
    let data = TensorData::new(
        vec![TensorDimension::unnamed(2)],
        TensorBuffer::from_elements(elements),
    );
    let err = TensorData::to_data_cell(&[data]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedNullArgument);
}

#[test]
fn error_codes_are_stable() {
    let codes: Vec<u32> = [
        ErrorKind::UnexpectedNullArgument,
        ErrorKind::SizeMismatch,
        ErrorKind::AllocationFailed,
        ErrorKind::UnsupportedElementKind,
        ErrorKind::DatatypeMismatch,
        ErrorKind::ArrowFailure,
    ]
    .iter()
    .map(ErrorKind::code)
    .collect();
    assert_eq!(codes, [1, 2, 3, 4, 5, 6]);
    assert_eq!(ErrorKind::AllocationFailed.category(), ErrorCategory::Allocation);
    assert_eq!(ErrorKind::DatatypeMismatch.category(), ErrorCategory::Logic);
}
