//! Tensor shape and element invariants.

use crate::common::*;
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    ArrowPrimitiveType, Float16Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use half::f16;
use proptest::prelude::*;
use stratalog::archetypes::Tensor;
use stratalog::datatypes::{TensorBuffer, TensorBufferKind, TensorDimension};
use stratalog::{AsComponents, ErrorKind, SerializationError};

#[test]
fn matching_shape_gives_two_cells() {
    let pool = test_pool("tensor_2x3");
    let elements = [10u8, 11, 12, 13, 14, 15];
    let cells = Tensor::from_elements([2, 3], &elements[..])
        .serialize_with(&pool)
        .unwrap();
    assert_eq!(short_names(&cells), ["TensorData", "TensorIndicator"]);

    let data = cells[0].array().as_struct();
    let buffer = data.column(1).as_union();
    assert_eq!(buffer.type_id(0), TensorBufferKind::U8.tag() as i8);
    let elements = buffer.child(TensorBufferKind::U8.tag() as i8).as_list::<i32>();
    let values = elements.value(0);
    assert_eq!(&values.as_primitive::<UInt8Type>().values()[..], &[10, 11, 12, 13, 14, 15]);
}

#[test]
fn mismatched_shape_is_size_mismatch() {
    let elements = [0u8; 6];
    let err = Tensor::from_elements([2, 4], &elements[..]).serialize().unwrap_err();
    match err {
        SerializationError::SizeMismatch {
            expected, actual, ..
        } => {
            assert_eq!(expected, 8);
            assert_eq!(actual, 6);
        }
        other => panic!("expected SizeMismatch, got {other:?}"),
    }
}

#[test]
fn every_element_kind_serializes() {
    let tensors = vec![
        Tensor::from_elements([2], vec![1u8, 2]),
        Tensor::from_elements([2], vec![1u16, 2]),
        Tensor::from_elements([2], vec![1u32, 2]),
        Tensor::from_elements([2], vec![1u64, 2]),
        Tensor::from_elements([2], vec![-1i8, 2]),
        Tensor::from_elements([2], vec![-1i16, 2]),
        Tensor::from_elements([2], vec![-1i32, 2]),
        Tensor::from_elements([2], vec![-1i64, 2]),
        Tensor::from_elements([2], vec![f16::from_f32(0.5), f16::ONE]),
        Tensor::from_elements([2], vec![0.5f32, 1.0]),
        Tensor::from_elements([2], vec![0.5f64, 1.0]),
        Tensor::from_elements([2], vec![true, false]),
        Tensor::new(
            vec![TensorDimension::height(1), TensorDimension::width(1)],
            TensorBuffer::jpeg(vec![0xFF, 0xD8]),
        ),
    ];
    let kinds: Vec<TensorBufferKind> = tensors
        .iter()
        .map(|tensor| tensor.data.0.buffer.kind())
        .collect();
    assert_eq!(kinds, TensorBufferKind::ALL);

    for tensor in &tensors {
        let cells = tensor.serialize().unwrap();
        assert_eq!(cells.len(), 2);
    }
}

/// Elements of the single tensor in `tensor`, read back from its cell
fn serialized_elements(tensor: &Tensor<'_>) -> ArrayRef {
    let cells = tensor.serialize().unwrap();
    let data = cells[0].array().as_struct();
    let buffer = data.column(1).as_union();
    let kind = tensor.data.0.buffer.kind();
    assert_eq!(buffer.type_id(0), kind.tag() as i8);
    let lists = buffer.child(kind.tag() as i8).as_list::<i32>();
    lists.value(buffer.value_offset(0))
}

fn primitive_elements<T: ArrowPrimitiveType>(tensor: &Tensor<'_>) -> Vec<T::Native> {
    serialized_elements(tensor).as_primitive::<T>().values().to_vec()
}

#[test]
fn every_element_kind_reads_back_in_order() {
    let u8s = vec![0u8, 7, 255];
    let u16s = vec![1u16, 65_535, 3];
    let u32s = vec![u32::MAX, 0, 42];
    let u64s = vec![u64::MAX, 1, 0];
    let i8s = vec![i8::MIN, -1, i8::MAX];
    let i16s = vec![-300i16, 0, 300];
    let i32s = vec![i32::MIN, 5, -5];
    let i64s = vec![i64::MAX, -2, 9];
    let f16s = vec![f16::from_f32(-0.5), f16::ONE, f16::from_f32(2.0)];
    let f32s = vec![0.25f32, -1.5, 1e10];
    let f64s = vec![f64::MIN_POSITIVE, -3.25, 1e300];
    let bools = vec![true, false, true];
    let jpeg = vec![0xFFu8, 0xD8, 0xFF, 0xE0];

    let shape = [3u64];
    assert_eq!(primitive_elements::<UInt8Type>(&Tensor::from_elements(shape, &u8s)), u8s);
    assert_eq!(primitive_elements::<UInt16Type>(&Tensor::from_elements(shape, &u16s)), u16s);
    assert_eq!(primitive_elements::<UInt32Type>(&Tensor::from_elements(shape, &u32s)), u32s);
    assert_eq!(primitive_elements::<UInt64Type>(&Tensor::from_elements(shape, &u64s)), u64s);
    assert_eq!(primitive_elements::<Int8Type>(&Tensor::from_elements(shape, &i8s)), i8s);
    assert_eq!(primitive_elements::<Int16Type>(&Tensor::from_elements(shape, &i16s)), i16s);
    assert_eq!(primitive_elements::<Int32Type>(&Tensor::from_elements(shape, &i32s)), i32s);
    assert_eq!(primitive_elements::<Int64Type>(&Tensor::from_elements(shape, &i64s)), i64s);
    assert_eq!(primitive_elements::<Float16Type>(&Tensor::from_elements(shape, &f16s)), f16s);
    assert_eq!(primitive_elements::<Float32Type>(&Tensor::from_elements(shape, &f32s)), f32s);
    assert_eq!(primitive_elements::<Float64Type>(&Tensor::from_elements(shape, &f64s)), f64s);

    let read_bools = serialized_elements(&Tensor::from_elements(shape, &bools));
    let read_bools = read_bools.as_boolean();
    let read_bools: Vec<bool> = (0..read_bools.len()).map(|i| read_bools.value(i)).collect();
    assert_eq!(read_bools, bools);

    let image = Tensor::new(
        vec![TensorDimension::height(1), TensorDimension::width(1)],
        TensorBuffer::jpeg(&jpeg),
    );
    assert_eq!(primitive_elements::<UInt8Type>(&image), jpeg);
}

proptest! {
    #[test]
    fn signed_elements_survive(values in prop::collection::vec(any::<i64>(), 0..64)) {
        let tensor = Tensor::from_elements([values.len() as u64], &values);
        prop_assert_eq!(primitive_elements::<Int64Type>(&tensor), values);
    }

    #[test]
    fn float_elements_survive(values in prop::collection::vec(-1e6f64..1e6, 0..64)) {
        let tensor = Tensor::from_elements([values.len() as u64], &values);
        prop_assert_eq!(primitive_elements::<Float64Type>(&tensor), values);
    }

    #[test]
    fn bool_elements_survive(values in prop::collection::vec(any::<bool>(), 0..64)) {
        let tensor = Tensor::from_elements([values.len() as u64], &values);
        let read = serialized_elements(&tensor);
        let read = read.as_boolean();
        let read: Vec<bool> = (0..read.len()).map(|i| read.value(i)).collect();
        prop_assert_eq!(read, values);
    }
}

#[test]
fn unknown_dtype_is_unsupported() {
    let err = TensorBufferKind::from_dtype_str("complex128").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedElementKind);
    assert!(TensorBufferKind::from_tag(0).is_err());
    assert_eq!(TensorBufferKind::from_dtype_str("F32").unwrap(), TensorBufferKind::F32);
}

#[test]
fn le_bytes_decode_to_elements() {
    let buffer = TensorBuffer::from_le_bytes(TensorBufferKind::U16, &[1, 0, 2, 1]).unwrap();
    assert_eq!(buffer.kind(), TensorBufferKind::U16);
    assert_eq!(buffer.len(), 2);

    let err = TensorBuffer::from_le_bytes(TensorBufferKind::U32, &[1, 2, 3]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeMismatch);
}

#[test]
fn best_effort_names_apply_overlap() {
    let result = Tensor::from_elements([4, 4], vec![0u8; 16])
        .with_dim_names_best_effort(["rows", "cols", "extra"]);
    assert_eq!(result.diagnostics.len(), 1);
    let tensor = result.into_value();
    let dims = tensor.shape().try_as_slice().unwrap();
    assert_eq!(dims[0].name.as_deref(), Some("rows"));
    assert_eq!(dims[1].name.as_deref(), Some("cols"));
    assert!(tensor.serialize().is_ok());
}

#[test]
fn strict_names_reject_mismatch() {
    let err = Tensor::from_elements([4, 4], vec![0u8; 16])
        .try_with_dim_names(["rows"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SizeMismatch);
}

#[test]
fn owned_tensor_outlives_borrowed_source() {
    let tensor = {
        let elements = vec![1.0f32, 2.0, 3.0];
        let borrowed = Tensor::from_elements([3], &elements);
        Tensor {
            data: borrowed.data.0.into_owned().unwrap().into(),
        }
    };
    assert_eq!(tensor.serialize().unwrap().len(), 2);
}
