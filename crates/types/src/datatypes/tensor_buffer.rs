//! Tensor element storage
//!
//! A [`TensorBuffer`] holds the flattened elements of a tensor in one of a
//! closed set of element kinds, or JPEG-encoded bytes. Buffers may borrow
//! caller memory through [`Collection`]; nothing is copied until the
//! serializer appends the elements to its builder.
//!
//! On the wire a buffer is a dense union with one `List<item>` child per
//! kind. The union type id of a kind doubles as its numeric tag
//! ([`TensorBufferKind::tag`]).

use crate::datatypes::item_field;
use arrow::array::{
    ArrayRef, BooleanBuilder, Float16Builder, Float32Builder, Float64Builder, Int16Builder,
    Int32Builder, Int64Builder, Int8Builder, UInt16Builder, UInt32Builder, UInt64Builder,
    UInt8Builder,
};
use arrow::datatypes::{DataType, Field, UnionFields, UnionMode};
use half::f16;
use once_cell::sync::Lazy;
use std::fmt;
use stratalog_core::{
    dense_union_fields, CellBuilder, Collection, Datatype, DatatypeName, DenseUnionLayout,
    ListCellBuilder, Loggable, SerializationError, SerializationResult,
};

// ============================================================================
// Element kinds
// ============================================================================

/// Element kind of a [`TensorBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorBufferKind {
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// IEEE half precision
    F16,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `bool`
    Bool,
    /// JPEG-encoded image bytes
    Jpeg,
}

impl TensorBufferKind {
    /// Every kind, in tag order
    pub const ALL: [TensorBufferKind; 13] = [
        TensorBufferKind::U8,
        TensorBufferKind::U16,
        TensorBufferKind::U32,
        TensorBufferKind::U64,
        TensorBufferKind::I8,
        TensorBufferKind::I16,
        TensorBufferKind::I32,
        TensorBufferKind::I64,
        TensorBufferKind::F16,
        TensorBufferKind::F32,
        TensorBufferKind::F64,
        TensorBufferKind::Bool,
        TensorBufferKind::Jpeg,
    ];

    /// Stable numeric tag, also the union type id (1..=13)
    pub fn tag(self) -> u8 {
        match self {
            TensorBufferKind::U8 => 1,
            TensorBufferKind::U16 => 2,
            TensorBufferKind::U32 => 3,
            TensorBufferKind::U64 => 4,
            TensorBufferKind::I8 => 5,
            TensorBufferKind::I16 => 6,
            TensorBufferKind::I32 => 7,
            TensorBufferKind::I64 => 8,
            TensorBufferKind::F16 => 9,
            TensorBufferKind::F32 => 10,
            TensorBufferKind::F64 => 11,
            TensorBufferKind::Bool => 12,
            TensorBufferKind::Jpeg => 13,
        }
    }

    /// Kind for a numeric tag.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedElementKind` for tags outside 1..=13.
    pub fn from_tag(tag: u8) -> SerializationResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| {
                SerializationError::unsupported_element_kind(format!("tensor element tag {tag}"))
            })
    }

    /// Kind for a dtype string such as `"uint8"`, `"f32"` or `"float16"`.
    ///
    /// Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedElementKind` for any other string.
    pub fn from_dtype_str(dtype: &str) -> SerializationResult<Self> {
        let kind = match dtype.trim().to_ascii_lowercase().as_str() {
            "u8" | "uint8" => TensorBufferKind::U8,
            "u16" | "uint16" => TensorBufferKind::U16,
            "u32" | "uint32" => TensorBufferKind::U32,
            "u64" | "uint64" => TensorBufferKind::U64,
            "i8" | "int8" => TensorBufferKind::I8,
            "i16" | "int16" => TensorBufferKind::I16,
            "i32" | "int32" => TensorBufferKind::I32,
            "i64" | "int64" => TensorBufferKind::I64,
            "f16" | "float16" | "half" => TensorBufferKind::F16,
            "f32" | "float32" | "float" => TensorBufferKind::F32,
            "f64" | "float64" | "double" => TensorBufferKind::F64,
            "bool" | "boolean" => TensorBufferKind::Bool,
            "jpeg" | "jpg" => TensorBufferKind::Jpeg,
            _ => {
                return Err(SerializationError::unsupported_element_kind(format!(
                    "tensor dtype '{dtype}'"
                )))
            }
        };
        Ok(kind)
    }

    /// Union field name
    pub fn name(self) -> &'static str {
        match self {
            TensorBufferKind::U8 => "U8",
            TensorBufferKind::U16 => "U16",
            TensorBufferKind::U32 => "U32",
            TensorBufferKind::U64 => "U64",
            TensorBufferKind::I8 => "I8",
            TensorBufferKind::I16 => "I16",
            TensorBufferKind::I32 => "I32",
            TensorBufferKind::I64 => "I64",
            TensorBufferKind::F16 => "F16",
            TensorBufferKind::F32 => "F32",
            TensorBufferKind::F64 => "F64",
            TensorBufferKind::Bool => "BOOL",
            TensorBufferKind::Jpeg => "JPEG",
        }
    }

    /// Bytes per element; JPEG counts bytes
    pub fn element_size(self) -> usize {
        match self {
            TensorBufferKind::U8 | TensorBufferKind::I8 | TensorBufferKind::Jpeg => 1,
            TensorBufferKind::Bool => std::mem::size_of::<bool>(),
            TensorBufferKind::U16 | TensorBufferKind::I16 | TensorBufferKind::F16 => 2,
            TensorBufferKind::U32 | TensorBufferKind::I32 | TensorBufferKind::F32 => 4,
            TensorBufferKind::U64 | TensorBufferKind::I64 | TensorBufferKind::F64 => 8,
        }
    }

    /// True for encoded layouts, whose length is unrelated to the shape
    pub fn is_encoded(self) -> bool {
        self == TensorBufferKind::Jpeg
    }

    /// Arrow type of one element
    pub fn element_datatype(self) -> DataType {
        match self {
            TensorBufferKind::U8 | TensorBufferKind::Jpeg => DataType::UInt8,
            TensorBufferKind::U16 => DataType::UInt16,
            TensorBufferKind::U32 => DataType::UInt32,
            TensorBufferKind::U64 => DataType::UInt64,
            TensorBufferKind::I8 => DataType::Int8,
            TensorBufferKind::I16 => DataType::Int16,
            TensorBufferKind::I32 => DataType::Int32,
            TensorBufferKind::I64 => DataType::Int64,
            TensorBufferKind::F16 => DataType::Float16,
            TensorBufferKind::F32 => DataType::Float32,
            TensorBufferKind::F64 => DataType::Float64,
            TensorBufferKind::Bool => DataType::Boolean,
        }
    }

    fn type_id(self) -> i8 {
        // tags are 1..=13
        self.tag() as i8
    }
}

impl fmt::Display for TensorBufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Element types
// ============================================================================

/// A Rust type that can be stored as tensor elements
pub trait TensorElement: Copy + 'static {
    /// Kind used for buffers of this type
    const KIND: TensorBufferKind;

    /// Wrap `values` into the matching buffer variant
    fn into_buffer(values: Collection<'_, Self>) -> TensorBuffer<'_>;

    /// Decode little-endian bytes into elements.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `bytes` is not a whole number of elements.
    fn decode_le(bytes: &[u8]) -> SerializationResult<Vec<Self>>;
}

fn check_whole_elements(kind: TensorBufferKind, len: usize) -> SerializationResult<()> {
    let width = kind.element_size();
    if len % width != 0 {
        return Err(SerializationError::size_mismatch(
            format!("{kind} tensor bytes ({width} per element)"),
            len.next_multiple_of(width),
            len,
        ));
    }
    Ok(())
}

macro_rules! impl_tensor_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl TensorElement for $ty {
                const KIND: TensorBufferKind = TensorBufferKind::$variant;

                fn into_buffer(values: Collection<'_, Self>) -> TensorBuffer<'_> {
                    TensorBuffer::$variant(values)
                }

                fn decode_le(bytes: &[u8]) -> SerializationResult<Vec<Self>> {
                    check_whole_elements(Self::KIND, bytes.len())?;
                    bytes
                        .chunks_exact(std::mem::size_of::<$ty>())
                        .map(|chunk| {
                            chunk.try_into().map(<$ty>::from_le_bytes).map_err(|_| {
                                SerializationError::size_mismatch(
                                    "tensor element bytes",
                                    std::mem::size_of::<$ty>(),
                                    chunk.len(),
                                )
                            })
                        })
                        .collect()
                }
            }
        )*
    };
}

impl_tensor_element!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f16 => F16,
    f32 => F32,
    f64 => F64,
);

impl TensorElement for bool {
    const KIND: TensorBufferKind = TensorBufferKind::Bool;

    fn into_buffer(values: Collection<'_, Self>) -> TensorBuffer<'_> {
        TensorBuffer::Bool(values)
    }

    fn decode_le(bytes: &[u8]) -> SerializationResult<Vec<Self>> {
        Ok(bytes.iter().map(|byte| *byte != 0).collect())
    }
}

// ============================================================================
// Buffer
// ============================================================================

/// Flattened tensor elements of one kind
#[derive(Debug, Clone, PartialEq)]
pub enum TensorBuffer<'a> {
    /// `u8` elements
    U8(Collection<'a, u8>),
    /// `u16` elements
    U16(Collection<'a, u16>),
    /// `u32` elements
    U32(Collection<'a, u32>),
    /// `u64` elements
    U64(Collection<'a, u64>),
    /// `i8` elements
    I8(Collection<'a, i8>),
    /// `i16` elements
    I16(Collection<'a, i16>),
    /// `i32` elements
    I32(Collection<'a, i32>),
    /// `i64` elements
    I64(Collection<'a, i64>),
    /// Half-precision elements
    F16(Collection<'a, f16>),
    /// `f32` elements
    F32(Collection<'a, f32>),
    /// `f64` elements
    F64(Collection<'a, f64>),
    /// `bool` elements
    Bool(Collection<'a, bool>),
    /// JPEG-encoded image
    Jpeg(Collection<'a, u8>),
}

/// Evaluate `$body` with `$values` bound to the buffer's collection
macro_rules! with_values {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            TensorBuffer::U8($values) => $body,
            TensorBuffer::U16($values) => $body,
            TensorBuffer::U32($values) => $body,
            TensorBuffer::U64($values) => $body,
            TensorBuffer::I8($values) => $body,
            TensorBuffer::I16($values) => $body,
            TensorBuffer::I32($values) => $body,
            TensorBuffer::I64($values) => $body,
            TensorBuffer::F16($values) => $body,
            TensorBuffer::F32($values) => $body,
            TensorBuffer::F64($values) => $body,
            TensorBuffer::Bool($values) => $body,
            TensorBuffer::Jpeg($values) => $body,
        }
    };
}

impl<'a> TensorBuffer<'a> {
    /// Buffer over `elements`, borrowed or owned
    pub fn from_elements<T: TensorElement>(elements: impl Into<Collection<'a, T>>) -> Self {
        T::into_buffer(elements.into())
    }

    /// JPEG-encoded image bytes
    pub fn jpeg(bytes: impl Into<Collection<'a, u8>>) -> Self {
        TensorBuffer::Jpeg(bytes.into())
    }

    /// Element kind
    pub fn kind(&self) -> TensorBufferKind {
        match self {
            TensorBuffer::U8(_) => TensorBufferKind::U8,
            TensorBuffer::U16(_) => TensorBufferKind::U16,
            TensorBuffer::U32(_) => TensorBufferKind::U32,
            TensorBuffer::U64(_) => TensorBufferKind::U64,
            TensorBuffer::I8(_) => TensorBufferKind::I8,
            TensorBuffer::I16(_) => TensorBufferKind::I16,
            TensorBuffer::I32(_) => TensorBufferKind::I32,
            TensorBuffer::I64(_) => TensorBufferKind::I64,
            TensorBuffer::F16(_) => TensorBufferKind::F16,
            TensorBuffer::F32(_) => TensorBufferKind::F32,
            TensorBuffer::F64(_) => TensorBufferKind::F64,
            TensorBuffer::Bool(_) => TensorBufferKind::Bool,
            TensorBuffer::Jpeg(_) => TensorBufferKind::Jpeg,
        }
    }

    /// Number of elements (bytes for JPEG)
    pub fn len(&self) -> usize {
        with_values!(self, values => values.len())
    }

    /// True if the buffer holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the buffer was built from a null pointer
    pub fn is_null(&self) -> bool {
        with_values!(self, values => values.is_null())
    }

    /// Payload size in bytes
    pub fn size_in_bytes(&self) -> usize {
        self.len().saturating_mul(self.kind().element_size())
    }

    /// Reinterpret little-endian `bytes` as elements of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `SizeMismatch` if `bytes` is not a whole number of elements.
    pub fn from_le_bytes(
        kind: TensorBufferKind,
        bytes: &[u8],
    ) -> SerializationResult<TensorBuffer<'static>> {
        fn decode<T: TensorElement>(bytes: &[u8]) -> SerializationResult<TensorBuffer<'static>> {
            Ok(T::into_buffer(Collection::owned(T::decode_le(bytes)?)))
        }

        match kind {
            TensorBufferKind::U8 => decode::<u8>(bytes),
            TensorBufferKind::U16 => decode::<u16>(bytes),
            TensorBufferKind::U32 => decode::<u32>(bytes),
            TensorBufferKind::U64 => decode::<u64>(bytes),
            TensorBufferKind::I8 => decode::<i8>(bytes),
            TensorBufferKind::I16 => decode::<i16>(bytes),
            TensorBufferKind::I32 => decode::<i32>(bytes),
            TensorBufferKind::I64 => decode::<i64>(bytes),
            TensorBufferKind::F16 => decode::<f16>(bytes),
            TensorBufferKind::F32 => decode::<f32>(bytes),
            TensorBufferKind::F64 => decode::<f64>(bytes),
            TensorBufferKind::Bool => decode::<bool>(bytes),
            TensorBufferKind::Jpeg => Ok(TensorBuffer::Jpeg(Collection::owned(bytes.to_vec()))),
        }
    }

    /// Detach from borrowed memory.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedNullArgument` for a null buffer.
    pub fn into_owned(self) -> SerializationResult<TensorBuffer<'static>> {
        Ok(match self {
            TensorBuffer::U8(values) => TensorBuffer::U8(values.into_owned()?),
            TensorBuffer::U16(values) => TensorBuffer::U16(values.into_owned()?),
            TensorBuffer::U32(values) => TensorBuffer::U32(values.into_owned()?),
            TensorBuffer::U64(values) => TensorBuffer::U64(values.into_owned()?),
            TensorBuffer::I8(values) => TensorBuffer::I8(values.into_owned()?),
            TensorBuffer::I16(values) => TensorBuffer::I16(values.into_owned()?),
            TensorBuffer::I32(values) => TensorBuffer::I32(values.into_owned()?),
            TensorBuffer::I64(values) => TensorBuffer::I64(values.into_owned()?),
            TensorBuffer::F16(values) => TensorBuffer::F16(values.into_owned()?),
            TensorBuffer::F32(values) => TensorBuffer::F32(values.into_owned()?),
            TensorBuffer::F64(values) => TensorBuffer::F64(values.into_owned()?),
            TensorBuffer::Bool(values) => TensorBuffer::Bool(values.into_owned()?),
            TensorBuffer::Jpeg(values) => TensorBuffer::Jpeg(values.into_owned()?),
        })
    }
}

// ============================================================================
// Codec
// ============================================================================

static FIELDS: Lazy<UnionFields> = Lazy::new(|| {
    dense_union_fields(
        TensorBufferKind::ALL
            .into_iter()
            .map(|kind| {
                Field::new(
                    kind.name(),
                    DataType::List(item_field(kind.element_datatype())),
                    false,
                )
            })
            .collect(),
    )
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Union(FIELDS.clone(), UnionMode::Dense));

/// Builder for [`TensorBuffer`]
#[derive(Debug)]
pub struct TensorBufferBuilder {
    layout: DenseUnionLayout,
    u8: ListCellBuilder<UInt8Builder>,
    u16: ListCellBuilder<UInt16Builder>,
    u32: ListCellBuilder<UInt32Builder>,
    u64: ListCellBuilder<UInt64Builder>,
    i8: ListCellBuilder<Int8Builder>,
    i16: ListCellBuilder<Int16Builder>,
    i32: ListCellBuilder<Int32Builder>,
    i64: ListCellBuilder<Int64Builder>,
    f16: ListCellBuilder<Float16Builder>,
    f32: ListCellBuilder<Float32Builder>,
    f64: ListCellBuilder<Float64Builder>,
    bool: ListCellBuilder<BooleanBuilder>,
    jpeg: ListCellBuilder<UInt8Builder>,
}

fn list_builder<B: CellBuilder>(kind: TensorBufferKind, values: B) -> ListCellBuilder<B> {
    ListCellBuilder::new(item_field(kind.element_datatype()), values, 0)
}

impl CellBuilder for TensorBufferBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.push_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let children = vec![
            self.u8.finish()?,
            self.u16.finish()?,
            self.u32.finish()?,
            self.u64.finish()?,
            self.i8.finish()?,
            self.i16.finish()?,
            self.i32.finish()?,
            self.i64.finish()?,
            self.f16.finish()?,
            self.f32.finish()?,
            self.f64.finish()?,
            self.bool.finish()?,
            self.jpeg.finish()?,
        ];
        self.layout.finish(children)
    }
}

impl<'a> Loggable for TensorBuffer<'a> {
    type Name = DatatypeName;
    type Builder = TensorBufferBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.TensorBuffer")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> TensorBufferBuilder {
        use TensorBufferKind as K;
        TensorBufferBuilder {
            layout: DenseUnionLayout::new(FIELDS.clone(), capacity),
            u8: list_builder(K::U8, UInt8Builder::new()),
            u16: list_builder(K::U16, UInt16Builder::new()),
            u32: list_builder(K::U32, UInt32Builder::new()),
            u64: list_builder(K::U64, UInt64Builder::new()),
            i8: list_builder(K::I8, Int8Builder::new()),
            i16: list_builder(K::I16, Int16Builder::new()),
            i32: list_builder(K::I32, Int32Builder::new()),
            i64: list_builder(K::I64, Int64Builder::new()),
            f16: list_builder(K::F16, Float16Builder::new()),
            f32: list_builder(K::F32, Float32Builder::new()),
            f64: list_builder(K::F64, Float64Builder::new()),
            bool: list_builder(K::Bool, BooleanBuilder::new()),
            jpeg: list_builder(K::Jpeg, UInt8Builder::new()),
        }
    }

    fn append_to_builder(builder: &mut TensorBufferBuilder, value: &Self) -> SerializationResult<()> {
        // Null buffers are rejected before the slot is recorded.
        if value.is_null() {
            return Err(SerializationError::unexpected_null(format!(
                "{} tensor buffer of {} elements has a null data pointer",
                value.kind(),
                value.len()
            )));
        }
        builder.layout.push(value.kind().type_id())?;
        match value {
            TensorBuffer::U8(values) => builder.u8.append_slice(values.try_as_slice()?),
            TensorBuffer::U16(values) => builder.u16.append_slice(values.try_as_slice()?),
            TensorBuffer::U32(values) => builder.u32.append_slice(values.try_as_slice()?),
            TensorBuffer::U64(values) => builder.u64.append_slice(values.try_as_slice()?),
            TensorBuffer::I8(values) => builder.i8.append_slice(values.try_as_slice()?),
            TensorBuffer::I16(values) => builder.i16.append_slice(values.try_as_slice()?),
            TensorBuffer::I32(values) => builder.i32.append_slice(values.try_as_slice()?),
            TensorBuffer::I64(values) => builder.i64.append_slice(values.try_as_slice()?),
            TensorBuffer::F16(values) => builder.f16.append_slice(values.try_as_slice()?),
            TensorBuffer::F32(values) => builder.f32.append_slice(values.try_as_slice()?),
            TensorBuffer::F64(values) => builder.f64.append_slice(values.try_as_slice()?),
            TensorBuffer::Bool(values) => builder.bool.append_slice(values.try_as_slice()?),
            TensorBuffer::Jpeg(values) => builder.jpeg.append_slice(values.try_as_slice()?),
        }
    }

    fn heap_size_bytes(&self) -> usize {
        self.size_in_bytes()
    }
}

impl Datatype for TensorBuffer<'_> {}
