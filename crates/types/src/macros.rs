//! Codec boilerplate shared by the scalar and fixed-size-list loggables

/// `Loggable` for a newtype over one arrow primitive, stored in field `.0`
macro_rules! impl_primitive_loggable {
    ($ty:ty, $arrow:ty, $name_ty:ident, $name:literal, $datatype:expr) => {
        impl stratalog_core::Loggable for $ty {
            type Name = stratalog_core::$name_ty;
            type Builder = arrow::array::PrimitiveBuilder<$arrow>;

            fn name() -> stratalog_core::$name_ty {
                stratalog_core::$name_ty::new_static($name)
            }

            fn arrow_datatype() -> &'static arrow::datatypes::DataType {
                static DATATYPE: arrow::datatypes::DataType = $datatype;
                &DATATYPE
            }

            fn new_builder(capacity: usize) -> Self::Builder {
                arrow::array::PrimitiveBuilder::with_capacity(capacity)
            }

            fn append_to_builder(
                builder: &mut Self::Builder,
                value: &Self,
            ) -> stratalog_core::SerializationResult<()> {
                builder.append_value(value.0);
                Ok(())
            }
        }
    };
}

/// `Loggable` for a fixed-size array of `f32`, stored in field `$field`
macro_rules! impl_float_array_loggable {
    ($ty:ty, $field:ident, $size:literal, $name_ty:ident, $name:literal) => {
        impl stratalog_core::Loggable for $ty {
            type Name = stratalog_core::$name_ty;
            type Builder = stratalog_core::FixedSizeListCellBuilder<arrow::datatypes::Float32Type>;

            fn name() -> stratalog_core::$name_ty {
                stratalog_core::$name_ty::new_static($name)
            }

            fn arrow_datatype() -> &'static arrow::datatypes::DataType {
                static DATATYPE: once_cell::sync::Lazy<arrow::datatypes::DataType> =
                    once_cell::sync::Lazy::new(|| crate::datatypes::float_list_datatype($size));
                &DATATYPE
            }

            fn new_builder(capacity: usize) -> Self::Builder {
                stratalog_core::FixedSizeListCellBuilder::new(
                    crate::datatypes::item_field(arrow::datatypes::DataType::Float32),
                    $size,
                    capacity,
                )
            }

            fn append_to_builder(
                builder: &mut Self::Builder,
                value: &Self,
            ) -> stratalog_core::SerializationResult<()> {
                builder.append_values(&value.$field)
            }
        }
    };
}

/// Component wrapping one datatype value in field `.0`
macro_rules! delegate_component {
    ($ty:ty, $datatype:ty, $name:literal) => {
        impl stratalog_core::Loggable for $ty {
            type Name = stratalog_core::ComponentName;
            type Builder = <$datatype as stratalog_core::Loggable>::Builder;

            fn name() -> stratalog_core::ComponentName {
                stratalog_core::ComponentName::new_static($name)
            }

            fn arrow_datatype() -> &'static arrow::datatypes::DataType {
                <$datatype as stratalog_core::Loggable>::arrow_datatype()
            }

            fn new_builder(capacity: usize) -> Self::Builder {
                <$datatype as stratalog_core::Loggable>::new_builder(capacity)
            }

            fn append_to_builder(
                builder: &mut Self::Builder,
                value: &Self,
            ) -> stratalog_core::SerializationResult<()> {
                <$datatype as stratalog_core::Loggable>::append_to_builder(builder, &value.0)
            }

            fn heap_size_bytes(&self) -> usize {
                stratalog_core::Loggable::heap_size_bytes(&self.0)
            }
        }

        impl stratalog_core::Component for $ty {}

        impl From<$datatype> for $ty {
            fn from(value: $datatype) -> Self {
                Self(value)
            }
        }
    };
}

pub(crate) use delegate_component;
pub(crate) use impl_float_array_loggable;
pub(crate) use impl_primitive_loggable;
