//! A 3D transform as a dense union of its two representations

use crate::datatypes::{TranslationAndMat3x3, TranslationRotationScale3D};
use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, UnionFields, UnionMode};
use once_cell::sync::Lazy;
use stratalog_core::{
    dense_union_fields, CellBuilder, Datatype, DatatypeName, DenseUnionLayout, Loggable,
    SerializationResult,
};

/// Representation of a 3D transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform3D {
    /// Translation plus 3x3 matrix
    TranslationAndMat3x3(TranslationAndMat3x3),
    /// Translation, rotation and scale
    TranslationRotationScale(TranslationRotationScale3D),
}

impl Transform3D {
    /// Identity transform
    pub const IDENTITY: Self =
        Transform3D::TranslationRotationScale(TranslationRotationScale3D::IDENTITY);

    fn type_id(&self) -> i8 {
        match self {
            Transform3D::TranslationAndMat3x3(_) => 1,
            Transform3D::TranslationRotationScale(_) => 2,
        }
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<TranslationAndMat3x3> for Transform3D {
    fn from(transform: TranslationAndMat3x3) -> Self {
        Transform3D::TranslationAndMat3x3(transform)
    }
}

impl From<TranslationRotationScale3D> for Transform3D {
    fn from(transform: TranslationRotationScale3D) -> Self {
        Transform3D::TranslationRotationScale(transform)
    }
}

static FIELDS: Lazy<UnionFields> = Lazy::new(|| {
    dense_union_fields(vec![
        Field::new(
            "TranslationAndMat3x3",
            TranslationAndMat3x3::arrow_datatype().clone(),
            false,
        ),
        Field::new(
            "TranslationRotationScale",
            TranslationRotationScale3D::arrow_datatype().clone(),
            false,
        ),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Union(FIELDS.clone(), UnionMode::Dense));

/// Builder for [`Transform3D`]
#[derive(Debug)]
pub struct Transform3DBuilder {
    layout: DenseUnionLayout,
    translation_and_mat3x3: <TranslationAndMat3x3 as Loggable>::Builder,
    translation_rotation_scale: <TranslationRotationScale3D as Loggable>::Builder,
}

impl CellBuilder for Transform3DBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.push_null();
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let translation_and_mat3x3 = self.translation_and_mat3x3.finish()?;
        let translation_rotation_scale = self.translation_rotation_scale.finish()?;
        self.layout
            .finish(vec![translation_and_mat3x3, translation_rotation_scale])
    }
}

impl Loggable for Transform3D {
    type Name = DatatypeName;
    type Builder = Transform3DBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.Transform3D")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> Transform3DBuilder {
        Transform3DBuilder {
            layout: DenseUnionLayout::new(FIELDS.clone(), capacity),
            translation_and_mat3x3: TranslationAndMat3x3::new_builder(0),
            translation_rotation_scale: TranslationRotationScale3D::new_builder(0),
        }
    }

    fn append_to_builder(builder: &mut Transform3DBuilder, value: &Self) -> SerializationResult<()> {
        builder.layout.push(value.type_id())?;
        match value {
            Transform3D::TranslationAndMat3x3(transform) => TranslationAndMat3x3::append_to_builder(
                &mut builder.translation_and_mat3x3,
                transform,
            ),
            Transform3D::TranslationRotationScale(transform) => {
                TranslationRotationScale3D::append_to_builder(
                    &mut builder.translation_rotation_scale,
                    transform,
                )
            }
        }
    }
}

impl Datatype for Transform3D {}
