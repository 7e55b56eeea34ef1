use crate::datatypes::{append_optional, Mat3x3, Vec3D};
use arrow::array::{ArrayRef, BooleanBuilder};
use arrow::datatypes::{DataType, Field, Fields};
use once_cell::sync::Lazy;
use stratalog_core::{
    CellBuilder, Datatype, DatatypeName, Loggable, SerializationResult, StructLayout,
};

/// Translation followed by a 3x3 matrix transform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TranslationAndMat3x3 {
    /// Translation, applied after the matrix
    pub translation: Option<Vec3D>,
    /// 3x3 transformation (rotation, scale, shear)
    pub mat3x3: Option<Mat3x3>,
    /// True if the transform maps from the parent space to this space
    pub from_parent: bool,
}

impl TranslationAndMat3x3 {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        translation: None,
        mat3x3: None,
        from_parent: false,
    };

    /// Translation and matrix
    pub fn new(translation: impl Into<Vec3D>, mat3x3: impl Into<Mat3x3>) -> Self {
        Self {
            translation: Some(translation.into()),
            mat3x3: Some(mat3x3.into()),
            from_parent: false,
        }
    }

    /// Translation only
    pub fn translation(translation: impl Into<Vec3D>) -> Self {
        Self {
            translation: Some(translation.into()),
            ..Self::IDENTITY
        }
    }

    /// Matrix only
    pub fn from_mat3x3(mat3x3: impl Into<Mat3x3>) -> Self {
        Self {
            mat3x3: Some(mat3x3.into()),
            ..Self::IDENTITY
        }
    }

    /// Mark the transform as mapping from the parent space
    pub fn from_parent(mut self) -> Self {
        self.from_parent = true;
        self
    }
}

static FIELDS: Lazy<Fields> = Lazy::new(|| {
    Fields::from(vec![
        Field::new("translation", Vec3D::arrow_datatype().clone(), true),
        Field::new("mat3x3", Mat3x3::arrow_datatype().clone(), true),
        Field::new("from_parent", DataType::Boolean, false),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Struct(FIELDS.clone()));

/// Builder for [`TranslationAndMat3x3`]
#[derive(Debug)]
pub struct TranslationAndMat3x3Builder {
    layout: StructLayout,
    translation: <Vec3D as Loggable>::Builder,
    mat3x3: <Mat3x3 as Loggable>::Builder,
    from_parent: BooleanBuilder,
}

impl CellBuilder for TranslationAndMat3x3Builder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.append(false);
        self.translation.append_null();
        self.mat3x3.append_null();
        self.from_parent.append_value(false);
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let translation = self.translation.finish()?;
        let mat3x3 = self.mat3x3.finish()?;
        let from_parent = CellBuilder::finish(self.from_parent)?;
        self.layout.finish(vec![translation, mat3x3, from_parent])
    }
}

impl Loggable for TranslationAndMat3x3 {
    type Name = DatatypeName;
    type Builder = TranslationAndMat3x3Builder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.TranslationAndMat3x3")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> TranslationAndMat3x3Builder {
        TranslationAndMat3x3Builder {
            layout: StructLayout::new(FIELDS.clone(), capacity),
            translation: Vec3D::new_builder(capacity),
            mat3x3: Mat3x3::new_builder(capacity),
            from_parent: BooleanBuilder::with_capacity(capacity),
        }
    }

    fn append_to_builder(
        builder: &mut TranslationAndMat3x3Builder,
        value: &Self,
    ) -> SerializationResult<()> {
        append_optional(&mut builder.translation, value.translation.as_ref())?;
        append_optional(&mut builder.mat3x3, value.mat3x3.as_ref())?;
        builder.from_parent.append_value(value.from_parent);
        builder.layout.append(true);
        Ok(())
    }
}

impl Datatype for TranslationAndMat3x3 {}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};

    #[test]
    fn test_absent_fields_are_null() {
        let transform = TranslationAndMat3x3::translation([1.0, 2.0, 3.0]).from_parent();
        let array = TranslationAndMat3x3::to_arrow(&[transform]).unwrap();
        let structs = array.as_struct();
        assert!(structs.column(0).is_valid(0));
        assert!(structs.column(1).is_null(0));
        assert!(structs.column(2).as_boolean().value(0));
    }
}
