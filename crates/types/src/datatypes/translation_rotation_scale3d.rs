use crate::datatypes::{append_optional, Rotation3D, Scale3D, Vec3D};
use arrow::array::{ArrayRef, BooleanBuilder};
use arrow::datatypes::{DataType, Field, Fields};
use once_cell::sync::Lazy;
use stratalog_core::{
    CellBuilder, Datatype, DatatypeName, Loggable, SerializationResult, StructLayout,
};

/// Translation, rotation and scale, applied scale first
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TranslationRotationScale3D {
    /// Translation, applied last
    pub translation: Option<Vec3D>,
    /// Rotation, applied after scale
    pub rotation: Option<Rotation3D>,
    /// Scale, applied first
    pub scale: Option<Scale3D>,
    /// True if the transform maps from the parent space to this space
    pub from_parent: bool,
}

impl TranslationRotationScale3D {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        translation: None,
        rotation: None,
        scale: None,
        from_parent: false,
    };

    /// Translation only
    pub fn translation(translation: impl Into<Vec3D>) -> Self {
        Self {
            translation: Some(translation.into()),
            ..Self::IDENTITY
        }
    }

    /// Rotation only
    pub fn rotation(rotation: impl Into<Rotation3D>) -> Self {
        Self {
            rotation: Some(rotation.into()),
            ..Self::IDENTITY
        }
    }

    /// Scale only
    pub fn scale(scale: impl Into<Scale3D>) -> Self {
        Self {
            scale: Some(scale.into()),
            ..Self::IDENTITY
        }
    }

    /// Replace the translation
    pub fn with_translation(mut self, translation: impl Into<Vec3D>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    /// Replace the rotation
    pub fn with_rotation(mut self, rotation: impl Into<Rotation3D>) -> Self {
        self.rotation = Some(rotation.into());
        self
    }

    /// Replace the scale
    pub fn with_scale(mut self, scale: impl Into<Scale3D>) -> Self {
        self.scale = Some(scale.into());
        self
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
        Field::new("rotation", Rotation3D::arrow_datatype().clone(), true),
        Field::new("scale", Scale3D::arrow_datatype().clone(), true),
        Field::new("from_parent", DataType::Boolean, false),
    ])
});

static DATATYPE: Lazy<DataType> = Lazy::new(|| DataType::Struct(FIELDS.clone()));

/// Builder for [`TranslationRotationScale3D`]
#[derive(Debug)]
pub struct TranslationRotationScale3DBuilder {
    layout: StructLayout,
    translation: <Vec3D as Loggable>::Builder,
    rotation: <Rotation3D as Loggable>::Builder,
    scale: <Scale3D as Loggable>::Builder,
    from_parent: BooleanBuilder,
}

impl CellBuilder for TranslationRotationScale3DBuilder {
    fn len(&self) -> usize {
        self.layout.len()
    }

    fn append_null(&mut self) {
        self.layout.append(false);
        self.translation.append_null();
        self.rotation.append_null();
        self.scale.append_null();
        self.from_parent.append_value(false);
    }

    fn finish(self) -> SerializationResult<ArrayRef> {
        let translation = self.translation.finish()?;
        let rotation = self.rotation.finish()?;
        let scale = self.scale.finish()?;
        let from_parent = CellBuilder::finish(self.from_parent)?;
        self.layout
            .finish(vec![translation, rotation, scale, from_parent])
    }
}

impl Loggable for TranslationRotationScale3D {
    type Name = DatatypeName;
    type Builder = TranslationRotationScale3DBuilder;

    fn name() -> DatatypeName {
        DatatypeName::new_static("stratalog.datatypes.TranslationRotationScale3D")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> TranslationRotationScale3DBuilder {
        TranslationRotationScale3DBuilder {
            layout: StructLayout::new(FIELDS.clone(), capacity),
            translation: Vec3D::new_builder(capacity),
            rotation: Rotation3D::new_builder(capacity),
            scale: Scale3D::new_builder(capacity),
            from_parent: BooleanBuilder::with_capacity(capacity),
        }
    }

    fn append_to_builder(
        builder: &mut TranslationRotationScale3DBuilder,
        value: &Self,
    ) -> SerializationResult<()> {
        append_optional(&mut builder.translation, value.translation.as_ref())?;
        append_optional(&mut builder.rotation, value.rotation.as_ref())?;
        append_optional(&mut builder.scale, value.scale.as_ref())?;
        builder.from_parent.append_value(value.from_parent);
        builder.layout.append(true);
        Ok(())
    }
}

impl Datatype for TranslationRotationScale3D {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{Angle, RotationAxisAngle};
    use arrow::array::{Array, AsArray, UnionArray};

    #[test]
    fn test_absent_rotation_is_null_marker() {
        let transform = TranslationRotationScale3D::translation([1.0, 0.0, 0.0]).with_scale(2.0_f32);
        let array = TranslationRotationScale3D::to_arrow(&[transform]).unwrap();
        let structs = array.as_struct();

        let rotation = structs
            .column(1)
            .as_any()
            .downcast_ref::<UnionArray>()
            .unwrap();
        assert_eq!(rotation.type_id(0), 0);

        let scale = structs.column(2).as_any().downcast_ref::<UnionArray>().unwrap();
        assert_eq!(scale.type_id(0), 2);
    }

    #[test]
    fn test_axis_angle_rotation() {
        let rotation = RotationAxisAngle::new([0.0, 1.0, 0.0], Angle::Radians(0.5));
        let transform = TranslationRotationScale3D::rotation(rotation).from_parent();
        assert!(transform.from_parent);
        let array = TranslationRotationScale3D::to_arrow(&[transform, TranslationRotationScale3D::IDENTITY])
            .unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array.data_type(), TranslationRotationScale3D::arrow_datatype());
    }
}
