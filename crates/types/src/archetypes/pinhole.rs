//! Pinhole camera archetype

use crate::components::{PinholeProjection, Resolution, ViewCoordinates};
use crate::datatypes::Vec2D;
use stratalog_core::{
    Archetype, ArchetypeCells, ArchetypeName, AsComponents, CellComposer, MemoryPool,
    SerializationResult,
};

/// Camera perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pinhole {
    /// Projection from image coordinates to camera coordinates
    pub image_from_camera: PinholeProjection,
    /// Image size in pixels
    pub resolution: Option<Resolution>,
    /// Camera axis convention; readers assume `RDF` when absent
    pub camera_xyz: Option<ViewCoordinates>,
}

impl Pinhole {
    /// Camera with only a projection
    pub fn new(image_from_camera: impl Into<PinholeProjection>) -> Self {
        Self {
            image_from_camera: image_from_camera.into(),
            resolution: None,
            camera_xyz: None,
        }
    }

    /// Camera with the principal point in the image center
    pub fn from_focal_length_and_resolution(
        focal_length: impl Into<Vec2D>,
        resolution: impl Into<Vec2D>,
    ) -> Self {
        let resolution = resolution.into();
        let principal_point = Vec2D::new(resolution.x() / 2.0, resolution.y() / 2.0);
        Self {
            image_from_camera: PinholeProjection::from_focal_length_and_principal_point(
                focal_length,
                principal_point,
            ),
            resolution: Some(Resolution(resolution)),
            camera_xyz: None,
        }
    }

    /// Set the image size
    pub fn with_resolution(mut self, resolution: impl Into<Resolution>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    /// Set the camera axis convention
    pub fn with_camera_xyz(mut self, camera_xyz: ViewCoordinates) -> Self {
        self.camera_xyz = Some(camera_xyz);
        self
    }
}

impl Archetype for Pinhole {
    fn name() -> ArchetypeName {
        ArchetypeName::new_static("stratalog.archetypes.Pinhole")
    }

    fn num_instances(&self) -> usize {
        1
    }
}

impl AsComponents for Pinhole {
    fn to_archetype_cells(&self, pool: &MemoryPool) -> SerializationResult<ArchetypeCells> {
        let mut composer = CellComposer::new(pool, 3);
        composer.push_one(&self.image_from_camera)?;
        composer.push_optional(self.resolution.as_ref())?;
        composer.push_optional(self.camera_xyz.as_ref())?;
        composer.finish(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_point_centered() {
        let pinhole = Pinhole::from_focal_length_and_resolution([300.0, 300.0], [640.0, 480.0]);
        let principal_point = pinhole.image_from_camera.principal_point();
        assert_eq!(principal_point, Vec2D::new(320.0, 240.0));
        assert_eq!(pinhole.resolution, Some(Resolution::new(640.0, 480.0)));
    }

    #[test]
    fn test_only_present_slots_serialized() {
        let pinhole = Pinhole::from_focal_length_and_resolution([300.0, 300.0], [640.0, 480.0]);
        let names: Vec<String> = pinhole
            .serialize()
            .unwrap()
            .iter()
            .map(|cell| cell.component_name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "stratalog.components.PinholeProjection",
                "stratalog.components.Resolution",
                "stratalog.components.PinholeIndicator",
            ]
        );
    }

    #[test]
    fn test_camera_xyz_after_resolution() {
        let pinhole = Pinhole::new(PinholeProjection::from_focal_length_and_principal_point(
            [1.0, 1.0],
            [0.5, 0.5],
        ))
        .with_camera_xyz(ViewCoordinates::RUB)
        .with_resolution([1.0, 1.0]);
        let cells = pinhole.serialize().unwrap();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1].component_name(), "stratalog.components.Resolution");
        assert_eq!(cells[2].component_name(), "stratalog.components.ViewCoordinates");
    }
}
