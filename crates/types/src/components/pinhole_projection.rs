use crate::datatypes::{Mat3x3, Vec2D};
use crate::macros::delegate_component;

/// Camera projection from image space to camera space
///
/// The matrix is the usual intrinsics matrix `K`:
///
/// ```text
/// fx  0 cx
///  0 fy cy
///  0  0  1
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeProjection(pub Mat3x3);

impl PinholeProjection {
    /// Projection with focal lengths and principal point, in pixels
    pub fn from_focal_length_and_principal_point(
        focal_length: impl Into<Vec2D>,
        principal_point: impl Into<Vec2D>,
    ) -> Self {
        let focal_length = focal_length.into();
        let principal_point = principal_point.into();
        Self(Mat3x3::from_rows([
            [focal_length.x(), 0.0, principal_point.x()],
            [0.0, focal_length.y(), principal_point.y()],
            [0.0, 0.0, 1.0],
        ]))
    }

    /// Focal lengths `[fx, fy]`
    pub fn focal_length(&self) -> Vec2D {
        Vec2D::new(self.0.flat_columns[0], self.0.flat_columns[4])
    }

    /// Principal point `[cx, cy]`
    pub fn principal_point(&self) -> Vec2D {
        Vec2D::new(self.0.flat_columns[6], self.0.flat_columns[7])
    }
}

delegate_component!(PinholeProjection, Mat3x3, "stratalog.components.PinholeProjection");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsics_layout() {
        let projection =
            PinholeProjection::from_focal_length_and_principal_point([500.0, 400.0], [320.0, 240.0]);
        assert_eq!(projection.focal_length(), Vec2D::new(500.0, 400.0));
        assert_eq!(projection.principal_point(), Vec2D::new(320.0, 240.0));
        assert_eq!(projection.0.flat_columns[8], 1.0);
    }
}
