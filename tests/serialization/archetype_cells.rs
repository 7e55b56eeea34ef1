//! Cell lists produced by archetypes: order, indicator and absent slots.

use crate::common::*;
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type};
use stratalog::archetypes::{Mesh3D, Pinhole, Tensor, Transform3D};
use stratalog::components::{self, Color, Position3D, ViewCoordinates};
use stratalog::datatypes::{Mat3x3, TranslationAndMat3x3, Vec3D};
use stratalog::{
    Archetype, ArchetypeCells, ArchetypeName, AsComponents, CellComposer, CellKind, Component,
    Loggable, SerializationResult,
};

/// Archetype whose every slot is optional
struct Swatch {
    color: Option<Color>,
    position: Option<Position3D>,
}

impl Archetype for Swatch {
    fn name() -> ArchetypeName {
        ArchetypeName::new_static("stratalog.archetypes.Swatch")
    }

    fn num_instances(&self) -> usize {
        1
    }
}

impl AsComponents for Swatch {
    fn to_archetype_cells(&self, pool: &MemoryPool) -> SerializationResult<ArchetypeCells> {
        let mut composer = CellComposer::new(pool, 2);
        composer.push_optional(self.color.as_ref())?;
        composer.push_optional(self.position.as_ref())?;
        composer.finish(self)
    }
}

#[test]
fn borrowed_vec3d_batch_is_one_cell() {
    let pool = test_pool("borrowed_vec3d");
    let positions = vec![Position3D::new(1.0, 2.0, 3.0), Position3D::new(4.0, 5.0, 6.0)];
    let cell = Position3D::to_data_cell_with(&pool, &positions).unwrap();

    assert_eq!(cell.component_name(), "stratalog.components.Position3D");
    assert_eq!(cell.kind(), CellKind::Component);
    let list = cell.array().as_fixed_size_list();
    assert_eq!(list.len(), 2);
    let values = list.values().as_primitive::<Float32Type>();
    assert_eq!(&values.values()[..], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(pool.in_use(), 0);
}

#[test]
fn empty_batch_is_empty_array() {
    let cell = Position3D::to_data_cell(&[]).unwrap();
    assert_eq!(cell.num_instances(), 0);
    assert_eq!(cell.datatype(), Position3D::arrow_datatype());
}

#[test]
fn empty_required_slot_still_serializes() {
    let positions: Vec<Position3D> = Vec::new();
    let cells = Mesh3D::new(&positions).serialize().unwrap();
    assert_eq!(short_names(&cells), ["Position3D", "Mesh3DIndicator"]);
    assert_eq!(cells[1].datatype(), &DataType::Null);
    assert_eq!(cells[1].num_instances(), 0);
}

#[test]
fn all_absent_slots_yield_indicator_only() {
    let swatch = Swatch {
        color: None,
        position: None,
    };
    let cells = swatch.serialize().unwrap();
    assert_eq!(cells.len(), 1);
    assert!(cells[0].is_indicator());
    assert_eq!(cells[0].component_name(), "stratalog.components.SwatchIndicator");
    assert_eq!(cells[0].num_instances(), 1);

    let swatch = Swatch {
        color: None,
        position: Some(Position3D::new(1.0, 0.0, 0.0)),
    };
    assert_eq!(
        short_names(&swatch.serialize().unwrap()),
        ["Position3D", "SwatchIndicator"]
    );
}

#[test]
fn subset_of_slots_keeps_declared_order() {
    let mesh = Mesh3D::new(vec![Position3D::new(0.0, 0.0, 0.0)])
        .with_class_ids(vec![components::ClassId::from(7)])
        .with_vertex_colors(vec![Color::from_rgb(1, 2, 3)]);
    let cells = mesh.serialize().unwrap();
    assert_eq!(
        short_names(&cells),
        ["Position3D", "Color", "ClassId", "Mesh3DIndicator"]
    );
}

#[test]
fn indicator_is_always_last() {
    let pinhole = Pinhole::from_focal_length_and_resolution([500.0, 500.0], [1280.0, 720.0])
        .with_camera_xyz(ViewCoordinates::RDF);
    let transform = Transform3D::new(TranslationAndMat3x3::new(
        Vec3D::new(0.0, 0.0, 1.0),
        Mat3x3::IDENTITY,
    ));
    let tensor = Tensor::from_elements([1], vec![1.0f64]);

    for cells in [
        pinhole.serialize().unwrap(),
        transform.serialize().unwrap(),
        tensor.serialize().unwrap(),
    ] {
        let (last, rest) = cells.split_last().unwrap();
        assert!(last.is_indicator());
        assert!(rest.iter().all(|cell| !cell.is_indicator()));
    }
}

#[test]
fn archetype_cells_carry_archetype_name() {
    let pool = test_pool("archetype_name");
    let cells = Transform3D::IDENTITY.to_archetype_cells(&pool).unwrap();
    assert_eq!(cells.archetype_name().short_name(), "Transform3D");
    assert_eq!(cells.component_cells().count(), 1);
    assert_eq!(
        cells.indicator().map(|cell| cell.component_name().as_str()),
        Some("stratalog.components.Transform3DIndicator")
    );
}

#[test]
fn component_cell_matches_datatype_schema() {
    let cell = components::PinholeProjection::to_data_cell(&[
        components::PinholeProjection::from_focal_length_and_principal_point([2.0, 3.0], [1.0, 1.0]),
    ])
    .unwrap();
    assert_eq!(cell.datatype(), Mat3x3::arrow_datatype());
    assert!(!components::PinholeProjection::is_indicator());
}
