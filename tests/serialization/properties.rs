//! Property tests over arbitrary batches and shapes.

use arrow::array::AsArray;
use arrow::datatypes::{Float32Type, UInt32Type};
use proptest::prelude::*;
use stratalog::archetypes::Tensor;
use stratalog::components::{Color, Position3D};
use stratalog::{AsComponents, Component, ErrorKind};

proptest! {
    #[test]
    fn positions_preserve_values(coords in prop::collection::vec(any::<[i16; 3]>(), 0..32)) {
        let positions: Vec<Position3D> = coords
            .iter()
            .map(|[x, y, z]| Position3D::new(*x as f32, *y as f32, *z as f32))
            .collect();
        let cell = Position3D::to_data_cell(&positions).unwrap();
        prop_assert_eq!(cell.num_instances(), positions.len());

        let flat: Vec<f32> = coords
            .iter()
            .flat_map(|xyz| xyz.map(f32::from))
            .collect();
        let list = cell.array().as_fixed_size_list();
        let values = list.values().as_primitive::<Float32Type>();
        prop_assert_eq!(&values.values()[..], &flat[..]);
    }

    #[test]
    fn colors_preserve_packing(rgba in prop::collection::vec(any::<u32>(), 0..32)) {
        let colors: Vec<Color> = rgba.iter().copied().map(Color::from).collect();
        let cell = Color::to_data_cell(&colors).unwrap();
        let values = cell.array().as_primitive::<UInt32Type>();
        prop_assert_eq!(&values.values()[..], &rgba[..]);
    }

    #[test]
    fn tensor_shape_check(sizes in prop::collection::vec(1u64..5, 0..4), extra in 0usize..3) {
        let expected: u64 = sizes.iter().product();
        let elements = vec![0u8; expected as usize + extra];
        let result = Tensor::from_elements(sizes, elements).serialize();
        if extra == 0 {
            prop_assert_eq!(result.unwrap().len(), 2);
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::SizeMismatch);
        }
    }
}
