//! Semantic meaning of the three axes of a 3D space
//!
//! Each axis is one of six directions, encoded as a byte:
//!
//! | value | direction |
//! |-------|-----------|
//! | 1     | Up        |
//! | 2     | Down      |
//! | 3     | Right     |
//! | 4     | Left      |
//! | 5     | Forward   |
//! | 6     | Back      |

use crate::datatypes::item_field;
use arrow::datatypes::{DataType, UInt8Type};
use once_cell::sync::Lazy;
use std::fmt;
use stratalog_core::{
    Component, ComponentName, FixedSizeListCellBuilder, Loggable, SerializationResult,
};

/// Direction of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ViewDir {
    /// Up
    Up = 1,
    /// Down
    Down = 2,
    /// Right
    Right = 3,
    /// Left
    Left = 4,
    /// Forward
    Forward = 5,
    /// Back
    Back = 6,
}

impl ViewDir {
    fn short(self) -> char {
        match self {
            ViewDir::Up => 'U',
            ViewDir::Down => 'D',
            ViewDir::Right => 'R',
            ViewDir::Left => 'L',
            ViewDir::Forward => 'F',
            ViewDir::Back => 'B',
        }
    }

    fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(ViewDir::Up),
            2 => Some(ViewDir::Down),
            3 => Some(ViewDir::Right),
            4 => Some(ViewDir::Left),
            5 => Some(ViewDir::Forward),
            6 => Some(ViewDir::Back),
            _ => None,
        }
    }
}

/// Directions of the X, Y and Z axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewCoordinates(pub [u8; 3]);

impl ViewCoordinates {
    /// X=Right, Y=Down, Z=Forward; the usual camera convention
    pub const RDF: Self = Self::new(ViewDir::Right, ViewDir::Down, ViewDir::Forward);

    /// X=Right, Y=Up, Z=Back
    pub const RUB: Self = Self::new(ViewDir::Right, ViewDir::Up, ViewDir::Back);

    /// X=Right, Y=Forward, Z=Up
    pub const RFU: Self = Self::new(ViewDir::Right, ViewDir::Forward, ViewDir::Up);

    /// X=Forward, Y=Left, Z=Up
    pub const FLU: Self = Self::new(ViewDir::Forward, ViewDir::Left, ViewDir::Up);

    /// Coordinates from three axis directions
    pub const fn new(x: ViewDir, y: ViewDir, z: ViewDir) -> Self {
        Self([x as u8, y as u8, z as u8])
    }

    /// Axis directions, `None` for bytes outside 1..=6
    pub fn axes(&self) -> [Option<ViewDir>; 3] {
        self.0.map(ViewDir::from_u8)
    }
}

impl fmt::Display for ViewCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.axes() {
            match axis {
                Some(dir) => write!(f, "{}", dir.short())?,
                None => f.write_str("?")?,
            }
        }
        Ok(())
    }
}

static DATATYPE: Lazy<DataType> =
    Lazy::new(|| DataType::FixedSizeList(item_field(DataType::UInt8), 3));

impl Loggable for ViewCoordinates {
    type Name = ComponentName;
    type Builder = FixedSizeListCellBuilder<UInt8Type>;

    fn name() -> ComponentName {
        ComponentName::new_static("stratalog.components.ViewCoordinates")
    }

    fn arrow_datatype() -> &'static DataType {
        &DATATYPE
    }

    fn new_builder(capacity: usize) -> Self::Builder {
        FixedSizeListCellBuilder::new(item_field(DataType::UInt8), 3, capacity)
    }

    fn append_to_builder(builder: &mut Self::Builder, value: &Self) -> SerializationResult<()> {
        builder.append_values(&value.0)
    }
}

impl Component for ViewCoordinates {}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::AsArray;

    #[test]
    fn test_display() {
        assert_eq!(ViewCoordinates::RDF.to_string(), "RDF");
        assert_eq!(ViewCoordinates([3, 9, 5]).to_string(), "R?F");
    }

    #[test]
    fn test_serialized_bytes() {
        let cell = ViewCoordinates::to_data_cell(&[ViewCoordinates::RUB]).unwrap();
        assert_eq!(cell.component_name(), "stratalog.components.ViewCoordinates");
        let list = cell.array().as_fixed_size_list();
        assert_eq!(&list.values().as_primitive::<UInt8Type>().values()[..], &[3, 1, 6]);
    }
}
