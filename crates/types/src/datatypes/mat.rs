//! Column-major float matrices

use crate::datatypes::Vec3D;
use crate::macros::impl_float_array_loggable;
use stratalog_core::Datatype;

/// A 3x3 matrix stored column-major
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat3x3 {
    /// Columns, concatenated
    pub flat_columns: [f32; 9],
}

/// A 4x4 matrix stored column-major
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat4x4 {
    /// Columns, concatenated
    pub flat_columns: [f32; 16],
}

impl Mat3x3 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        flat_columns: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Matrix from its three columns
    pub fn from_columns(columns: [Vec3D; 3]) -> Self {
        let mut flat_columns = [0.0; 9];
        for (chunk, column) in flat_columns.chunks_exact_mut(3).zip(columns) {
            chunk.copy_from_slice(&column.xyz);
        }
        Self { flat_columns }
    }

    /// Matrix from its three rows
    pub fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        let mut flat_columns = [0.0; 9];
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                flat_columns[col * 3 + row] = *value;
            }
        }
        Self { flat_columns }
    }

    /// Column `index`; panics if `index >= 3`
    pub fn column(&self, index: usize) -> Vec3D {
        let start = index * 3;
        Vec3D::new(
            self.flat_columns[start],
            self.flat_columns[start + 1],
            self.flat_columns[start + 2],
        )
    }
}

impl Mat4x4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        flat_columns: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };
}

impl From<[f32; 9]> for Mat3x3 {
    fn from(flat_columns: [f32; 9]) -> Self {
        Self { flat_columns }
    }
}

impl From<[f32; 16]> for Mat4x4 {
    fn from(flat_columns: [f32; 16]) -> Self {
        Self { flat_columns }
    }
}

impl_float_array_loggable!(Mat3x3, flat_columns, 9, DatatypeName, "stratalog.datatypes.Mat3x3");
impl_float_array_loggable!(Mat4x4, flat_columns, 16, DatatypeName, "stratalog.datatypes.Mat4x4");

impl Datatype for Mat3x3 {}
impl Datatype for Mat4x4 {}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::AsArray;
    use arrow::datatypes::Float32Type;
    use stratalog_core::Loggable;

    #[test]
    fn test_from_rows_is_column_major() {
        let mat = Mat3x3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(mat.flat_columns, [1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        assert_eq!(mat.column(1), Vec3D::new(2.0, 5.0, 8.0));
        assert_eq!(
            Mat3x3::from_columns([mat.column(0), mat.column(1), mat.column(2)]),
            mat
        );
    }

    #[test]
    fn test_mat4x4_serializes_sixteen_values() {
        let array = Mat4x4::to_arrow(&[Mat4x4::IDENTITY]).unwrap();
        let list = array.as_fixed_size_list();
        assert_eq!(list.value_length(), 16);
        assert_eq!(
            &list.values().as_primitive::<Float32Type>().values()[..],
            &Mat4x4::IDENTITY.flat_columns
        );
    }
}
