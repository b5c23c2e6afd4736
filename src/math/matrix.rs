use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use log::trace;
use ndarray::{arr2, Array2, ArrayBase, ArrayD, ArrayView2, Data, Ix2, MathCell};
use num_traits::{One, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::PrintOptions;
use crate::error::{LinalgError, Result};
use crate::math::buffer::{self, Buffer};
use crate::math::resolver::{self, Arg, Arguments, FixedArray};
use crate::math::vector::Vector3;

const MATRIX_SHAPE: [usize; 2] = [3, 3];

/// Row-major 3x3 matrix.
///
/// Built through the construction resolver like the vector types, except that
/// the call without arguments yields the identity matrix and the scalar form
/// takes nine values in row-major order.
#[derive(Debug)]
pub struct Matrix3x3<'a> {
    buffer: Buffer<'a, Ix2>,
}

impl<'a> FixedArray<'a> for Matrix3x3<'a> {
    type Dim = Ix2;

    const NAME: &'static str = "Matrix3x3";
    const KEY: &'static str = "matrix3x3";
    const SHAPE: &'static [usize] = &MATRIX_SHAPE;
    const COMPONENTS: &'static [&'static str] = &[];

    fn from_buffer(buffer: Buffer<'a, Ix2>) -> Self {
        Matrix3x3 { buffer }
    }

    fn default_array() -> Array2<f64> {
        Array2::eye(3)
    }

    fn copy_of(arg: &Arg<'a>) -> Option<Array2<f64>> {
        match arg {
            Arg::Matrix3x3(values) => Some(values.clone()),
            _ => None,
        }
    }
}

impl Matrix3x3<'static> {
    pub fn new(rows: [[f64; 3]; 3]) -> Self {
        Self::owned(arr2(&rows))
    }

    pub fn from_row_major(components: [f64; 9]) -> Self {
        let [a, b, c, d, e, f, g, h, i] = components;
        Self::new([[a, b, c], [d, e, f], [g, h, i]])
    }

    pub fn identity() -> Self {
        Self::owned(Array2::eye(3))
    }

    pub fn zeros() -> Self {
        Self::owned(Array2::zeros((3, 3)))
    }

    fn owned(array: Array2<f64>) -> Self {
        Matrix3x3 {
            buffer: Buffer::owned(array),
        }
    }
}

impl<'a> Matrix3x3<'a> {
    /// Builds a matrix from any accepted argument form.
    pub fn from_args(args: Arguments<'a>) -> Result<Self> {
        resolver::construct(args)
    }

    /// Aliases `cells`: writes through either handle are visible to both.
    pub fn view(cells: ArrayView2<'a, MathCell<f64>>) -> Result<Self> {
        Self::from_args(Arguments::new().arg(cells))
    }

    /// Takes ownership of `array` without copying it.
    pub fn from_array(array: Array2<f64>) -> Result<Self> {
        Self::from_args(Arguments::new().arg(array))
    }

    pub fn is_view(&self) -> bool {
        self.buffer.is_view()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.buffer.get((row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.buffer.set((row, col), value)
    }

    pub fn row(&self, row: usize) -> Vector3<'static> {
        Vector3::new(self.get(row, 0), self.get(row, 1), self.get(row, 2))
    }

    pub fn column(&self, col: usize) -> Vector3<'static> {
        Vector3::new(self.get(0, col), self.get(1, col), self.get(2, col))
    }

    pub fn to_array(&self) -> Array2<f64> {
        self.buffer.to_owned()
    }

    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        let mut rows = [[0.0; 3]; 3];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.get(r, c);
            }
        }
        rows
    }

    pub fn into_owned(self) -> Matrix3x3<'static> {
        Matrix3x3 {
            buffer: self.buffer.into_owned(),
        }
    }

    /// Overwrites the elements with the identity pattern in place.
    ///
    /// A matrix viewing external memory writes the pattern into that memory.
    pub fn make_identity(&mut self) {
        for row in 0..3 {
            for col in 0..3 {
                let value = if row == col { f64::one() } else { f64::zero() };
                self.buffer.set((row, col), value);
            }
        }
    }

    /// Exact comparison against the identity pattern, no tolerance.
    pub fn is_identity(&self) -> bool {
        (0..3).all(|row| {
            (0..3).all(|col| {
                let expected = if row == col { f64::one() } else { f64::zero() };
                self.get(row, col) == expected
            })
        })
    }

    pub fn transpose(&self) -> Matrix3x3<'static> {
        Matrix3x3::owned(self.to_array().t().to_owned())
    }

    pub fn determinant(&self) -> f64 {
        let [[a, b, c], [d, e, f], [g, h, i]] = self.to_rows();
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// Inverse through the adjugate. Fails when the determinant is exactly zero.
    pub fn inverse(&self) -> Result<Matrix3x3<'static>> {
        let determinant = self.determinant();
        if determinant.is_zero() {
            return Err(LinalgError::Singular { determinant });
        }
        let [[a, b, c], [d, e, f], [g, h, i]] = self.to_rows();
        let adjugate = Matrix3x3::new([
            [e * i - f * h, c * h - b * i, b * f - c * e],
            [f * g - d * i, a * i - c * g, c * d - a * f],
            [d * h - e * g, b * g - a * h, a * e - b * d],
        ]);
        Ok(&adjugate * (1.0 / determinant))
    }

    /// `self · rhs` for a raw 3x3 ndarray operand.
    pub fn dot<S>(&self, rhs: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
    where
        S: Data<Elem = f64>,
    {
        check_square(rhs.shape())?;
        Ok(self.to_array().dot(rhs))
    }

    /// `lhs · self` for a raw 3x3 ndarray operand.
    pub fn rdot<S>(&self, lhs: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
    where
        S: Data<Elem = f64>,
    {
        check_square(lhs.shape())?;
        Ok(lhs.dot(&self.to_array()))
    }

    /// `self * operand` where the operand is a scalar or anything 3x3.
    ///
    /// Scalars broadcast over every element; everything else is a matrix
    /// product. The result is always a new owned matrix.
    pub fn try_mul<'b>(&self, operand: impl Into<Arg<'b>>) -> Result<Matrix3x3<'static>> {
        match Operand::resolve(operand.into())? {
            Operand::Scalar(k) => Ok(self * k),
            Operand::Matrix(rhs) => Ok(Matrix3x3::owned(self.to_array().dot(&rhs))),
        }
    }

    /// `operand * self`, the right-hand counterpart of [`Matrix3x3::try_mul`].
    pub fn try_rmul<'b>(&self, operand: impl Into<Arg<'b>>) -> Result<Matrix3x3<'static>> {
        match Operand::resolve(operand.into())? {
            Operand::Scalar(k) => Ok(k * self),
            Operand::Matrix(lhs) => Ok(Matrix3x3::owned(lhs.dot(&self.to_array()))),
        }
    }

    pub fn format_with(&self, options: &PrintOptions) -> String {
        options.format_rows(self.to_array().view())
    }
}

fn shape_mismatch(found: Vec<usize>) -> LinalgError {
    LinalgError::ShapeMismatch {
        expected: MATRIX_SHAPE.to_vec(),
        found,
    }
}

fn check_square(shape: &[usize]) -> Result<()> {
    if shape != &MATRIX_SHAPE[..] {
        return Err(shape_mismatch(shape.to_vec()));
    }
    Ok(())
}

enum Operand {
    Scalar(f64),
    Matrix(Array2<f64>),
}

impl Operand {
    fn resolve(arg: Arg<'_>) -> Result<Operand> {
        trace!("matrix product operand: {}", arg.describe());
        match arg {
            Arg::Scalar(k) => Ok(Operand::Scalar(k)),
            Arg::Matrix3x3(values) => Ok(Operand::Matrix(values)),
            Arg::View(cells) => Self::square(cells.map(|cell| cell.get())),
            Arg::Array(array) => Self::square(array),
            Arg::List(values) => Self::square(buffer::materialize_list(values)),
            Arg::Rows(rows) => {
                let found = vec![rows.len()];
                match buffer::materialize_rows(rows) {
                    Some(array) => Self::square(array),
                    None => Err(shape_mismatch(found)),
                }
            }
            Arg::Vector2(values) | Arg::Vector3(values) => {
                Err(shape_mismatch(values.shape().to_vec()))
            }
            Arg::Empty => Err(shape_mismatch(Vec::new())),
        }
    }

    fn square(array: ArrayD<f64>) -> Result<Operand> {
        check_square(array.shape())?;
        array
            .into_dimensionality::<Ix2>()
            .map(Operand::Matrix)
            .map_err(|_| shape_mismatch(MATRIX_SHAPE.to_vec()))
    }
}

/// Deep copy; the clone never aliases the original storage.
impl Clone for Matrix3x3<'_> {
    fn clone(&self) -> Self {
        Matrix3x3 {
            buffer: Buffer::owned(self.to_array()),
        }
    }
}

impl PartialEq<Matrix3x3<'_>> for Matrix3x3<'_> {
    fn eq(&self, other: &Matrix3x3<'_>) -> bool {
        self.to_rows() == other.to_rows()
    }
}

impl fmt::Display for Matrix3x3<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&PrintOptions::default()))
    }
}

impl Mul<f64> for &Matrix3x3<'_> {
    type Output = Matrix3x3<'static>;

    fn mul(self, rhs: f64) -> Self::Output {
        Matrix3x3::owned(self.buffer.map(|v| v * rhs))
    }
}

impl Mul<f64> for Matrix3x3<'_> {
    type Output = Matrix3x3<'static>;

    fn mul(self, rhs: f64) -> Self::Output {
        &self * rhs
    }
}

impl Mul<&Matrix3x3<'_>> for f64 {
    type Output = Matrix3x3<'static>;

    fn mul(self, rhs: &Matrix3x3<'_>) -> Self::Output {
        rhs * self
    }
}

impl Mul<&Matrix3x3<'_>> for &Matrix3x3<'_> {
    type Output = Matrix3x3<'static>;

    fn mul(self, rhs: &Matrix3x3<'_>) -> Self::Output {
        Matrix3x3::owned(self.to_array().dot(&rhs.to_array()))
    }
}

impl Mul<Matrix3x3<'_>> for Matrix3x3<'_> {
    type Output = Matrix3x3<'static>;

    fn mul(self, rhs: Matrix3x3<'_>) -> Self::Output {
        &self * &rhs
    }
}

impl Mul<&Vector3<'_>> for &Matrix3x3<'_> {
    type Output = Vector3<'static>;

    fn mul(self, rhs: &Vector3<'_>) -> Self::Output {
        let product = self.to_array().dot(&rhs.to_array());
        Vector3::new(product[0], product[1], product[2])
    }
}

impl Add<&Matrix3x3<'_>> for &Matrix3x3<'_> {
    type Output = Matrix3x3<'static>;

    fn add(self, rhs: &Matrix3x3<'_>) -> Self::Output {
        Matrix3x3::owned(&self.to_array() + &rhs.to_array())
    }
}

impl Sub<&Matrix3x3<'_>> for &Matrix3x3<'_> {
    type Output = Matrix3x3<'static>;

    fn sub(self, rhs: &Matrix3x3<'_>) -> Self::Output {
        Matrix3x3::owned(&self.to_array() - &rhs.to_array())
    }
}

impl Neg for &Matrix3x3<'_> {
    type Output = Matrix3x3<'static>;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl AddAssign<&Matrix3x3<'_>> for Matrix3x3<'_> {
    fn add_assign(&mut self, rhs: &Matrix3x3<'_>) {
        let sum = &self.to_array() + &rhs.to_array();
        self.buffer.assign(&sum);
    }
}

impl SubAssign<&Matrix3x3<'_>> for Matrix3x3<'_> {
    fn sub_assign(&mut self, rhs: &Matrix3x3<'_>) {
        let difference = &self.to_array() - &rhs.to_array();
        self.buffer.assign(&difference);
    }
}

impl MulAssign<f64> for Matrix3x3<'_> {
    fn mul_assign(&mut self, rhs: f64) {
        self.buffer.update(|v| v * rhs);
    }
}

impl Serialize for Matrix3x3<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Matrix3x3<'static> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <[[f64; 3]; 3]>::deserialize(deserializer).map(Matrix3x3::new)
    }
}
