use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use ndarray::{arr1, Array1, ArrayView1, Ix1, MathCell};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::PrintOptions;
use crate::error::Result;
use crate::math::buffer::Buffer;
use crate::math::resolver::{self, Arg, Arguments, FixedArray};

/// Read and write access shared by every fixed-size vector.
///
/// Components are read straight from the backing buffer, so a vector that
/// aliases external memory always reports the current values.
pub trait BaseVector {
    const DIM: usize;

    fn component(&self, index: usize) -> f64;

    fn set_component(&mut self, index: usize, value: f64);

    fn x(&self) -> f64 {
        self.component(0)
    }

    fn y(&self) -> f64 {
        self.component(1)
    }

    fn set_x(&mut self, value: f64) {
        self.set_component(0, value)
    }

    fn set_y(&mut self, value: f64) {
        self.set_component(1, value)
    }

    fn components(&self) -> Vec<f64> {
        (0..Self::DIM).map(|i| self.component(i)).collect()
    }
}

/// Two-component vector.
#[derive(Debug)]
pub struct Vector2<'a> {
    buffer: Buffer<'a, Ix1>,
}

/// Three-component vector.
#[derive(Debug)]
pub struct Vector3<'a> {
    buffer: Buffer<'a, Ix1>,
}

impl Vector2<'static> {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2 {
            buffer: Buffer::owned(arr1(&[x, y])),
        }
    }

    pub fn zeros() -> Self {
        Vector2::new(0.0, 0.0)
    }
}

impl<'a> Vector2<'a> {
    /// New owned `Vector3` from `x`, `y` and `third`.
    pub fn to_v3f(&self, third: f64) -> Vector3<'static> {
        Vector3::new(self.x(), self.y(), third)
    }
}

impl Vector3<'static> {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 {
            buffer: Buffer::owned(arr1(&[x, y, z])),
        }
    }

    pub fn zeros() -> Self {
        Vector3::new(0.0, 0.0, 0.0)
    }
}

impl<'a> Vector3<'a> {
    pub fn z(&self) -> f64 {
        self.component(2)
    }

    pub fn set_z(&mut self, value: f64) {
        self.set_component(2, value)
    }

    /// Drops `z`.
    pub fn truncate(&self) -> Vector2<'static> {
        Vector2::new(self.x(), self.y())
    }

    pub fn cross(&self, other: &Vector3<'_>) -> Vector3<'static> {
        Vector3::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }
}

macro_rules! fixed_vector {
    ($name:ident, $dim:expr, $key:expr, [$($component:expr),+]) => {
        impl<'a> FixedArray<'a> for $name<'a> {
            type Dim = Ix1;

            const NAME: &'static str = stringify!($name);
            const KEY: &'static str = $key;
            const SHAPE: &'static [usize] = &[$dim];
            const COMPONENTS: &'static [&'static str] = &[$($component),+];

            fn from_buffer(buffer: Buffer<'a, Ix1>) -> Self {
                $name { buffer }
            }

            fn default_array() -> Array1<f64> {
                Array1::zeros($dim)
            }

            fn copy_of(arg: &Arg<'a>) -> Option<Array1<f64>> {
                match arg {
                    Arg::$name(values) => Some(values.clone()),
                    _ => None,
                }
            }
        }

        impl BaseVector for $name<'_> {
            const DIM: usize = $dim;

            fn component(&self, index: usize) -> f64 {
                self.buffer.get(index)
            }

            fn set_component(&mut self, index: usize, value: f64) {
                self.buffer.set(index, value)
            }
        }

        impl<'a> $name<'a> {
            /// Builds an instance from any accepted argument form.
            pub fn from_args(args: Arguments<'a>) -> Result<Self> {
                resolver::construct(args)
            }

            /// Aliases `cells`: writes through either handle are visible to both.
            pub fn view(cells: ArrayView1<'a, MathCell<f64>>) -> Result<Self> {
                Self::from_args(Arguments::new().arg(cells))
            }

            /// Takes ownership of `array` without copying it.
            pub fn from_array(array: Array1<f64>) -> Result<Self> {
                Self::from_args(Arguments::new().arg(array))
            }

            pub fn is_view(&self) -> bool {
                self.buffer.is_view()
            }

            pub fn to_array(&self) -> Array1<f64> {
                self.buffer.to_owned()
            }

            pub fn into_owned(self) -> $name<'static> {
                $name {
                    buffer: self.buffer.into_owned(),
                }
            }

            pub fn dot(&self, other: &$name<'_>) -> f64 {
                (0..$dim).map(|i| self.component(i) * other.component(i)).sum()
            }

            pub fn length(&self) -> f64 {
                self.dot(self).sqrt()
            }

            pub fn format_with(&self, options: &PrintOptions) -> String {
                options.format_values(&self.components())
            }
        }

        /// Deep copy; the clone never aliases the original storage.
        impl Clone for $name<'_> {
            fn clone(&self) -> Self {
                $name {
                    buffer: Buffer::owned(self.to_array()),
                }
            }
        }

        impl PartialEq<$name<'_>> for $name<'_> {
            fn eq(&self, other: &$name<'_>) -> bool {
                (0..$dim).all(|i| self.component(i) == other.component(i))
            }
        }

        impl fmt::Display for $name<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.format_with(&PrintOptions::default()))
            }
        }

        impl Add<&$name<'_>> for &$name<'_> {
            type Output = $name<'static>;

            fn add(self, rhs: &$name<'_>) -> Self::Output {
                $name {
                    buffer: Buffer::owned(&self.to_array() + &rhs.to_array()),
                }
            }
        }

        impl Add<$name<'_>> for $name<'_> {
            type Output = $name<'static>;

            fn add(self, rhs: $name<'_>) -> Self::Output {
                &self + &rhs
            }
        }

        impl Sub<&$name<'_>> for &$name<'_> {
            type Output = $name<'static>;

            fn sub(self, rhs: &$name<'_>) -> Self::Output {
                $name {
                    buffer: Buffer::owned(&self.to_array() - &rhs.to_array()),
                }
            }
        }

        impl Sub<$name<'_>> for $name<'_> {
            type Output = $name<'static>;

            fn sub(self, rhs: $name<'_>) -> Self::Output {
                &self - &rhs
            }
        }

        impl Mul<f64> for &$name<'_> {
            type Output = $name<'static>;

            fn mul(self, rhs: f64) -> Self::Output {
                $name {
                    buffer: Buffer::owned(self.buffer.map(|v| v * rhs)),
                }
            }
        }

        impl Mul<f64> for $name<'_> {
            type Output = $name<'static>;

            fn mul(self, rhs: f64) -> Self::Output {
                &self * rhs
            }
        }

        impl Mul<&$name<'_>> for f64 {
            type Output = $name<'static>;

            fn mul(self, rhs: &$name<'_>) -> Self::Output {
                rhs * self
            }
        }

        impl Div<f64> for &$name<'_> {
            type Output = $name<'static>;

            fn div(self, rhs: f64) -> Self::Output {
                $name {
                    buffer: Buffer::owned(self.buffer.map(|v| v / rhs)),
                }
            }
        }

        impl Neg for &$name<'_> {
            type Output = $name<'static>;

            fn neg(self) -> Self::Output {
                self * -1.0
            }
        }

        impl AddAssign<&$name<'_>> for $name<'_> {
            fn add_assign(&mut self, rhs: &$name<'_>) {
                let sum = &self.to_array() + &rhs.to_array();
                self.buffer.assign(&sum);
            }
        }

        impl SubAssign<&$name<'_>> for $name<'_> {
            fn sub_assign(&mut self, rhs: &$name<'_>) {
                let difference = &self.to_array() - &rhs.to_array();
                self.buffer.assign(&difference);
            }
        }

        impl MulAssign<f64> for $name<'_> {
            fn mul_assign(&mut self, rhs: f64) {
                self.buffer.update(|v| v * rhs);
            }
        }

        impl Serialize for $name<'_> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.components().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name<'static> {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let components = <[f64; $dim]>::deserialize(deserializer)?;
                Ok($name {
                    buffer: Buffer::owned(Array1::from(components.to_vec())),
                })
            }
        }
    };
}

fixed_vector!(Vector2, 2, "vector2", ["x", "y"]);
fixed_vector!(Vector3, 3, "vector3", ["x", "y", "z"]);
