//! Fixed-size vector and matrix types backed by ndarray buffers.
//!
//! Provides `Vector2`, `Vector3` and `Matrix3x3`, the construction resolver
//! they share, and the `Buffer` that decides whether an instance owns its
//! elements or aliases memory owned elsewhere.
pub mod buffer;
pub mod matrix;
pub mod resolver;
pub mod vector;

pub use buffer::Buffer;
pub use matrix::Matrix3x3;
pub use resolver::{Arg, Arguments, FixedArray, Resolved, ARRAY_KEY};
pub use vector::{BaseVector, Vector2, Vector3};
