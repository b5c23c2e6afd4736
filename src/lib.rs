//! lxmath: small fixed-dimension linear algebra for color and transform math.
//!
//! This crate provides 2D/3D vectors and a 3x3 matrix on top of `ndarray`.
//! Instances are built from scalars, list literals, other instances or
//! existing buffers through one construction resolver, and either own their
//! storage or alias a caller's buffer through a cell view.
pub mod config;
pub mod error;
pub mod math;
