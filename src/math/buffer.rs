//! Backing storage shared by the fixed-size vector and matrix types.
//!
//! A [`Buffer`] is either an owned ndarray or a cell view over elements owned
//! by someone else. Cell views come from [`ndarray::ArrayBase::cell_view`]
//! and are `Copy`, so the caller and any number of fixed-size instances can
//! read and write the same memory. The view lifetime `'a` keeps every handle
//! from outliving the owning array. `MathCell` is not `Sync`, so aliased
//! buffers never cross threads.
use std::fmt;

use ndarray::{Array, Array1, ArrayD, ArrayView, Dimension, IxDyn, MathCell, NdIndex};

pub enum Buffer<'a, D: Dimension> {
    Owned(Array<f64, D>),
    View(ArrayView<'a, MathCell<f64>, D>),
}

impl<'a, D: Dimension> Buffer<'a, D> {
    pub fn owned(array: Array<f64, D>) -> Self {
        Buffer::Owned(array)
    }

    pub fn view(cells: ArrayView<'a, MathCell<f64>, D>) -> Self {
        Buffer::View(cells)
    }

    pub fn is_view(&self) -> bool {
        matches!(self, Buffer::View(_))
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Buffer::Owned(array) => array.shape(),
            Buffer::View(cells) => cells.shape(),
        }
    }

    pub fn get<I: NdIndex<D>>(&self, index: I) -> f64 {
        match self {
            Buffer::Owned(array) => array[index],
            Buffer::View(cells) => cells[index].get(),
        }
    }

    /// Writes one element. Through a view the write lands in the aliased memory.
    pub fn set<I: NdIndex<D>>(&mut self, index: I, value: f64) {
        match self {
            Buffer::Owned(array) => array[index] = value,
            Buffer::View(cells) => cells[index].set(value),
        }
    }

    /// Deep copy of the current elements into fresh storage.
    pub fn to_owned(&self) -> Array<f64, D> {
        match self {
            Buffer::Owned(array) => array.clone(),
            Buffer::View(cells) => cells.map(|cell| cell.get()),
        }
    }

    /// Elements in logical (row-major) order.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Buffer::Owned(array) => array.iter().copied().collect(),
            Buffer::View(cells) => cells.iter().map(|cell| cell.get()).collect(),
        }
    }

    /// Applies `f` elementwise into a new owned array.
    pub fn map<F>(&self, mut f: F) -> Array<f64, D>
    where
        F: FnMut(f64) -> f64,
    {
        match self {
            Buffer::Owned(array) => array.mapv(f),
            Buffer::View(cells) => cells.map(|cell| f(cell.get())),
        }
    }

    /// Applies `f` elementwise in place.
    pub fn update<F>(&mut self, mut f: F)
    where
        F: FnMut(f64) -> f64,
    {
        match self {
            Buffer::Owned(array) => array.mapv_inplace(f),
            Buffer::View(cells) => cells.iter().for_each(|cell| cell.set(f(cell.get()))),
        }
    }

    /// Overwrites every element with `values`, which must have the same shape.
    pub fn assign(&mut self, values: &Array<f64, D>) {
        assert_eq!(
            self.shape(),
            values.shape(),
            "assign requires buffers of equal shape"
        );
        match self {
            Buffer::Owned(array) => array.assign(values),
            Buffer::View(cells) => cells
                .iter()
                .zip(values.iter())
                .for_each(|(cell, value)| cell.set(*value)),
        }
    }

    /// Detaches from any aliased memory by copying.
    pub fn into_owned(self) -> Buffer<'static, D> {
        match self {
            Buffer::Owned(array) => Buffer::Owned(array),
            Buffer::View(cells) => Buffer::Owned(cells.map(|cell| cell.get())),
        }
    }
}

impl<D: Dimension> fmt::Debug for Buffer<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_view() { "View" } else { "Owned" };
        f.debug_struct(kind)
            .field("shape", &self.shape())
            .field("values", &self.values())
            .finish()
    }
}

/// Turns a flat list literal into a 1D buffer without copying the elements.
pub fn materialize_list(values: Vec<f64>) -> ArrayD<f64> {
    Array1::from(values).into_dyn()
}

/// Turns a list of rows into a 2D buffer. Ragged rows yield `None`.
pub fn materialize_rows(rows: Vec<Vec<f64>>) -> Option<ArrayD<f64>> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return None;
    }
    let data: Vec<f64> = rows.into_iter().flatten().collect();
    ArrayD::from_shape_vec(IxDyn(&[nrows, ncols]), data).ok()
}
