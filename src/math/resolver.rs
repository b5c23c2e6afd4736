//! Construction resolver.
//!
//! Every fixed-size type accepts one call made of positional and named
//! arguments. [`resolve`] maps such a call onto exactly one of the accepted
//! forms, in order:
//!
//! 1. no arguments: the type's default contents;
//! 2. as many positional scalars as the type has elements;
//! 3. one instance of the same type: deep copy;
//! 4. one buffer-like argument: a cell view is aliased, an owned array or a
//!    list literal is adopted as the new storage without further copying;
//! 5. named arguments from exactly one group: `{<type key>}`, the component
//!    names, or `{array}`. A group passed only as [`Arg::Empty`] falls back
//!    to the default contents.
//!
//! Anything else fails with [`LinalgError::Unresolved`], and mixing
//! positional with named arguments fails with [`LinalgError::MixedArguments`].
use std::fmt;

use log::{debug, trace};
use ndarray::{
    Array, Array1, Array2, ArrayBase, ArrayD, ArrayView, ArrayViewD, Dimension, IxDyn, MathCell,
    RawData,
};

use crate::error::{LinalgError, Result};
use crate::math::buffer::{self, Buffer};
use crate::math::matrix::Matrix3x3;
use crate::math::vector::{Vector2, Vector3};

/// Named argument carrying a buffer-like value.
pub const ARRAY_KEY: &str = "array";

/// One argument of a construction call.
pub enum Arg<'a> {
    Scalar(f64),
    /// Deep copy of a `Vector2` taken when the argument was built.
    Vector2(Array1<f64>),
    Vector3(Array1<f64>),
    Matrix3x3(Array2<f64>),
    /// Cell view over a caller-owned buffer; the result aliases it.
    View(ArrayViewD<'a, MathCell<f64>>),
    /// Owned buffer handed over to the result without copying.
    Array(ArrayD<f64>),
    List(Vec<f64>),
    Rows(Vec<Vec<f64>>),
    /// Explicitly empty value, e.g. `array = None`.
    Empty,
}

impl<'a> Arg<'a> {
    pub fn is_buffer_like(&self) -> bool {
        matches!(
            self,
            Arg::View(_) | Arg::Array(_) | Arg::List(_) | Arg::Rows(_)
        )
    }

    pub fn describe(&self) -> String {
        match self {
            Arg::Scalar(value) => format!("{}", value),
            Arg::Vector2(values) => format!("Vector2({})", values),
            Arg::Vector3(values) => format!("Vector3({})", values),
            Arg::Matrix3x3(_) => "Matrix3x3(..)".to_string(),
            Arg::View(cells) => format!("view{:?}", cells.shape()),
            Arg::Array(array) => format!("array{:?}", array.shape()),
            Arg::List(values) => format!("list[{}]", values.len()),
            Arg::Rows(rows) => format!("rows[{}]", rows.len()),
            Arg::Empty => "None".to_string(),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<'a> From<f64> for Arg<'a> {
    fn from(value: f64) -> Self {
        Arg::Scalar(value)
    }
}

impl<'a> From<f32> for Arg<'a> {
    fn from(value: f32) -> Self {
        Arg::Scalar(value as f64)
    }
}

impl<'a> From<i32> for Arg<'a> {
    fn from(value: i32) -> Self {
        Arg::Scalar(value as f64)
    }
}

impl<'a> From<&Vector2<'_>> for Arg<'a> {
    fn from(value: &Vector2<'_>) -> Self {
        Arg::Vector2(value.to_array())
    }
}

impl<'a> From<&Vector3<'_>> for Arg<'a> {
    fn from(value: &Vector3<'_>) -> Self {
        Arg::Vector3(value.to_array())
    }
}

impl<'a> From<&Matrix3x3<'_>> for Arg<'a> {
    fn from(value: &Matrix3x3<'_>) -> Self {
        Arg::Matrix3x3(value.to_array())
    }
}

impl<'a, D: Dimension> From<ArrayView<'a, MathCell<f64>, D>> for Arg<'a> {
    fn from(cells: ArrayView<'a, MathCell<f64>, D>) -> Self {
        Arg::View(cells.into_dyn())
    }
}

/// Borrowing an array mutably aliases it for as long as the result lives.
impl<'a, D: Dimension> From<&'a mut Array<f64, D>> for Arg<'a> {
    fn from(array: &'a mut Array<f64, D>) -> Self {
        Arg::View(array.cell_view().into_dyn())
    }
}

impl<'a, D: Dimension> From<Array<f64, D>> for Arg<'a> {
    fn from(array: Array<f64, D>) -> Self {
        Arg::Array(array.into_dyn())
    }
}

impl<'a> From<Vec<f64>> for Arg<'a> {
    fn from(values: Vec<f64>) -> Self {
        Arg::List(values)
    }
}

impl<'a> From<Vec<Vec<f64>>> for Arg<'a> {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Arg::Rows(rows)
    }
}

impl<'a, const N: usize> From<[f64; N]> for Arg<'a> {
    fn from(values: [f64; N]) -> Self {
        Arg::List(values.to_vec())
    }
}

impl<'a, const R: usize, const C: usize> From<[[f64; C]; R]> for Arg<'a> {
    fn from(rows: [[f64; C]; R]) -> Self {
        Arg::Rows(rows.iter().map(|row| row.to_vec()).collect())
    }
}

impl<'a, T: Into<Arg<'a>>> From<Option<T>> for Arg<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Empty, Into::into)
    }
}

/// The arguments of one construction call.
#[derive(Debug, Default)]
pub struct Arguments<'a> {
    positional: Vec<Arg<'a>>,
    named: Vec<(String, Arg<'a>)>,
}

impl<'a> Arguments<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positional<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg<'a>>,
    {
        Self {
            positional: args.into_iter().map(Into::into).collect(),
            named: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Arg<'a>>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a named argument, replacing an earlier one with the same key.
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Arg<'a>>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.named.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.named.push((key, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

fn describe_positional(positional: &[Arg]) -> String {
    positional
        .iter()
        .map(Arg::describe)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_named(named: &[(String, Arg)]) -> String {
    named
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value.describe()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe(positional: &[Arg], named: &[(String, Arg)]) -> String {
    format!(
        "({}) ; {{{}}}",
        describe_positional(positional),
        describe_named(named)
    )
}

/// A fixed-size type the resolver can build.
pub trait FixedArray<'a>: Sized {
    type Dim: Dimension;

    /// Type name used in error messages.
    const NAME: &'static str;
    /// Keyword under which an instance of this type may be passed.
    const KEY: &'static str;
    const SHAPE: &'static [usize];
    /// Keywords of the scalar components, in storage order. Empty when the
    /// type has no named components.
    const COMPONENTS: &'static [&'static str];

    fn from_buffer(buffer: Buffer<'a, Self::Dim>) -> Self;

    /// Contents used when the call carries no arguments.
    fn default_array() -> Array<f64, Self::Dim>;

    /// Owned copy of `arg` when it is an instance of this type.
    fn copy_of(arg: &Arg<'a>) -> Option<Array<f64, Self::Dim>>;

    fn len() -> usize {
        Self::SHAPE.iter().product()
    }
}

/// Outcome of resolving one call.
pub enum Resolved<'a, D: Dimension> {
    Default,
    Components(Array<f64, D>),
    Copy(Array<f64, D>),
    Adopt(Array<f64, D>),
    View(ArrayView<'a, MathCell<f64>, D>),
}

impl<'a, D: Dimension> Resolved<'a, D> {
    pub fn is_view(&self) -> bool {
        matches!(self, Resolved::View(_))
    }

    pub fn into_buffer<F>(self, default: F) -> Buffer<'a, D>
    where
        F: FnOnce() -> Array<f64, D>,
    {
        match self {
            Resolved::Default => Buffer::owned(default()),
            Resolved::Components(array) | Resolved::Copy(array) | Resolved::Adopt(array) => {
                Buffer::owned(array)
            }
            Resolved::View(cells) => Buffer::view(cells),
        }
    }
}

impl<D: Dimension> fmt::Debug for Resolved<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Default => f.write_str("Default"),
            Resolved::Components(array) => f.debug_tuple("Components").field(&array.shape()).finish(),
            Resolved::Copy(array) => f.debug_tuple("Copy").field(&array.shape()).finish(),
            Resolved::Adopt(array) => f.debug_tuple("Adopt").field(&array.shape()).finish(),
            Resolved::View(cells) => f.debug_tuple("View").field(&cells.shape()).finish(),
        }
    }
}

/// Resolves `args` and builds the instance.
pub fn construct<'a, T: FixedArray<'a>>(args: Arguments<'a>) -> Result<T> {
    let resolved = resolve::<T>(args)?;
    Ok(T::from_buffer(resolved.into_buffer(T::default_array)))
}

pub fn resolve<'a, T: FixedArray<'a>>(args: Arguments<'a>) -> Result<Resolved<'a, T::Dim>> {
    let Arguments { positional, named } = args;
    match (positional.is_empty(), named.is_empty()) {
        (true, true) => {
            trace!("{}: no arguments, using default contents", T::NAME);
            Ok(Resolved::Default)
        }
        (false, false) => Err(LinalgError::MixedArguments {
            target: T::NAME,
            positional: describe_positional(&positional),
            named: describe_named(&named),
        }),
        (false, true) => resolve_positional::<T>(positional),
        (true, false) => resolve_named::<T>(named),
    }
}

fn resolve_positional<'a, T: FixedArray<'a>>(
    mut positional: Vec<Arg<'a>>,
) -> Result<Resolved<'a, T::Dim>> {
    if positional.len() == 1 {
        if let Some(copy) = T::copy_of(&positional[0]) {
            trace!("{}: copying an instance of the same type", T::NAME);
            return Ok(Resolved::Copy(copy));
        }
    }

    if positional.len() == T::len() {
        if let Some(components) = scalars(positional.iter()) {
            return components_array::<T>(components).map(Resolved::Components);
        }
    }

    if positional.len() == 1 && positional[0].is_buffer_like() {
        let arguments = describe(&positional, &[]);
        let arg = positional.remove(0);
        return buffer_like::<T>(arg, arguments);
    }

    Err(LinalgError::Unresolved {
        target: T::NAME,
        arguments: describe(&positional, &[]),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NamedGroup {
    Instance,
    Components,
    Array,
}

fn named_group<'a, T: FixedArray<'a>>(named: &[(String, Arg<'a>)]) -> Option<NamedGroup> {
    let mut group = None;
    for (key, _) in named {
        let this = if key == T::KEY {
            NamedGroup::Instance
        } else if key == ARRAY_KEY {
            NamedGroup::Array
        } else if T::COMPONENTS.contains(&key.as_str()) {
            NamedGroup::Components
        } else {
            return None;
        };
        match group {
            None => group = Some(this),
            Some(seen) if seen != this => return None,
            Some(_) => {}
        }
    }
    group
}

fn resolve_named<'a, T: FixedArray<'a>>(
    mut named: Vec<(String, Arg<'a>)>,
) -> Result<Resolved<'a, T::Dim>> {
    let arguments = describe(&[], &named);
    let unresolved = || LinalgError::Unresolved {
        target: T::NAME,
        arguments: arguments.clone(),
    };

    let group = named_group::<T>(&named).ok_or_else(unresolved)?;
    if group != NamedGroup::Components && named.iter().all(|(_, arg)| matches!(arg, Arg::Empty)) {
        trace!("{}: empty named argument, using default contents", T::NAME);
        return Ok(Resolved::Default);
    }

    match group {
        NamedGroup::Instance => {
            let copy = named.first().and_then(|(_, arg)| T::copy_of(arg));
            copy.map(Resolved::Copy).ok_or_else(unresolved)
        }
        NamedGroup::Components => {
            if named.len() != T::COMPONENTS.len() {
                return Err(unresolved());
            }
            let ordered = T::COMPONENTS.iter().filter_map(|component| {
                named
                    .iter()
                    .find(|(key, _)| key == component)
                    .map(|(_, arg)| arg)
            });
            let components = scalars(ordered).ok_or_else(unresolved)?;
            if components.len() != T::len() {
                return Err(unresolved());
            }
            components_array::<T>(components).map(Resolved::Components)
        }
        NamedGroup::Array => match named.pop() {
            Some((_, arg)) if arg.is_buffer_like() => buffer_like::<T>(arg, arguments.clone()),
            _ => Err(unresolved()),
        },
    }
}

fn scalars<'a, 'b, I>(args: I) -> Option<Vec<f64>>
where
    'a: 'b,
    I: Iterator<Item = &'b Arg<'a>>,
{
    args.map(|arg| match arg {
        Arg::Scalar(value) => Some(*value),
        _ => None,
    })
    .collect()
}

fn components_array<'a, T: FixedArray<'a>>(components: Vec<f64>) -> Result<Array<f64, T::Dim>> {
    trace!("{}: built from {} scalars", T::NAME, components.len());
    let arguments = format!(
        "({}) ; {{}}",
        components
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    ArrayD::from_shape_vec(IxDyn(T::SHAPE), components)
        .ok()
        .and_then(|array| fit_shape::<T, _>(array))
        .ok_or(LinalgError::Unresolved {
            target: T::NAME,
            arguments,
        })
}

fn fit_shape<'a, T, S>(array: ArrayBase<S, IxDyn>) -> Option<ArrayBase<S, T::Dim>>
where
    T: FixedArray<'a>,
    S: RawData,
{
    if array.shape() != T::SHAPE {
        return None;
    }
    array.into_dimensionality::<T::Dim>().ok()
}

fn buffer_like<'a, T: FixedArray<'a>>(
    arg: Arg<'a>,
    arguments: String,
) -> Result<Resolved<'a, T::Dim>> {
    let resolved = match arg {
        Arg::View(cells) => fit_shape::<T, _>(cells).map(|cells| {
            debug!("{}: aliasing an external buffer of shape {:?}", T::NAME, T::SHAPE);
            Resolved::View(cells)
        }),
        Arg::Array(array) => fit_shape::<T, _>(array).map(Resolved::Adopt),
        Arg::List(values) => fit_shape::<T, _>(buffer::materialize_list(values)).map(Resolved::Adopt),
        Arg::Rows(rows) => buffer::materialize_rows(rows)
            .and_then(|array| fit_shape::<T, _>(array))
            .map(Resolved::Adopt),
        _ => None,
    };
    if let Some(Resolved::Adopt(_)) = resolved {
        trace!("{}: adopting a buffer of shape {:?}", T::NAME, T::SHAPE);
    }
    resolved.ok_or(LinalgError::Unresolved {
        target: T::NAME,
        arguments,
    })
}
