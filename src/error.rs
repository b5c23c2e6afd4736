use std::error::Error;
use std::fmt;

/// Errors raised while building or combining fixed-size vectors and matrices.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Positional and named arguments were supplied in the same call.
    MixedArguments {
        target: &'static str,
        positional: String,
        named: String,
    },
    /// The arguments match none of the accepted construction forms.
    Unresolved {
        target: &'static str,
        arguments: String,
    },
    /// An operand of a matrix product is neither a scalar nor 3x3.
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    Singular { determinant: f64 },
}

impl LinalgError {
    /// True for failures of the construction resolver.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            LinalgError::MixedArguments { .. } | LinalgError::Unresolved { .. }
        )
    }

    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, LinalgError::ShapeMismatch { .. })
    }
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinalgError::MixedArguments {
                target,
                positional,
                named,
            } => write!(
                f,
                "Mix of positional and named arguments is not supported for {}: ({}) ; {{{}}}",
                target, positional, named
            ),
            LinalgError::Unresolved { target, arguments } => write!(
                f,
                "The given arguments don't resolve to a new {}: {}",
                target, arguments
            ),
            LinalgError::ShapeMismatch { expected, found } => write!(
                f,
                "Shape mismatch: expected an operand of shape {:?}, found {:?}",
                expected, found
            ),
            LinalgError::Singular { determinant } => write!(
                f,
                "Matrix is singular (determinant = {})",
                determinant
            ),
        }
    }
}

impl Error for LinalgError {}

pub type Result<T> = std::result::Result<T, LinalgError>;
