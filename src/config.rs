use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Options used when rendering vectors and matrices as text.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PrintOptions {
    /// Digits after the decimal point.
    pub precision: usize,

    #[serde(default)]
    pub notation: Notation,

    /// Print values smaller than the displayed precision as zero.
    #[serde(default)]
    pub suppress_small: bool,
}

/// How each element is written.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Fixed,
    Scientific,
}

impl Default for Notation {
    fn default() -> Self {
        Notation::Fixed
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(Notation::Fixed),
            "scientific" | "sci" => Ok(Notation::Scientific),
            _ => Err(format!(
                "Unknown notation: {}. Expected one of `fixed` or `scientific`",
                s
            )),
        }
    }
}

impl PrintOptions {
    pub fn new(precision: usize, notation: Notation) -> Self {
        Self {
            precision,
            notation,
            suppress_small: false,
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        let threshold = 10f64.powi(-(self.precision.min(300) as i32));
        // Avoid printing "-0.0000"
        let value = if value == 0.0 || (self.suppress_small && value.abs() < threshold) {
            0.0
        } else {
            value
        };
        match self.notation {
            Notation::Fixed => format!("{:.*}", self.precision, value),
            Notation::Scientific => format!("{:.*e}", self.precision, value),
        }
    }

    /// Renders a flat sequence as `[a, b, c]`.
    pub fn format_values(&self, values: &[f64]) -> String {
        let items: Vec<String> = values.iter().map(|v| self.format_value(*v)).collect();
        format!("[{}]", items.join(", "))
    }

    /// Renders a 2D array one row per line, numpy style.
    pub fn format_rows(&self, rows: ArrayView2<f64>) -> String {
        let lines: Vec<String> = rows
            .outer_iter()
            .map(|row| self.format_values(&row.to_vec()))
            .collect();
        format!("[{}]", lines.join(",\n "))
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: 7,
            notation: Notation::Fixed,
            suppress_small: false,
        }
    }
}
