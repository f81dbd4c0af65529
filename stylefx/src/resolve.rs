//! Relative (`+=` / `-=`) style values.

use alloc::format;
use alloc::string::{String, ToString};

use crate::{FxOptions, StyleMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaOp {
    Add,
    Sub,
}

impl DeltaOp {
    fn apply(self, current: f64, magnitude: f64) -> f64 {
        match self {
            Self::Add => current + magnitude,
            Self::Sub => current - magnitude,
        }
    }
}

/// A parsed style value expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RelativeExpr<'a> {
    /// Assigned as-is.
    Absolute(&'a str),
    /// Combined with the property's current value.
    Relative {
        op: DeltaOp,
        /// `NaN` when the expression carries no number (lenient parse only).
        magnitude: f64,
        unit: &'a str,
    },
}

/// Returned by [`RelativeExpr::parse_strict`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("relative expression `{expression}` has no numeric magnitude")]
    InvalidMagnitude { expression: String },
    #[error("relative expression `{expression}` uses unknown unit `{unit}`")]
    UnknownUnit { expression: String, unit: String },
}

impl<'a> RelativeExpr<'a> {
    /// Parses best-effort: unknown units fall back to `options.default_unit` and a missing
    /// number yields a `NaN` magnitude.
    pub fn parse(expression: &'a str, options: &'a FxOptions) -> Self {
        let Some((op, body)) = split_marker(expression) else {
            return Self::Absolute(expression);
        };

        let unit = options
            .units
            .iter()
            .rev()
            .find(|unit| body.contains(unit.as_str()))
            .map_or(options.default_unit.as_str(), String::as_str);
        let magnitude = leading_number(body).map_or(f64::NAN, |(n, _)| n);

        Self::Relative {
            op,
            magnitude,
            unit,
        }
    }

    /// Parses, rejecting a missing number or a suffix outside `options.units`.
    pub fn parse_strict(expression: &'a str, options: &'a FxOptions) -> Result<Self, ResolveError> {
        let Some((op, body)) = split_marker(expression) else {
            return Ok(Self::Absolute(expression));
        };

        let Some((magnitude, suffix)) = leading_number(body) else {
            return Err(ResolveError::InvalidMagnitude {
                expression: expression.into(),
            });
        };

        let suffix = suffix.trim();
        let unit = if suffix.is_empty() {
            options.default_unit.as_str()
        } else {
            options
                .units
                .iter()
                .find(|unit| unit.as_str() == suffix)
                .map(String::as_str)
                .ok_or_else(|| ResolveError::UnknownUnit {
                    expression: expression.into(),
                    unit: suffix.into(),
                })?
        };

        Ok(Self::Relative {
            op,
            magnitude,
            unit,
        })
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Relative { .. })
    }

    /// Produces the absolute value given the property's current value.
    ///
    /// The current value's unit is discarded; an absent or non-numeric current value counts as 0.
    pub fn apply(&self, current: Option<&str>) -> String {
        match *self {
            Self::Absolute(value) => value.to_string(),
            Self::Relative {
                op,
                magnitude,
                unit,
            } => {
                let current = current
                    .and_then(|v| leading_number(v))
                    .map_or(0.0, |(n, _)| n);
                format_number(op.apply(current, magnitude), unit)
            }
        }
    }
}

/// Resolves one property value, reading the current value only for relative expressions.
pub fn resolve(
    property: &str,
    expression: &str,
    options: &FxOptions,
    read: impl FnOnce(&str) -> Option<String>,
) -> String {
    let expr = RelativeExpr::parse(expression, options);
    if !expr.is_relative() {
        return expression.to_string();
    }
    let current = read(property);
    let resolved = expr.apply(current.as_deref());
    fxtrace!(property, expression, resolved = %resolved, "resolve");
    resolved
}

/// Resolves every value of `props`.
pub fn resolve_map(
    props: &StyleMap,
    options: &FxOptions,
    mut read: impl FnMut(&str) -> Option<String>,
) -> StyleMap {
    props
        .iter()
        .map(|(name, expression)| (name, resolve(name, expression, options, &mut read)))
        .collect()
}

fn split_marker(expression: &str) -> Option<(DeltaOp, &str)> {
    let expression = expression.trim_start();
    if let Some(body) = expression.strip_prefix("+=") {
        Some((DeltaOp::Add, body))
    } else {
        expression
            .strip_prefix("-=")
            .map(|body| (DeltaOp::Sub, body))
    }
}

/// Parses the longest leading decimal number, returning it with the unparsed remainder.
fn leading_number(s: &str) -> Option<(f64, &str)> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
            has_digits = true;
        }
    }

    if !has_digits {
        return None;
    }
    let n = s[..end].parse::<f64>().ok()?;
    Some((n, &s[end..]))
}

fn format_number(n: f64, unit: &str) -> String {
    // Avoid printing `-0`.
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{n}{unit}")
}
