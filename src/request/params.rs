//! Query parameter values.
//!
//! Values enter through `From` conversions on closed enums, so an
//! unsupported value type is a compile error rather than a runtime case.

use std::fmt;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// String value.
    Str(String),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
}

impl Scalar {
    /// Whether this scalar is the empty string, which is treated as absent.
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Str(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::UInt(n) => write!(f, "{n}"),
            Scalar::Float(n) => write_float(f, *n),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Shortest round-trip digits, switching to exponent form (`1e+21`,
/// `1.5e-7`) outside `[1e-6, 1e21)` the way browsers print numbers.
fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{mantissa}e+{power}")
            }
            _ => f.write_str(&exp),
        };
    }
    write!(f, "{n}")
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::Str(s.clone())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<f32> for Scalar {
    fn from(n: f32) -> Self {
        Scalar::Float(f64::from(n))
    }
}

macro_rules! scalar_from_int {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(n: $t) -> Self {
                    Scalar::$variant(<$wide>::from(n))
                }
            }
        )*
    };
}

scalar_from_int!(Int, i64: i8, i16, i32, i64);
scalar_from_int!(UInt, u64: u8, u16, u32, u64);

impl From<usize> for Scalar {
    fn from(n: usize) -> Self {
        u64::try_from(n).map_or(Scalar::Float(n as f64), Scalar::UInt)
    }
}

/// The value side of one query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Omit the parameter entirely.
    Absent,
    /// Emit one `key=value` pair.
    Scalar(Scalar),
    /// Emit one `key=value` pair per present, non-empty element.
    List(Vec<Option<Scalar>>),
}

macro_rules! param_value_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Scalar(value.into())
                }
            }

            impl From<Option<$t>> for ParamValue {
                fn from(value: Option<$t>) -> Self {
                    value.map_or(ParamValue::Absent, |v| ParamValue::Scalar(v.into()))
                }
            }

            impl From<Vec<$t>> for ParamValue {
                fn from(values: Vec<$t>) -> Self {
                    ParamValue::List(values.into_iter().map(|v| Some(v.into())).collect())
                }
            }

            impl From<Vec<Option<$t>>> for ParamValue {
                fn from(values: Vec<Option<$t>>) -> Self {
                    ParamValue::List(values.into_iter().map(|v| v.map(Into::into)).collect())
                }
            }
        )*
    };
}

param_value_from!(
    Scalar, &str, String, &String, bool, f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, usize
);

/// Insertion-ordered query parameters.
///
/// ```
/// use search_query_sanitizer::{build_query_string, QueryParams};
///
/// let params = QueryParams::new()
///     .with("q", "milk")
///     .with("page", None::<u32>)
///     .with("tags", vec![Some("a"), Some(""), None, Some("b")]);
/// assert_eq!(build_query_string(&params), "?q=milk&tags=a&tags=b");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter.
    ///
    /// Keys are not deduplicated; a repeated key is emitted once per push.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Iterate parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters, including absent ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
