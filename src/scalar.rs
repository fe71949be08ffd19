//! Loosely typed scalar input for the message builders.
//!
//! Every builder method accepts `impl Into<Scalar>`, so callers can pass strings, any integer
//! width or floats and the value is normalized into one of the two representations the wire
//! format knows about: a string or a 64-bit signed integer.

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, TimeZone};

use crate::embed::Color;
use crate::error::BuildError;
use crate::message::Snowflake;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Signed(i128),
    Unsigned(u128),
    Float(f64),
}

impl Scalar {
    /// Renders the value as the string that ends up in the JSON document.
    ///
    /// Floats use the shortest decimal representation that round-trips as a double,
    /// without exponent notation.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Signed(int) => int.to_string(),
            Self::Unsigned(int) => int.to_string(),
            Self::Float(float) => float.to_string(),
        }
    }

    /// Lenient integer conversion.
    ///
    /// Text that is not a base-10 integer (or does not fit) becomes 0, floats become 0 and
    /// integers outside the `i64` range saturate at its bounds.
    #[must_use]
    pub fn to_canonical_integer(&self) -> i64 {
        match self {
            Self::Text(text) => text.parse().unwrap_or(0),
            Self::Signed(int) => saturate(*int),
            Self::Unsigned(int) => i64::try_from(*int).unwrap_or(i64::MAX),
            Self::Float(_) => 0,
        }
    }

    /// Strict integer conversion; reports every input the lenient variant would paper over.
    ///
    /// # Errors
    /// * Text that is not a base-10 integer
    /// * Integers (or integer text) outside the `i64` range
    /// * Any float, even one without a fractional part
    pub fn try_to_canonical_integer(&self) -> Result<i64, BuildError> {
        let overflow = || BuildError::IntegerOverflow {
            value: self.to_canonical_string(),
        };
        match self {
            Self::Text(text) => text.parse::<i64>().map_err(|err| match err.kind() {
                std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
                    overflow()
                }
                _ => BuildError::NotAnInteger {
                    value: text.clone(),
                },
            }),
            Self::Signed(int) => i64::try_from(*int).map_err(|_| overflow()),
            Self::Unsigned(int) => i64::try_from(*int).map_err(|_| overflow()),
            Self::Float(float) => Err(BuildError::FloatNotInteger {
                value: float.to_string(),
            }),
        }
    }
}

fn saturate(int: i128) -> i64 {
    i64::try_from(int).unwrap_or(if int < 0 { i64::MIN } else { i64::MAX })
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

macro_rules! impl_from {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl From<$source> for Scalar {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from!(Signed(i128): i8, i16, i32, i64, i128);
impl_from!(Unsigned(u128): u8, u16, u32, u64, u128);
impl_from!(Float(f64): f32, f64);
impl_from!(Text(String): &str, String, &String, char);

// `i128::from(isize)` does not exist, but every platform Rust supports fits.
impl From<isize> for Scalar {
    fn from(value: isize) -> Self {
        Self::Signed(value as i128)
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        Self::Unsigned(value as u128)
    }
}

impl From<Color> for Scalar {
    fn from(color: Color) -> Self {
        Self::Unsigned(u128::from(color.to_discord()))
    }
}

impl From<Snowflake> for Scalar {
    fn from(id: Snowflake) -> Self {
        Self::Text(id.into_inner())
    }
}

/// Timestamps are rendered as RFC 3339 with second precision.
impl<Tz> From<DateTime<Tz>> for Scalar
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::Text(datetime.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}
