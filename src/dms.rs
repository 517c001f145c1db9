//! Provides utilities for DMS notation degree.
//!
//! The compact notation is `[+-]DDDMMSS[.fff]`, e.g. `"360613.58925"`
//! for 36°06′13.58925″, where `_` is allowed as a separator between digits.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Returns a DMS notation [`String`] from a DD notation [`f64`].
///
/// This returns [`None`] if `t` is NaN or out of -180.0 <= and <= 180.0.
///
/// # Example
///
/// ```
/// # use parshift::dms::to_dms;
/// assert_eq!(to_dms(36.103774791666666), Some("360613.58925".to_string()));
/// assert_eq!(to_dms(36.5), Some("363000".to_string()));
/// assert_eq!(to_dms(f64::NAN), None);
/// ```
#[inline]
#[must_use]
pub fn to_dms(t: f64) -> Option<String> {
    DMS::try_from(t).ok().map(|dms| dms.to_string())
}

/// Returns a DD notation [`f64`] from a DMS notation [`str`].
///
/// This returns [`None`] if `s` is not a DMS notation.
///
/// # Example
///
/// ```
/// # use parshift::dms::from_dms;
/// assert_eq!(from_dms("360613.58925"), Some(36.103774791666666));
/// assert_eq!(from_dms("1400516.27815"), Some(140.08785504166667));
/// assert_eq!(from_dms("36.06.13"), None);
/// ```
#[inline]
#[must_use]
pub fn from_dms(s: &str) -> Option<f64> {
    s.parse::<DMS>().ok().map(|dms| dms.to_degree())
}

/// Signature of DMS.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    Positive,
    Negative,
}

/// Represents DMS notation latitude and/or longitude.
///
/// This supports -180.0 <= and <= 180.0 angle in degree (DD notation).
///
/// # Example
///
/// ```
/// # use parshift::dms::{DMS, Sign};
/// let dms: DMS = "360613.58925".parse()?;
/// assert_eq!(dms, DMS::try_new(Sign::Positive, 36, 6, 13, 0.58925).unwrap());
///
/// assert_eq!(dms.to_string(), "360613.58925");
/// assert_eq!(format!("{dms:#}"), "36°06′13.58925″");
/// assert_eq!(dms.to_degree(), 36.103774791666666);
/// # Ok::<(), parshift::dms::ParseDmsError>(())
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DmsRecord"))]
pub struct DMS {
    sign: Sign,
    degree: u8,
    minute: u8,
    second: u8,
    fract: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DmsRecord {
    sign: Sign,
    degree: u8,
    minute: u8,
    second: u8,
    fract: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<DmsRecord> for DMS {
    type Error = TryFromDmsError;

    fn try_from(value: DmsRecord) -> Result<Self, Self::Error> {
        Self::try_new(
            value.sign,
            value.degree,
            value.minute,
            value.second,
            value.fract,
        )
        .ok_or(TryFromDmsError::OutOfBounds)
    }
}

/// An error which can be returned on parsing [`DMS`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
pub enum ParseDmsError {
    #[error("cannot parse DMS from empty string")]
    Empty,
    #[error("invalid digit found in string")]
    InvalidDigit,
    #[error("cannot parse out-of-bounds DMS")]
    OutOfBounds,
}

/// An error which can be returned on converting [`f64`] into [`DMS`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, thiserror::Error)]
pub enum TryFromDmsError {
    #[error("number would be NaN")]
    Nan,
    #[error("number would be out-of-bounds")]
    OutOfBounds,
}

impl Display for DMS {
    /// Formats `self` into the compact notation,
    /// or into the primed notation `36°06′13.58925″` with `{:#}`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // at most 9 digits, never rounds up into the next second
        let nanos = ((self.fract * 1e9).round() as u32).min(999_999_999);
        let fract = if nanos == 0 {
            String::new()
        } else {
            let s = format!(".{nanos:09}");
            s.trim_end_matches('0').to_string()
        };

        let buf = if f.alternate() {
            format!(
                "{}°{:02}′{}{}″",
                self.degree, self.minute, self.second, fract
            )
        } else {
            let integer =
                self.degree as u32 * 10_000 + self.minute as u32 * 100 + self.second as u32;
            format!("{integer}{fract}")
        };

        f.pad_integral(self.sign == Sign::Positive, "", &buf)
    }
}

/// Returns digits of `s` without `_` separators, `s` must not start with `_`.
fn strip_separators(s: &str) -> Result<String, ParseDmsError> {
    if s.starts_with('_') {
        return Err(ParseDmsError::InvalidDigit);
    }

    s.chars()
        .filter(|c| *c != '_')
        .map(|c| {
            if c.is_ascii_digit() {
                Ok(c)
            } else {
                Err(ParseDmsError::InvalidDigit)
            }
        })
        .collect()
}

impl FromStr for DMS {
    type Err = ParseDmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseDmsError::Empty);
        }

        let (sign, rest) = match s.as_bytes()[0] {
            b'-' => (Sign::Negative, &s[1..]),
            b'+' => (Sign::Positive, &s[1..]),
            _ => (Sign::Positive, s),
        };

        let (integer, fraction) = match rest.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (rest, None),
        };

        let integer = strip_separators(integer)?;
        let fraction = fraction.map(strip_separators).transpose()?;

        if integer.is_empty() && fraction.as_deref().is_none_or(str::is_empty) {
            return Err(ParseDmsError::InvalidDigit);
        }

        let (degree, minute, second) = if integer.is_empty() {
            (0, 0, 0)
        } else {
            let value: u64 = integer
                .parse()
                .map_err(|_| ParseDmsError::OutOfBounds)?;
            let degree = u8::try_from(value / 10_000).map_err(|_| ParseDmsError::OutOfBounds)?;
            // both are less than 100
            (degree, (value % 10_000 / 100) as u8, (value % 100) as u8)
        };

        let fract = match fraction.as_deref() {
            None | Some("") => 0.0,
            Some(digits) => format!("0.{digits}")
                .parse::<f64>()
                .map_err(|_| ParseDmsError::InvalidDigit)?,
        };

        Self::try_new(sign, degree, minute, second, fract).ok_or(ParseDmsError::OutOfBounds)
    }
}

impl TryFrom<f64> for DMS {
    type Error = TryFromDmsError;

    /// Makes a [`DMS`] from a DD notation degree.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::dms::{DMS, Sign};
    /// let dms = DMS::try_from(-36.5)?;
    /// assert_eq!(dms, DMS::try_new(Sign::Negative, 36, 30, 0, 0.0).unwrap());
    /// assert!(DMS::try_from(180.5).is_err());
    /// # Ok::<(), parshift::dms::TryFromDmsError>(())
    /// ```
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(TryFromDmsError::Nan);
        } else if !(-180.0..=180.0).contains(&value) {
            return Err(TryFromDmsError::OutOfBounds);
        }

        let sign = if value.is_sign_positive() {
            Sign::Positive
        } else {
            Sign::Negative
        };

        let value = value.abs();
        let minutes = 60. * value.fract();
        let seconds = 60. * minutes.fract();

        Self::try_new(
            sign,
            value.trunc() as u8,
            minutes.trunc() as u8,
            seconds.trunc() as u8,
            seconds.fract(),
        )
        .ok_or(TryFromDmsError::OutOfBounds)
    }
}

impl DMS {
    /// Makes a [`DMS`].
    ///
    /// This returns [`None`] if `minute` or `second` is not less than 60,
    /// `fract` is out of 0.0 <= and < 1.0, or the angle exceeds 180°.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::dms::{DMS, Sign};
    /// assert!(DMS::try_new(Sign::Positive, 36, 6, 13, 0.58925).is_some());
    /// assert!(DMS::try_new(Sign::Positive, 36, 60, 13, 0.58925).is_none());
    /// assert!(DMS::try_new(Sign::Negative, 180, 0, 0, 0.1).is_none());
    /// ```
    #[must_use]
    pub fn try_new(sign: Sign, degree: u8, minute: u8, second: u8, fract: f64) -> Option<Self> {
        if minute >= 60 || second >= 60 || !(0.0..1.0).contains(&fract) {
            return None;
        }

        let exceeds = match degree {
            0..180 => false,
            180 => minute > 0 || second > 0 || fract > 0.0,
            _ => true,
        };
        if exceeds {
            return None;
        }

        Some(Self {
            sign,
            degree,
            minute,
            second,
            fract,
        })
    }

    /// Returns the sign of `self`.
    #[inline]
    #[must_use]
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns the degree of `self`.
    #[inline]
    #[must_use]
    pub const fn degree(&self) -> u8 {
        self.degree
    }

    /// Returns the minute of `self`.
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the integer part of the second of `self`.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Returns the fractional part of the second of `self`.
    #[inline]
    #[must_use]
    pub const fn fract(&self) -> f64 {
        self.fract
    }

    /// Returns the DD notation degree of `self`.
    #[must_use]
    pub fn to_degree(&self) -> f64 {
        let temp = self.minute as f64 * (1. / 60.) + self.degree as f64;
        let temp = (self.second as f64 + self.fract) * (1. / 3600.) + temp;

        match self.sign {
            Sign::Positive => temp,
            Sign::Negative => -temp,
        }
    }
}
