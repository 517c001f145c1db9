//! Provides [`Error`] etc.
use std::fmt::{Display, Formatter};

use crate::mesh::{MeshCoord, MeshNode, MeshUnit};

/// Alias for a `Result<T, parshift::error::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents all possible errors that can occur on mesh handling and transformation.
///
/// See [`Error::kind`] for the coarse classification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Latitude or longitude is outside the supported domain.
    #[error("invalid {axis}: {value:?} is out-of-range")]
    OutOfRangePosition {
        /// The axis of the value
        axis: Axis,
        /// The given value
        value: f64,
    },
    /// A digit of [`MeshCoord`] is out-of-range.
    #[error("invalid MeshCoord: {digit} digit must satisfy 0 <= and <= {high}, got {value}")]
    OutOfRangeDigit {
        /// The digit
        digit: Digit,
        /// The given value
        value: u8,
        /// The largest value the digit takes
        high: u8,
    },
    /// The longitude of [`MeshNode`] exceeds `MeshCoord(80, 0, 0)`.
    #[error("invalid MeshNode: longitude must satisfy <= MeshCoord(80, 0, 0), got {longitude:?}")]
    OutOfRangeNode {
        /// The given longitude
        longitude: MeshCoord,
    },
    /// Meshcode does not represent a [`MeshNode`].
    #[error("invalid meshcode: {meshcode}")]
    OutOfRangeMeshcode {
        /// The given meshcode
        meshcode: u32,
    },
    /// Failed to parse a meshcode from a string.
    #[error("invalid meshcode: '{s}'")]
    ParseMeshcode {
        /// The given string
        s: String,
    },
    /// Mesh unit other than 1 or 5.
    #[error("invalid mesh unit: {unit}, expected 1 or 5")]
    InvalidMeshUnit {
        /// The given unit
        unit: u8,
    },
    /// The third digit of [`MeshCoord`] is not compatible to the unit.
    #[error("mesh unit {unit} is inconsistent with {coord:?}")]
    InconsistentMeshUnit {
        /// The coordinate
        coord: MeshCoord,
        /// The unit
        unit: MeshUnit,
    },
    /// Four nodes do not construct a unit cell.
    #[error("nodes {sw:?} and {other:?} do not construct a unit cell of mesh unit {unit}")]
    InconsistentMeshCell {
        /// The south-west node
        sw: MeshNode,
        /// The node which is not adjacent to `sw`
        other: MeshNode,
        /// The unit
        unit: MeshUnit,
    },
    /// Increment/decrement of [`MeshCoord`] exceeds its bounds.
    #[error("MeshCoord overflow: {coord:?}")]
    MeshCoordOverflow {
        /// The coordinate which is unable to step
        coord: MeshCoord,
    },
    /// The parameter of a corner of the cell is missing.
    #[error("parameter not found: {meshcode} at {corner} corner")]
    ParameterNotFound {
        /// The meshcode of the missing node
        meshcode: u32,
        /// The corner of the cell
        corner: Corner,
    },
    /// The error of the backward transformation is still high after the iterations.
    #[error(
        "not converged: error is still higher than {criteria:e} after {iteration} iterations, \
        got ({latitude}, {longitude}) from ({origin_latitude}, {origin_longitude})"
    )]
    NotConverged {
        /// The number of iterations exhausted
        iteration: usize,
        /// The tolerance \[deg\]
        criteria: f64,
        /// The last estimate of latitude
        latitude: f64,
        /// The last estimate of longitude
        longitude: f64,
        /// The latitude of the input
        origin_latitude: f64,
        /// The longitude of the input
        origin_longitude: f64,
    },
}

/// A coarse classification of [`Error`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ErrorKind {
    /// Input value, unit or digit is outside its domain.
    Range,
    /// A valid value is pushed past the bounds of [`MeshCoord`].
    Overflow,
    /// A corner parameter is absent.
    ParameterNotFound,
    /// Newton's method exhausted its iterations.
    NotConverged,
}

impl Error {
    /// Returns the kind of `self`.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::MeshNode;
    /// # use parshift::error::ErrorKind;
    /// let err = MeshNode::try_from_meshcode(100_000_000).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Range);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRangePosition { .. }
            | Self::OutOfRangeDigit { .. }
            | Self::OutOfRangeNode { .. }
            | Self::OutOfRangeMeshcode { .. }
            | Self::ParseMeshcode { .. }
            | Self::InvalidMeshUnit { .. }
            | Self::InconsistentMeshUnit { .. }
            | Self::InconsistentMeshCell { .. } => ErrorKind::Range,
            Self::MeshCoordOverflow { .. } => ErrorKind::Overflow,
            Self::ParameterNotFound { .. } => ErrorKind::ParameterNotFound,
            Self::NotConverged { .. } => ErrorKind::NotConverged,
        }
    }
}

/// The axis an error occurs on.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude => f.write_str("latitude"),
            Self::Longitude => f.write_str("longitude"),
        }
    }
}

/// A digit of [`MeshCoord`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Digit {
    First,
    Second,
    Third,
}

impl Display for Digit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
            Self::Third => f.write_str("third"),
        }
    }
}

/// A corner of [`MeshCell`](crate::mesh::MeshCell).
///
/// Parameters are looked up in the order south-west, south-east, north-west, north-east.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Corner {
    SouthWest,
    SouthEast,
    NorthWest,
    NorthEast,
}

impl Corner {
    /// Returns the abbreviation, e.g. `"sw"`.
    pub const fn abbr(&self) -> &'static str {
        match self {
            Self::SouthWest => "sw",
            Self::SouthEast => "se",
            Self::NorthWest => "nw",
            Self::NorthEast => "ne",
        }
    }
}

impl Display for Corner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SouthWest => f.write_str("south-west"),
            Self::SouthEast => f.write_str("south-east"),
            Self::NorthWest => f.write_str("north-west"),
            Self::NorthEast => f.write_str("north-east"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::ParameterNotFound {
            meshcode: 54401027,
            corner: Corner::SouthWest,
        };
        assert_eq!(
            err.to_string(),
            "parameter not found: 54401027 at south-west corner"
        );

        let err = Error::InvalidMeshUnit { unit: 2 };
        assert_eq!(err.to_string(), "invalid mesh unit: 2, expected 1 or 5");

        let err = Error::OutOfRangePosition {
            axis: Axis::Longitude,
            value: 99.0,
        };
        assert_eq!(err.to_string(), "invalid longitude: 99.0 is out-of-range");
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            Error::MeshCoordOverflow {
                coord: MeshCoord::MAX
            }
            .kind(),
            ErrorKind::Overflow
        );
        assert_eq!(
            Error::OutOfRangeMeshcode { meshcode: 0 }.kind(),
            ErrorKind::Range
        );
        assert_eq!(
            Error::NotConverged {
                iteration: 3,
                criteria: 2.5e-9,
                latitude: 0.0,
                longitude: 0.0,
                origin_latitude: 0.0,
                origin_longitude: 0.0,
            }
            .kind(),
            ErrorKind::NotConverged
        );
    }

    #[test]
    fn test_corner_abbr() {
        assert_eq!(Corner::SouthWest.abbr(), "sw");
        assert_eq!(Corner::SouthEast.abbr(), "se");
        assert_eq!(Corner::NorthWest.abbr(), "nw");
        assert_eq!(Corner::NorthEast.abbr(), "ne");
    }
}
