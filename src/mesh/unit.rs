use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// The mesh unit, or approximate length of cell's edge.
///
/// # Example
///
/// ```
/// # use parshift::mesh::MeshUnit;
/// assert_eq!(MeshUnit::try_from(1)?, MeshUnit::One);
/// assert_eq!(MeshUnit::try_from(5)?, MeshUnit::Five);
/// assert!(MeshUnit::try_from(2).is_err());
/// # Ok::<(), parshift::Error>(())
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MeshUnit {
    /// for 1 \[km\]
    One,
    /// for 5 \[km\]
    Five,
}

impl TryFrom<u8> for MeshUnit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::One),
            5 => Ok(Self::Five),
            unit => Err(Error::InvalidMeshUnit { unit }),
        }
    }
}

impl From<MeshUnit> for u8 {
    #[inline]
    fn from(value: MeshUnit) -> Self {
        value.to_u8()
    }
}

impl Display for MeshUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_u8())
    }
}

impl MeshUnit {
    /// Returns 1 or 5.
    #[inline]
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Five => 5,
        }
    }

    /// Returns the position scale of the cell, (latitude, longitude).
    ///
    /// The cell stretches 1.5 times in the latitude direction
    /// compared to the longitude direction, then the latitude uses 120 = 1.5 * 80.
    #[inline]
    pub(crate) const fn scale(self) -> (f64, f64) {
        match self {
            Self::One => (120., 80.),
            Self::Five => (24., 16.),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MeshUnit {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.to_u8())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MeshUnit {
    #[inline]
    fn deserialize<D>(deserializer: D) -> std::result::Result<MeshUnit, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = <u8 as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from(v).map_err(|_| {
            serde::de::Error::custom(format_args!(
                "invalid value: integer `{v}`, expected an integer, 1 or 5"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from() {
        assert_eq!(MeshUnit::try_from(1), Ok(MeshUnit::One));
        assert_eq!(MeshUnit::try_from(5), Ok(MeshUnit::Five));
        for v in [0, 2, 3, 4, 6, 10, 255] {
            assert_eq!(
                MeshUnit::try_from(v),
                Err(Error::InvalidMeshUnit { unit: v })
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(MeshUnit::One.to_string(), "1");
        assert_eq!(MeshUnit::Five.to_string(), "5");
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde() {
        use serde_test::{assert_de_tokens_error, assert_tokens, Token};

        assert_tokens(&MeshUnit::One, &[Token::U8(1)]);
        assert_tokens(&MeshUnit::Five, &[Token::U8(5)]);
        assert_de_tokens_error::<MeshUnit>(
            &[Token::U8(2)],
            "invalid value: integer `2`, expected an integer, 1 or 5",
        );
    }
}
