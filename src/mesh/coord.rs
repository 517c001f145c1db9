use crate::error::{Axis, Digit, Error, Result};
use crate::mesh::MeshUnit;

/// Represents mesh coordinate, namely, discrete latitude and/or longitude.
///
/// This supports non-negative latitude and longitude only.
///
/// This has three digits, _first_, _second_ and _third_.
/// The first takes values from 0 to 99, the second does from 0 to 7
/// and the third does from 0 to 9 inclusive.
///
/// We note that the third digit takes either 0 or 5 only
/// on the mesh with mesh unit [`MeshUnit::Five`].
///
/// # Example
///
/// ```
/// # use parshift::mesh::*;
/// // The selection of MeshCoord depends on mesh unit,
/// // every fifth MeshCoord is taken when MeshUnit::Five given
/// let coord = MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::One)?;
/// assert_eq!(coord, MeshCoord::try_new(54, 1, 2)?);
/// let coord = MeshCoord::try_from_latitude(36.103774791666666, MeshUnit::Five)?;
/// assert_eq!(coord, MeshCoord::try_new(54, 1, 0)?);
///
/// // Increment/decrement (not in-place)
/// let coord = MeshCoord::try_new(54, 1, 2)?;
/// assert_eq!(coord.try_next_up(MeshUnit::One)?, MeshCoord::try_new(54, 1, 3)?);
/// assert_eq!(coord.try_next_down(MeshUnit::One)?, MeshCoord::try_new(54, 1, 1)?);
///
/// // Unit must be consistent with MeshCoord
/// assert!(coord.try_next_up(MeshUnit::Five).is_err());
/// # Ok::<(), parshift::Error>(())
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MeshCoordRecord"))]
pub struct MeshCoord {
    /// Takes 0 to 99 inclusive.
    pub(crate) first: u8,
    /// Takes 0 to 7 inclusive.
    pub(crate) second: u8,
    /// Takes 0 to 9 inclusive.
    pub(crate) third: u8,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MeshCoordRecord {
    first: u8,
    second: u8,
    third: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<MeshCoordRecord> for MeshCoord {
    type Error = Error;

    fn try_from(value: MeshCoordRecord) -> Result<Self> {
        Self::try_new(value.first, value.second, value.third)
    }
}

impl TryFrom<(u8, u8, u8)> for MeshCoord {
    type Error = Error;

    /// Makes a [`MeshCoord`], see [`MeshCoord::try_new`].
    #[inline]
    fn try_from(value: (u8, u8, u8)) -> Result<Self> {
        Self::try_new(value.0, value.1, value.2)
    }
}

impl MeshCoord {
    /// Smallest [`MeshCoord`] value.
    pub const MIN: MeshCoord = Self {
        first: 0,
        second: 0,
        third: 0,
    };

    /// Largest [`MeshCoord`] value.
    pub const MAX: MeshCoord = Self {
        first: 99,
        second: 7,
        third: 9,
    };

    /// Makes a [`MeshCoord`].
    ///
    /// # Errors
    ///
    /// If one of `first`, `second` and `third` is out-of-range,
    /// `first` takes values from 0 to 99, `second` does from 0 to 7,
    /// and `third` does from 0 to 9 inclusive.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::MeshCoord;
    /// let coord = MeshCoord::try_new(1, 2, 3)?;
    /// assert_eq!(coord.first(), 1);
    /// assert_eq!(coord.second(), 2);
    /// assert_eq!(coord.third(), 3);
    ///
    /// assert!(MeshCoord::try_new(1, 8, 3).is_err());
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub const fn try_new(first: u8, second: u8, third: u8) -> Result<Self> {
        macro_rules! check {
            ($value:ident, $digit:expr) => {
                if $value > Self::MAX.$value {
                    return Err(Error::OutOfRangeDigit {
                        digit: $digit,
                        value: $value,
                        high: Self::MAX.$value,
                    });
                }
            };
        }

        check!(first, Digit::First);
        check!(second, Digit::Second);
        check!(third, Digit::Third);

        Ok(Self {
            first,
            second,
            third,
        })
    }

    /// Returns the first digit (`0..100`) of `self`.
    #[inline]
    #[must_use]
    pub const fn first(&self) -> u8 {
        self.first
    }

    /// Returns the second digit (`0..8`) of `self`.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Returns the third digit (`0..10`) of `self`.
    #[inline]
    #[must_use]
    pub const fn third(&self) -> u8 {
        self.third
    }

    /// Returns `true` if `self` is compatible to `unit`.
    ///
    /// This always returns `true` when `unit` is [`MeshUnit::One`].
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let coord = MeshCoord::try_new(1, 2, 3)?;
    /// assert!(coord.is_mesh_unit(MeshUnit::One));
    /// assert!(!coord.is_mesh_unit(MeshUnit::Five));
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_mesh_unit(&self, unit: MeshUnit) -> bool {
        self.third % unit.to_u8() == 0
    }

    #[inline]
    fn check_unit(&self, unit: MeshUnit) -> Result<()> {
        if self.is_mesh_unit(unit) {
            Ok(())
        } else {
            Err(Error::InconsistentMeshUnit { coord: *self, unit })
        }
    }

    /// `value` is `1.5 * latitude` or `longitude - 100` (mod 100), in `0.0..=180.0`.
    fn from_degree(value: f64, unit: MeshUnit) -> Self {
        debug_assert!((0.0..=180.0).contains(&value));

        let integer = value.floor() as u32;

        let first = integer % 100;
        let second = (8. * value).floor() as u32 - 8 * integer;
        // 80 * value may round up onto the next second-digit boundary
        let third = ((80. * value).floor() as u32 - 80 * integer - 10 * second).min(9);

        // max of integer is 180, then every digit fits u8
        Self {
            first: first as u8,
            second: second as u8,
            third: match unit {
                MeshUnit::One => third as u8,
                MeshUnit::Five if third < 5 => 0,
                MeshUnit::Five => 5,
            },
        }
    }

    /// Makes the greatest [`MeshCoord`] less than or equal to latitude `v` with `unit`.
    ///
    /// `v` satisfies 0.0 <= and < 66.666...
    ///
    /// This is the left inverse of [`MeshCoord::to_latitude`] when `unit` is [`MeshUnit::One`].
    ///
    /// # Errors
    ///
    /// If `v` is out-of-range.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let v = 36.103774791666666;
    /// assert_eq!(
    ///     MeshCoord::try_from_latitude(v, MeshUnit::One)?,
    ///     MeshCoord::try_new(54, 1, 2)?
    /// );
    /// assert_eq!(
    ///     MeshCoord::try_from_latitude(v, MeshUnit::Five)?,
    ///     MeshCoord::try_new(54, 1, 0)?
    /// );
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub fn try_from_latitude(v: f64, unit: MeshUnit) -> Result<Self> {
        let value = {
            let temp = 3. * v / 2.;
            // An odd mantissa of `v` rounds `temp` downward (ties-to-even),
            // step it up for the identity coord == try_from_latitude(coord.to_latitude())
            if v.to_bits() & 1 == 1 {
                temp.next_up()
            } else {
                temp
            }
        };

        if !(0.0..100.0).contains(&value) {
            return Err(Error::OutOfRangePosition {
                axis: Axis::Latitude,
                value: v,
            });
        }

        Ok(Self::from_degree(value, unit))
    }

    /// Makes the greatest [`MeshCoord`] less than or equal to longitude `v` with `unit`.
    ///
    /// `v` satisfies 100.0 <= and <= 180.0.
    ///
    /// # Errors
    ///
    /// If `v` is out-of-range.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let v = 140.08785504166664;
    /// assert_eq!(
    ///     MeshCoord::try_from_longitude(v, MeshUnit::One)?,
    ///     MeshCoord::try_new(40, 0, 7)?
    /// );
    /// assert_eq!(
    ///     MeshCoord::try_from_longitude(v, MeshUnit::Five)?,
    ///     MeshCoord::try_new(40, 0, 5)?
    /// );
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub fn try_from_longitude(v: f64, unit: MeshUnit) -> Result<Self> {
        if !(100.0..=180.0).contains(&v) {
            return Err(Error::OutOfRangePosition {
                axis: Axis::Longitude,
                value: v,
            });
        }

        Ok(Self::from_degree(v, unit))
    }

    #[inline]
    fn to_degree(self) -> f64 {
        self.first as f64 + self.second as f64 / 8. + self.third as f64 / 80.
    }

    /// Returns the latitude that `self` converts into.
    ///
    /// This does not check that `self` represents latitude.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let coord = MeshCoord::try_new(54, 1, 2)?;
    /// assert_eq!(coord.to_latitude(), 36.1);
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn to_latitude(&self) -> f64 {
        2. * self.to_degree() / 3.
    }

    /// Returns the longitude that `self` converts into.
    ///
    /// This does not check that `self` represents longitude.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let coord = MeshCoord::try_new(40, 0, 7)?;
    /// assert_eq!(coord.to_longitude(), 140.0875);
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn to_longitude(&self) -> f64 {
        100. + self.to_degree()
    }

    /// Returns the smallest [`MeshCoord`] greater than `self` in `unit`.
    ///
    /// # Errors
    ///
    /// If `unit` is [`MeshUnit::Five`] although `self.third` is neither `0` nor `5`,
    /// or `self` is [`MeshCoord::MAX`] (overflow).
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let coord = MeshCoord::try_new(0, 0, 0)?;
    /// assert_eq!(coord.try_next_up(MeshUnit::One)?, MeshCoord::try_new(0, 0, 1)?);
    /// assert_eq!(coord.try_next_up(MeshUnit::Five)?, MeshCoord::try_new(0, 0, 5)?);
    ///
    /// let coord = MeshCoord::try_new(0, 7, 9)?;
    /// assert_eq!(coord.try_next_up(MeshUnit::One)?, MeshCoord::try_new(1, 0, 0)?);
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub fn try_next_up(&self, unit: MeshUnit) -> Result<Self> {
        self.check_unit(unit)?;

        let step = unit.to_u8();
        let bound = 10 - step;

        if self.third < bound {
            Ok(Self {
                third: self.third + step,
                ..*self
            })
        } else if self.second < Self::MAX.second {
            Ok(Self {
                first: self.first,
                second: self.second + 1,
                third: 0,
            })
        } else if self.first < Self::MAX.first {
            Ok(Self {
                first: self.first + 1,
                second: 0,
                third: 0,
            })
        } else {
            Err(Error::MeshCoordOverflow { coord: *self })
        }
    }

    /// Returns the greatest [`MeshCoord`] less than `self` in `unit`.
    ///
    /// # Errors
    ///
    /// If `unit` is [`MeshUnit::Five`] although `self.third` is neither `0` nor `5`,
    /// or `self` is [`MeshCoord::MIN`] (overflow).
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let coord = MeshCoord::try_new(0, 0, 5)?;
    /// assert_eq!(coord.try_next_down(MeshUnit::One)?, MeshCoord::try_new(0, 0, 4)?);
    /// assert_eq!(coord.try_next_down(MeshUnit::Five)?, MeshCoord::try_new(0, 0, 0)?);
    ///
    /// assert!(MeshCoord::MIN.try_next_down(MeshUnit::One).is_err());
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub fn try_next_down(&self, unit: MeshUnit) -> Result<Self> {
        self.check_unit(unit)?;

        let step = unit.to_u8();
        let bound = 10 - step;

        if self.third > 0 {
            Ok(Self {
                third: self.third - step,
                ..*self
            })
        } else if self.second > 0 {
            Ok(Self {
                first: self.first,
                second: self.second - 1,
                third: bound,
            })
        } else if self.first > 0 {
            Ok(Self {
                first: self.first - 1,
                second: Self::MAX.second,
                third: bound,
            })
        } else {
            Err(Error::MeshCoordOverflow { coord: *self })
        }
    }
}
