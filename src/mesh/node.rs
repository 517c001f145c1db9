use std::str::FromStr;

use crate::error::{Error, Result};
use crate::mesh::{MeshCoord, MeshUnit};
use crate::Point;

/// Represents mesh node, a pair of [`MeshCoord`]s.
///
/// We note that this supports non-negative latitude and longitude only.
///
/// # Example
///
/// ```
/// # use parshift::Point;
/// # use parshift::mesh::*;
/// // Construct from latitude and longitude, altitude ignores
/// let point = Point::new(36.10377479, 140.087855041, 0.0);
/// let node = MeshNode::try_from_point(&point, MeshUnit::One)?;
/// assert_eq!(node.to_meshcode(), 54401027);
///
/// // The result depends on the mesh unit
/// let node = MeshNode::try_from_point(&point, MeshUnit::Five)?;
/// assert_eq!(node.to_meshcode(), 54401005);
///
/// // Construct from meshcode
/// let node = MeshNode::try_from_meshcode(54401027)?;
///
/// // The position where the MeshNode locates
/// assert_eq!(node.to_point(), Point::new(36.1, 140.0875, 0.0));
/// # Ok::<(), parshift::Error>(())
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MeshNodeRecord"))]
pub struct MeshNode {
    /// The mesh coord of latitude
    pub(crate) latitude: MeshCoord,
    /// The mesh coord of longitude
    ///
    /// This satisfies <= `MeshCoord(80, 0, 0)`
    pub(crate) longitude: MeshCoord,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MeshNodeRecord {
    latitude: MeshCoord,
    longitude: MeshCoord,
}

#[cfg(feature = "serde")]
impl TryFrom<MeshNodeRecord> for MeshNode {
    type Error = Error;

    fn try_from(value: MeshNodeRecord) -> Result<Self> {
        Self::try_new(value.latitude, value.longitude)
    }
}

impl TryFrom<u32> for MeshNode {
    type Error = Error;

    /// Makes a [`MeshNode`] from meshcode, see [`MeshNode::try_from_meshcode`].
    #[inline]
    fn try_from(value: u32) -> Result<Self> {
        Self::try_from_meshcode(value)
    }
}

impl From<MeshNode> for u32 {
    /// Makes a meshcode from [`MeshNode`], see [`MeshNode::to_meshcode`].
    #[inline]
    fn from(value: MeshNode) -> Self {
        value.to_meshcode()
    }
}

impl FromStr for MeshNode {
    type Err = Error;

    /// Parses a meshcode, e.g. `"54401027"`.
    fn from_str(s: &str) -> Result<Self> {
        let meshcode: u32 = s
            .trim()
            .parse()
            .map_err(|_| Error::ParseMeshcode { s: s.to_string() })?;
        Self::try_from_meshcode(meshcode)
    }
}

impl MeshNode {
    /// Smallest [`MeshNode`] value.
    pub const MIN: MeshNode = MeshNode {
        latitude: MeshCoord::MIN,
        longitude: MeshCoord::MIN,
    };

    /// Largest [`MeshNode`] value.
    pub const MAX: MeshNode = MeshNode {
        latitude: MeshCoord::MAX,
        longitude: MeshCoord {
            first: 80,
            second: 0,
            third: 0,
        },
    };

    /// Makes a [`MeshNode`].
    ///
    /// # Errors
    ///
    /// If `longitude` is greater than `MeshCoord(80, 0, 0)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let latitude = MeshCoord::try_new(54, 1, 2)?;
    /// let longitude = MeshCoord::try_new(40, 0, 7)?;
    ///
    /// let node = MeshNode::try_new(latitude, longitude)?;
    /// assert_eq!(node.latitude(), latitude);
    /// assert_eq!(node.longitude(), longitude);
    ///
    /// assert!(MeshNode::try_new(latitude, MeshCoord::try_new(80, 0, 1)?).is_err());
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub const fn try_new(latitude: MeshCoord, longitude: MeshCoord) -> Result<Self> {
        let bound = Self::MAX.longitude;
        if longitude.first > bound.first
            || (longitude.first == bound.first && (longitude.second > 0 || longitude.third > 0))
        {
            return Err(Error::OutOfRangeNode { longitude });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude coordinate of `self`.
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> MeshCoord {
        self.latitude
    }

    /// Returns the longitude coordinate of `self`.
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> MeshCoord {
        self.longitude
    }

    /// Returns `true` if both coordinates of `self` are compatible to `unit`.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let node = MeshNode::try_from_meshcode(54401027)?;
    /// assert!(node.is_mesh_unit(MeshUnit::One));
    /// assert!(!node.is_mesh_unit(MeshUnit::Five));
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_mesh_unit(&self, unit: MeshUnit) -> bool {
        self.latitude.is_mesh_unit(unit) && self.longitude.is_mesh_unit(unit)
    }

    /// Makes the nearest south-west [`MeshNode`] of (`latitude`, `longitude`).
    ///
    /// # Errors
    ///
    /// If `latitude` and/or `longitude` is out-of-range.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let node = MeshNode::try_from_pos(36.10377479, 140.087855041, MeshUnit::One)?;
    /// assert_eq!(node.to_meshcode(), 54401027);
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub fn try_from_pos(latitude: f64, longitude: f64, unit: MeshUnit) -> Result<Self> {
        let latitude = MeshCoord::try_from_latitude(latitude, unit)?;
        let longitude = MeshCoord::try_from_longitude(longitude, unit)?;
        Self::try_new(latitude, longitude)
    }

    /// Makes the nearest south-west [`MeshNode`] of `point`.
    ///
    /// This is independent of [`Point::altitude`].
    ///
    /// # Errors
    ///
    /// If the latitude and/or the longitude of `point` is out-of-range.
    #[inline]
    pub fn try_from_point(point: &Point, unit: MeshUnit) -> Result<Self> {
        Self::try_from_pos(point.latitude(), point.longitude(), unit)
    }

    /// Makes a [`MeshNode`] represented by `meshcode`.
    ///
    /// This is the inverse of [`MeshNode::to_meshcode`].
    ///
    /// # Errors
    ///
    /// If `meshcode` has more than 8 digits or one of its digits is out-of-range.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// assert_eq!(
    ///     MeshNode::try_from_meshcode(54401027)?,
    ///     MeshNode::try_new(MeshCoord::try_new(54, 1, 2)?, MeshCoord::try_new(40, 0, 7)?)?
    /// );
    /// assert!(MeshNode::try_from_meshcode(54401827).is_err());
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[allow(clippy::inconsistent_digit_grouping)]
    pub fn try_from_meshcode(meshcode: u32) -> Result<Self> {
        let err = || Error::OutOfRangeMeshcode { meshcode };

        if meshcode > 99_99_99_99 {
            return Err(err());
        }

        // each quotient is less than 100 by the bound above
        let lat_first = meshcode / 100_00_00;
        let lng_first = meshcode / 100_00 % 100;
        let lat_second = meshcode / 1_000 % 10;
        let lng_second = meshcode / 100 % 10;
        let lat_third = meshcode / 10 % 10;
        let lng_third = meshcode % 10;

        let latitude = MeshCoord::try_new(lat_first as u8, lat_second as u8, lat_third as u8)
            .map_err(|_| err())?;
        let longitude = MeshCoord::try_new(lng_first as u8, lng_second as u8, lng_third as u8)
            .map_err(|_| err())?;

        Self::try_new(latitude, longitude).map_err(|_| err())
    }

    /// Returns a meshcode represents `self`.
    ///
    /// The result is up to 8 digits.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let node = MeshNode::try_new(MeshCoord::try_new(54, 1, 2)?, MeshCoord::try_new(40, 0, 7)?)?;
    /// assert_eq!(node.to_meshcode(), 54401027);
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    #[must_use]
    pub const fn to_meshcode(&self) -> u32 {
        (self.latitude.first as u32 * 100 + self.longitude.first as u32) * 10_000
            + (self.latitude.second as u32 * 10 + self.longitude.second as u32) * 100
            + (self.latitude.third as u32 * 10 + self.longitude.third as u32)
    }

    /// Returns the (latitude, longitude) where `self` locates.
    #[inline]
    #[must_use]
    pub fn to_pos(&self) -> (f64, f64) {
        (self.latitude.to_latitude(), self.longitude.to_longitude())
    }

    /// Returns a [`Point`] where `self` locates, with altitude 0.0.
    #[inline]
    #[must_use]
    pub fn to_point(&self) -> Point {
        let (latitude, longitude) = self.to_pos();
        Point::new(latitude, longitude, 0.0)
    }
}
