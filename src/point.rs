//! Provides [`Point`] and the normalization of latitude and longitude.
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::dms::{self, ParseDmsError};
use crate::mesh::{MeshCell, MeshNode, MeshUnit};
use crate::transformer::Correction;
use crate::Result;

/// Returns the latitude reflected into -90.0 <= and <= 90.0,
/// and `true` if the reflection crosses a pole.
fn reflect_latitude(t: f64) -> (f64, bool) {
    if t.is_nan() || (-90.0..=90.0).contains(&t) {
        return (t, false);
    }

    match t % 360.0 {
        s if s.abs() > 270.0 => (s - f64::copysign(360.0, s), false),
        s if s.abs() > 90.0 => (f64::copysign(180.0, s) - s, true),
        s => (s, false),
    }
}

/// Returns the latitude normalized into -90.0 <= and <= 90.0.
///
/// The latitude beyond a pole is reflected back,
/// see [`Point::new`] for the accompanying longitude shift.
///
/// # Example
///
/// ```
/// # use parshift::point::normalize_latitude;
/// assert_eq!(normalize_latitude(35.0), 35.0);
/// assert_eq!(normalize_latitude(100.0), 80.0);
/// assert_eq!(normalize_latitude(-100.0), -80.0);
/// assert_eq!(normalize_latitude(380.0), 20.0);
/// ```
#[inline]
#[must_use]
pub fn normalize_latitude(t: f64) -> f64 {
    reflect_latitude(t).0
}

/// Returns the longitude normalized into -180.0 < and <= 180.0.
///
/// # Example
///
/// ```
/// # use parshift::point::normalize_longitude;
/// assert_eq!(normalize_longitude(145.0), 145.0);
/// assert_eq!(normalize_longitude(180.0), 180.0);
/// assert_eq!(normalize_longitude(-180.0), 180.0);
/// assert_eq!(normalize_longitude(200.0), -160.0);
/// ```
#[must_use]
pub fn normalize_longitude(t: f64) -> f64 {
    if t.is_nan() || (-180.0 < t && t <= 180.0) {
        return t;
    }

    match t % 360.0 {
        s if s > 180.0 => s - 360.0,
        s if s <= -180.0 => s + 360.0,
        s => s,
    }
}

/// Represents a position on the Earth, a triplet latitude, longitude and altitude.
///
/// The latitude and the longitude are always normalized,
/// see [`Point::new`].
///
/// # Example
///
/// ```
/// # use parshift::Point;
/// # use parshift::transformer::Correction;
/// // Construct
/// let point = Point::new(35.0, 145.0, 5.0);
/// assert_eq!(point.latitude(), 35.0);
/// assert_eq!(point.longitude(), 145.0);
/// assert_eq!(point.altitude(), 5.0);
///
/// // Add/sub Correction
/// let result = point + Correction::new(1.0, 1.0, 1.0);
/// assert_eq!(result, Point::new(36.0, 146.0, 6.0));
/// let result = result - Correction::new(1.0, 1.0, 1.0);
/// assert_eq!(result, point);
/// ```
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "PointRecord"))]
pub struct Point {
    /// The latitude \[deg\] of the point
    latitude: f64,
    /// The longitude \[deg\] of the point
    longitude: f64,
    /// The altitude \[m\] of the point
    altitude: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PointRecord {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    altitude: f64,
}

#[cfg(feature = "serde")]
impl From<PointRecord> for Point {
    fn from(value: PointRecord) -> Self {
        Self::new(value.latitude, value.longitude, value.altitude)
    }
}

impl From<(f64, f64)> for Point {
    /// See [`Point::new`], defaulting 0.0 for altitude.
    #[inline]
    fn from(rhs: (f64, f64)) -> Self {
        Self::new(rhs.0, rhs.1, 0.0)
    }
}

impl From<(f64, f64, f64)> for Point {
    /// See [`Point::new`].
    #[inline]
    fn from(rhs: (f64, f64, f64)) -> Self {
        Self::new(rhs.0, rhs.1, rhs.2)
    }
}

impl From<MeshNode> for Point {
    /// See [`Point::from_node`].
    #[inline]
    fn from(value: MeshNode) -> Self {
        Self::from_node(&value)
    }
}

impl TryFrom<u32> for Point {
    type Error = crate::Error;

    /// See [`Point::try_from_meshcode`].
    #[inline]
    fn try_from(value: u32) -> Result<Self> {
        Self::try_from_meshcode(value)
    }
}

macro_rules! impl_ops {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait<Correction> for Point {
            type Output = Point;

            #[inline]
            fn $method(self, rhs: Correction) -> Point {
                Point::new(
                    self.latitude $op rhs.latitude,
                    self.longitude $op rhs.longitude,
                    self.altitude $op rhs.altitude,
                )
            }
        }

        impl $trait<&Correction> for Point {
            type Output = Point;

            #[inline]
            fn $method(self, rhs: &Correction) -> Point {
                self $op *rhs
            }
        }

        impl $trait<Correction> for &Point {
            type Output = Point;

            #[inline]
            fn $method(self, rhs: Correction) -> Point {
                *self $op rhs
            }
        }

        impl $trait<&Correction> for &Point {
            type Output = Point;

            #[inline]
            fn $method(self, rhs: &Correction) -> Point {
                *self $op *rhs
            }
        }

        impl $assign_trait<Correction> for Point {
            #[inline]
            fn $assign_method(&mut self, rhs: Correction) {
                *self = *self $op rhs;
            }
        }

        impl $assign_trait<&Correction> for Point {
            #[inline]
            fn $assign_method(&mut self, rhs: &Correction) {
                *self = *self $op *rhs;
            }
        }
    };
}

impl_ops!(Add, add, AddAssign, add_assign, +);
impl_ops!(Sub, sub, SubAssign, sub_assign, -);

impl Point {
    /// Makes a [`Point`] with normalizing latitude and longitude.
    ///
    /// The latitude is reflected into -90.0 <= and <= 90.0;
    /// when the reflection crosses a pole, the longitude turns half round (+180.0).
    /// Then the longitude is wrapped into -180.0 < and <= 180.0.
    /// The altitude is kept as-is.
    /// NaN passes through.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::Point;
    /// let point = Point::new(35.0, 145.0, 5.0);
    /// assert_eq!(point.latitude(), 35.0);
    /// assert_eq!(point.longitude(), 145.0);
    ///
    /// // beyond the north pole
    /// let point = Point::new(100.0, 145.0, 5.0);
    /// assert_eq!(point.latitude(), 80.0);
    /// assert_eq!(point.longitude(), -35.0);
    ///
    /// let point = Point::new(35.0, -180.0, 5.0);
    /// assert_eq!(point.longitude(), 180.0);
    /// ```
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        let (latitude, crossed) = reflect_latitude(latitude);
        let longitude = if crossed {
            normalize_longitude(longitude + 180.0)
        } else {
            normalize_longitude(longitude)
        };

        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Returns the latitude \[deg\] of `self`.
    #[inline]
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude \[deg\] of `self`.
    #[inline]
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the altitude \[m\] of `self`.
    #[inline]
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Makes a [`Point`] where the [`MeshNode`] represented by `meshcode` locates.
    ///
    /// The resulting altitude is 0.0.
    ///
    /// # Errors
    ///
    /// If `meshcode` is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::Point;
    /// assert_eq!(Point::try_from_meshcode(54401027)?, Point::new(36.1, 140.0875, 0.0));
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    pub fn try_from_meshcode(meshcode: u32) -> Result<Self> {
        let node = MeshNode::try_from_meshcode(meshcode)?;
        Ok(Self::from_node(&node))
    }

    /// Makes a [`Point`] where `node` locates, with altitude 0.0.
    #[inline]
    #[must_use]
    pub fn from_node(node: &MeshNode) -> Self {
        node.to_point()
    }

    /// Makes a [`Point`] from DMS notated latitude and longitude.
    ///
    /// # Errors
    ///
    /// If `latitude` and/or `longitude` is not a DMS notation.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::Point;
    /// let point = Point::try_from_dms("360613.58925", "1400516.27815", 2.34)?;
    /// assert_eq!(point.latitude(), 36.103774791666666);
    /// assert_eq!(point.longitude(), 140.08785504166667);
    /// assert_eq!(point.altitude(), 2.34);
    /// # Ok::<(), parshift::dms::ParseDmsError>(())
    /// ```
    pub fn try_from_dms(
        latitude: &str,
        longitude: &str,
        altitude: f64,
    ) -> std::result::Result<Self, ParseDmsError> {
        let latitude = latitude.parse::<dms::DMS>()?.to_degree();
        let longitude = longitude.parse::<dms::DMS>()?.to_degree();
        Ok(Self::new(latitude, longitude, altitude))
    }

    /// Returns the DMS notated latitude and longitude of `self`, and the altitude.
    ///
    /// This returns [`None`] if the latitude or the longitude is NaN.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::Point;
    /// let point = Point::new(36.5, 140.25, 2.34);
    /// let (latitude, longitude, altitude) = point.to_dms().unwrap();
    /// assert_eq!(latitude, "363000");
    /// assert_eq!(longitude, "1401500");
    /// assert_eq!(altitude, 2.34);
    /// ```
    #[must_use]
    pub fn to_dms(&self) -> Option<(String, String, f64)> {
        Some((
            dms::to_dms(self.latitude)?,
            dms::to_dms(self.longitude)?,
            self.altitude,
        ))
    }

    /// Returns the nearest south-west [`MeshNode`] of `self`.
    ///
    /// # Errors
    ///
    /// If the latitude and/or the longitude of `self` is out of the mesh.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::Point;
    /// # use parshift::mesh::MeshUnit;
    /// let point = Point::new(36.10377479, 140.087855041, 0.0);
    /// assert_eq!(point.try_to_node(MeshUnit::One)?.to_meshcode(), 54401027);
    /// assert_eq!(point.try_to_node(MeshUnit::Five)?.to_meshcode(), 54401005);
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    pub fn try_to_node(&self, unit: MeshUnit) -> Result<MeshNode> {
        MeshNode::try_from_point(self, unit)
    }

    /// Returns the meshcode of the nearest south-west [`MeshNode`] of `self`.
    ///
    /// # Errors
    ///
    /// Same as [`Point::try_to_node`].
    #[inline]
    pub fn try_to_meshcode(&self, unit: MeshUnit) -> Result<u32> {
        self.try_to_node(unit).map(|node| node.to_meshcode())
    }

    /// Returns the [`MeshCell`] which contains `self`.
    ///
    /// # Errors
    ///
    /// If it cannot construct a unit cell.
    #[inline]
    pub fn try_to_cell(&self, unit: MeshUnit) -> Result<MeshCell> {
        MeshCell::try_from_point(self, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_latitude() {
        for (e, v) in [
            (0., 0.),
            (-0., -0.),
            (20.0, 20.0),
            (-20.0, -20.0),
            (0.0, 360.0),
            (-90.0, 270.0),
            (0.0, 180.0),
            (90.0, 90.0),
            (-0.0, -360.0),
            (90.0, -270.0),
            (-0.0, -180.0),
            (-90.0, -90.0),
            (20.0, 380.),
            (-70.0, 290.),
            (-20.0, 200.),
            (70.0, 110.),
            (-20.0, -380.),
            (70.0, -290.),
            (20.0, -200.),
            (-70.0, -110.),
        ] {
            assert_eq!(normalize_latitude(v), e, "{v}");
        }
        assert!(normalize_latitude(f64::NAN).is_nan());
    }

    #[test]
    fn test_normalize_longitude() {
        for (e, v) in [
            (0.0, 0.0),
            (-0.0, -0.0),
            (20.0, 20.0),
            (-20.0, -20.0),
            (0.0, 360.0),
            (-90.0, 270.0),
            (180.0, 180.0),
            (90.0, 90.0),
            (-0.0, -360.0),
            (90.0, -270.0),
            (180.0, -180.0),
            (-90.0, -90.0),
            (20.0, 380.),
            (-70.0, 290.),
            (-160.0, 200.),
            (110.0, 110.),
            (-20.0, -380.),
            (70.0, -290.),
            (160.0, -200.),
            (-110.0, -110.),
            (180.0, 540.0),
            (180.0, -540.0),
        ] {
            assert_eq!(normalize_longitude(v), e, "{v}");
        }
        assert!(normalize_longitude(f64::NAN).is_nan());
    }

    #[test]
    fn test_new_crosses_pole() {
        let point = Point::new(100.0, 145.0, 1.0);
        assert_eq!(point.latitude(), 80.0);
        assert_eq!(point.longitude(), -35.0);
        assert_eq!(point.altitude(), 1.0);

        let point = Point::new(-100.0, -145.0, 1.0);
        assert_eq!(point.latitude(), -80.0);
        assert_eq!(point.longitude(), 35.0);

        // a full turn does not shift the longitude
        let point = Point::new(380.0, 145.0, 1.0);
        assert_eq!(point.latitude(), 20.0);
        assert_eq!(point.longitude(), 145.0);

        let point = Point::new(f64::NAN, f64::NAN, f64::NAN);
        assert!(point.latitude().is_nan());
        assert!(point.longitude().is_nan());
        assert!(point.altitude().is_nan());
    }

    #[test]
    fn test_idempotence() {
        let values = [
            -1000.0, -540.0, -361.0, -270.0, -180.0, -135.5, -90.0, -0.0, 0.0, 12.3, 90.0,
            91.0, 180.0, 269.9, 359.9, 360.0, 725.0,
        ];
        for latitude in values {
            for longitude in values {
                let once = Point::new(latitude, longitude, 0.0);
                let twice = Point::new(once.latitude(), once.longitude(), once.altitude());
                assert_eq!(once, twice, "({latitude}, {longitude})");
                assert!((-90.0..=90.0).contains(&once.latitude()));
                assert!(-180.0 < once.longitude() && once.longitude() <= 180.0);
            }
        }
    }

    #[test]
    fn test_ops() {
        let point = Point::new(35.0, 145.0, 5.0);
        let corr = Correction::new(1.0, 1.0, 1.0);

        assert_eq!(point + corr, Point::new(36.0, 146.0, 6.0));
        assert_eq!(&point + &corr, Point::new(36.0, 146.0, 6.0));
        assert_eq!(point - corr, Point::new(34.0, 144.0, 4.0));
        assert_eq!(&point - corr, Point::new(34.0, 144.0, 4.0));

        let mut actual = point;
        actual += corr;
        assert_eq!(actual, Point::new(36.0, 146.0, 6.0));
        actual -= &corr;
        assert_eq!(actual, point);

        // the result is normalized
        let point = Point::new(35.0, 180.0, 0.0);
        assert_eq!(point + corr, Point::new(36.0, -179.0, 1.0));
    }

    #[test]
    fn test_mesh() {
        let point = Point::new(36.10377479, 140.087855041, 10.0);
        assert_eq!(point.try_to_meshcode(MeshUnit::One).unwrap(), 54401027);
        assert_eq!(point.try_to_meshcode(MeshUnit::Five).unwrap(), 54401005);
        assert_eq!(
            point.try_to_node(MeshUnit::One).unwrap(),
            MeshNode::try_from_meshcode(54401027).unwrap()
        );
        assert_eq!(
            point.try_to_cell(MeshUnit::Five).unwrap(),
            MeshCell::try_from_meshcode(54401005, MeshUnit::Five).unwrap()
        );

        assert!(Point::new(-36.0, 140.0, 0.0)
            .try_to_meshcode(MeshUnit::One)
            .is_err());

        assert_eq!(
            Point::try_from(54401027).unwrap(),
            Point::new(36.1, 140.0875, 0.0)
        );
        assert!(Point::try_from_meshcode(54401827).is_err());
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde() {
        let point: Point =
            serde_json::from_str(r#"{"latitude":100.0,"longitude":145.0,"altitude":1.0}"#)
                .unwrap();
        assert_eq!(point, Point::new(80.0, -35.0, 1.0));

        let point: Point = serde_json::from_str(r#"{"latitude":36.0,"longitude":140.0}"#).unwrap();
        assert_eq!(point, Point::new(36.0, 140.0, 0.0));

        assert_eq!(
            serde_json::to_string(&Point::new(36.0, 140.0, 1.5)).unwrap(),
            r#"{"latitude":36.0,"longitude":140.0,"altitude":1.5}"#
        );
    }
}
