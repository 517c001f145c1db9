use crate::error::{Error, Result};
use crate::mesh::{MeshNode, MeshUnit};
use crate::Point;

/// Represents unit mesh cell, a quadruplet of [`MeshNode`]s and [`MeshUnit`].
///
/// This has no other [`MeshNode`]s inside `self` in the unit.
///
/// The cell is, roughly, a square with `unit` \[km\] length edges.
///
/// # Example
///
/// ```
/// # use parshift::Point;
/// # use parshift::mesh::*;
/// // Construct from latitude and longitude, altitude ignores
/// // (The result depends on the mesh unit)
/// let point = Point::new(36.10377479, 140.087855041, 0.0);
/// let cell = MeshCell::try_from_point(&point, MeshUnit::One)?;
/// assert_eq!(cell.south_west(), MeshNode::try_from_meshcode(54401027)?);
/// assert_eq!(cell.south_east(), MeshNode::try_from_meshcode(54401028)?);
/// assert_eq!(cell.north_west(), MeshNode::try_from_meshcode(54401037)?);
/// assert_eq!(cell.north_east(), MeshNode::try_from_meshcode(54401038)?);
///
/// // Construct from node
/// let node = MeshNode::try_from_meshcode(54401027)?;
/// assert_eq!(MeshCell::try_from_node(node, MeshUnit::One)?, cell);
///
/// // Construct from meshcode
/// assert_eq!(MeshCell::try_from_meshcode(54401027, MeshUnit::One)?, cell);
///
/// // Find the position within the cell, from 0.0 to 1.0
/// let (latitude, longitude) = cell.position(point.latitude(), point.longitude());
/// assert_eq!(latitude, 0.4529748000001632);
/// assert_eq!(longitude, 0.028403280000475206);
/// # Ok::<(), parshift::Error>(())
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MeshCellRecord"))]
pub struct MeshCell {
    pub(crate) south_west: MeshNode,
    pub(crate) south_east: MeshNode,
    pub(crate) north_west: MeshNode,
    pub(crate) north_east: MeshNode,
    /// The mesh unit which is consistent with nodes
    pub(crate) unit: MeshUnit,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MeshCellRecord {
    south_west: MeshNode,
    south_east: MeshNode,
    north_west: MeshNode,
    north_east: MeshNode,
    unit: MeshUnit,
}

#[cfg(feature = "serde")]
impl TryFrom<MeshCellRecord> for MeshCell {
    type Error = Error;

    fn try_from(value: MeshCellRecord) -> Result<Self> {
        Self::try_new(
            value.south_west,
            value.south_east,
            value.north_west,
            value.north_east,
            value.unit,
        )
    }
}

impl MeshCell {
    /// Makes a [`MeshCell`] from four explicit corners.
    ///
    /// # Errors
    ///
    /// If the nodes and `unit` do not construct a unit cell.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let south_west = MeshNode::try_from_meshcode(54401027)?;
    /// let south_east = MeshNode::try_from_meshcode(54401028)?;
    /// let north_west = MeshNode::try_from_meshcode(54401037)?;
    /// let north_east = MeshNode::try_from_meshcode(54401038)?;
    ///
    /// let cell = MeshCell::try_new(south_west, south_east, north_west, north_east, MeshUnit::One)?;
    /// assert_eq!(cell.unit(), MeshUnit::One);
    ///
    /// // north-east and north-west are swapped
    /// assert!(MeshCell::try_new(south_west, south_east, north_east, north_west, MeshUnit::One).is_err());
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub fn try_new(
        south_west: MeshNode,
        south_east: MeshNode,
        north_west: MeshNode,
        north_east: MeshNode,
        unit: MeshUnit,
    ) -> Result<Self> {
        for node in [south_west, south_east, north_west, north_east] {
            for coord in [node.latitude, node.longitude] {
                if !coord.is_mesh_unit(unit) {
                    return Err(Error::InconsistentMeshUnit { coord, unit });
                }
            }
        }

        let expected = Self::try_from_node(south_west, unit)?;
        for (actual, expected) in [
            (south_east, expected.south_east),
            (north_west, expected.north_west),
            (north_east, expected.north_east),
        ] {
            if actual != expected {
                return Err(Error::InconsistentMeshCell {
                    sw: south_west,
                    other: actual,
                    unit,
                });
            }
        }

        Ok(expected)
    }

    /// Returns the south-west node of `self`.
    #[inline]
    #[must_use]
    pub const fn south_west(&self) -> MeshNode {
        self.south_west
    }

    /// Returns the south-east node of `self`.
    #[inline]
    #[must_use]
    pub const fn south_east(&self) -> MeshNode {
        self.south_east
    }

    /// Returns the north-west node of `self`.
    #[inline]
    #[must_use]
    pub const fn north_west(&self) -> MeshNode {
        self.north_west
    }

    /// Returns the north-east node of `self`.
    #[inline]
    #[must_use]
    pub const fn north_east(&self) -> MeshNode {
        self.north_east
    }

    /// Returns the mesh unit of `self`.
    #[inline]
    #[must_use]
    pub const fn unit(&self) -> MeshUnit {
        self.unit
    }

    /// Makes a [`MeshCell`] that has `node` as the south-west corner.
    ///
    /// # Errors
    ///
    /// If `node` is inconsistent with `unit`,
    /// or the north or the east step of `node` goes out of the mesh.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let node = MeshNode::try_from_meshcode(54401005)?;
    /// let cell = MeshCell::try_from_node(node, MeshUnit::Five)?;
    /// assert_eq!(cell.south_east().to_meshcode(), 54401100);
    /// assert_eq!(cell.north_west().to_meshcode(), 54401055);
    /// assert_eq!(cell.north_east().to_meshcode(), 54401150);
    ///
    /// let node = MeshNode::try_from_meshcode(54401027)?;
    /// assert!(MeshCell::try_from_node(node, MeshUnit::Five).is_err());
    /// # Ok::<(), parshift::Error>(())
    /// ```
    pub fn try_from_node(node: MeshNode, unit: MeshUnit) -> Result<Self> {
        let next_latitude = node.latitude.try_next_up(unit)?;
        let next_longitude = node.longitude.try_next_up(unit)?;

        Ok(Self {
            south_west: node,
            south_east: MeshNode::try_new(node.latitude, next_longitude)?,
            north_west: MeshNode::try_new(next_latitude, node.longitude)?,
            north_east: MeshNode::try_new(next_latitude, next_longitude)?,
            unit,
        })
    }

    /// Makes a [`MeshCell`] whose south-west corner is represented by `meshcode`.
    ///
    /// # Errors
    ///
    /// If `meshcode` is invalid, or it cannot construct a unit cell.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let cell = MeshCell::try_from_meshcode(54401027, MeshUnit::One)?;
    /// assert_eq!(cell.north_east().to_meshcode(), 54401038);
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    pub fn try_from_meshcode(meshcode: u32, unit: MeshUnit) -> Result<Self> {
        let node = MeshNode::try_from_meshcode(meshcode)?;
        Self::try_from_node(node, unit)
    }

    /// Makes a [`MeshCell`] which contains (`latitude`, `longitude`).
    ///
    /// # Errors
    ///
    /// If `latitude` and/or `longitude` is out-of-range,
    /// or it cannot construct a unit cell.
    #[inline]
    pub fn try_from_pos(latitude: f64, longitude: f64, unit: MeshUnit) -> Result<Self> {
        let node = MeshNode::try_from_pos(latitude, longitude, unit)?;
        Self::try_from_node(node, unit)
    }

    /// Makes a [`MeshCell`] which contains `point`.
    ///
    /// The result is independent of [`Point::altitude`].
    ///
    /// # Errors
    ///
    /// Same as [`MeshCell::try_from_pos`].
    #[inline]
    pub fn try_from_point(point: &Point, unit: MeshUnit) -> Result<Self> {
        Self::try_from_pos(point.latitude(), point.longitude(), unit)
    }

    /// Returns the position of (`latitude`, `longitude`) in the cell.
    ///
    /// This returns from 0.0 to 1.0 for each of latitude and longitude
    /// if the position is inside `self`, and it extrapolates linearly otherwise.
    ///
    /// We note that the result is a (latitude, longitude) pair,
    /// not a right-handed (x, y) pair.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::mesh::*;
    /// let (latitude, longitude) = (36.10377479, 140.087855041);
    ///
    /// let cell = MeshCell::try_from_pos(latitude, longitude, MeshUnit::One)?;
    /// assert_eq!(
    ///     cell.position(latitude, longitude),
    ///     (0.4529748000001632, 0.028403280000475206)
    /// );
    ///
    /// // the result depends on the mesh unit
    /// let cell = MeshCell::try_from_pos(latitude, longitude, MeshUnit::Five)?;
    /// assert_eq!(
    ///     cell.position(latitude, longitude),
    ///     (0.4905949600000099, 0.405680656000186)
    /// );
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    #[must_use]
    pub fn position(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let (origin_latitude, origin_longitude) = self.south_west.to_pos();
        let (scale_latitude, scale_longitude) = self.unit.scale();
        (
            scale_latitude * (latitude - origin_latitude),
            scale_longitude * (longitude - origin_longitude),
        )
    }
}
