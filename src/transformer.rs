//! Provides [`Transformer`] etc.
use std::collections::HashMap;
use std::ops::Neg;

use crate::error::{Corner, Error, Result};
use crate::mesh::{MeshCell, MeshUnit};
use crate::par::{Format, ParseParError};
use crate::stats::StatisticalSummary;
use crate::Point;

/// Arc-second in degree.
const SECOND: f64 = 1. / 3600.;

/// Returns the value at (`latitude`, `longitude`) by bilinear interpolation
/// of the corner values `sw`, `se`, `nw` and `ne`.
///
/// `latitude` and `longitude` are the position in the unit square,
/// see [`MeshCell::position`].
///
/// # Example
///
/// ```
/// # use parshift::transformer::bilinear_interpolation;
/// assert_eq!(bilinear_interpolation(1., 2., 3., 4., 0., 0.), 1.);
/// assert_eq!(bilinear_interpolation(1., 2., 3., 4., 0., 1.), 2.);
/// assert_eq!(bilinear_interpolation(1., 2., 3., 4., 1., 0.), 3.);
/// assert_eq!(bilinear_interpolation(1., 2., 3., 4., 1., 1.), 4.);
/// assert_eq!(bilinear_interpolation(1., 2., 3., 4., 0.5, 0.5), 2.5);
/// ```
#[inline]
#[must_use]
pub fn bilinear_interpolation(
    sw: f64,
    se: f64,
    nw: f64,
    ne: f64,
    latitude: f64,
    longitude: f64,
) -> f64 {
    let (y, x) = (latitude, longitude);
    sw * (1. - x) * (1. - y) + se * x * (1. - y) + nw * (1. - x) * y + ne * x * y
}

/// Represents a parameter of a node, the value of a par file.
///
/// The latitude and the longitude are in arc-second \[sec\],
/// and the altitude is in meter \[m\].
///
/// # Example
///
/// ```
/// # use parshift::Parameter;
/// let parameter = Parameter::new(1., 2., 3.);
/// assert_eq!(parameter.latitude, 1.);
/// assert_eq!(parameter.longitude, 2.);
/// assert_eq!(parameter.altitude, 3.);
/// ```
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    /// The latitude parameter \[sec\]
    pub latitude: f64,
    /// The longitude parameter \[sec\]
    pub longitude: f64,
    /// The altitude parameter \[m\]
    pub altitude: f64,
}

impl From<(f64, f64, f64)> for Parameter {
    #[inline]
    fn from(value: (f64, f64, f64)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<[f64; 3]> for Parameter {
    #[inline]
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl Parameter {
    /// Makes a [`Parameter`].
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Returns $\sqrt{\text{latitude}^2 + \text{longitude}^2}$.
    #[inline]
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        f64::hypot(self.latitude, self.longitude)
    }
}

/// Represents the transformation correction.
///
/// The latitude and the longitude are in degree \[deg\],
/// and the altitude is in meter \[m\].
#[derive(Debug, PartialEq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Correction {
    /// The latitude correction \[deg\]
    pub latitude: f64,
    /// The longitude correction \[deg\]
    pub longitude: f64,
    /// The altitude correction \[m\]
    pub altitude: f64,
}

impl Neg for Correction {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.latitude, -self.longitude, -self.altitude)
    }
}

impl Correction {
    /// Makes a [`Correction`].
    #[inline]
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Returns $\sqrt{\text{latitude}^2 + \text{longitude}^2}$.
    #[inline]
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        f64::hypot(self.latitude, self.longitude)
    }
}

/// The parameters of the four corners of a [`MeshCell`].
struct Interpol<'a> {
    sw: &'a Parameter,
    se: &'a Parameter,
    nw: &'a Parameter,
    ne: &'a Parameter,
}

impl<'a> Interpol<'a> {
    /// Looks the corners up in the order south-west, south-east, north-west and north-east.
    fn from(parameter: &'a HashMap<u32, Parameter>, cell: &MeshCell) -> Result<Self> {
        let get = |corner: Corner| {
            let node = match corner {
                Corner::SouthWest => cell.south_west(),
                Corner::SouthEast => cell.south_east(),
                Corner::NorthWest => cell.north_west(),
                Corner::NorthEast => cell.north_east(),
            };
            let meshcode = node.to_meshcode();
            parameter
                .get(&meshcode)
                .ok_or(Error::ParameterNotFound { meshcode, corner })
        };

        Ok(Self {
            sw: get(Corner::SouthWest)?,
            se: get(Corner::SouthEast)?,
            nw: get(Corner::NorthWest)?,
            ne: get(Corner::NorthEast)?,
        })
    }

    /// Returns the interpolated (latitude, longitude, altitude) in the par file unit.
    fn interpol(&self, y: f64, x: f64) -> (f64, f64, f64) {
        let interpol = |component: fn(&Parameter) -> f64| {
            bilinear_interpolation(
                component(self.sw),
                component(self.se),
                component(self.nw),
                component(self.ne),
                y,
                x,
            )
        };

        (
            interpol(|p| p.latitude),
            interpol(|p| p.longitude),
            interpol(|p| p.altitude),
        )
    }

    /// Returns the derivative of the `component` with respect to the cell position,
    /// (d/dy, d/dx).
    fn gradient(&self, y: f64, x: f64, component: fn(&Parameter) -> f64) -> (f64, f64) {
        let (sw, se, nw, ne) = (
            component(self.sw),
            component(self.se),
            component(self.nw),
            component(self.ne),
        );

        (
            (nw - sw) * (1. - x) + (ne - se) * x,
            (se - sw) * (1. - y) + (ne - nw) * y,
        )
    }
}

/// The coordinate transformer, and represents a deserializing result of par file.
///
/// This holds the mesh unit and the parameters,
/// and it never changes them after construction.
/// Then a [`Transformer`] is shareable across threads without locking.
///
/// # Example
///
/// ```
/// # use parshift::{Point, TransformerBuilder};
/// # use parshift::mesh::MeshUnit;
/// // from SemiDynaEXE2023.par
/// let tf = TransformerBuilder::new(MeshUnit::Five)
///     .parameters([
///         (54401005, (-0.00622, 0.01516, 0.0946)),
///         (54401055, (-0.0062, 0.01529, 0.08972)),
///         (54401100, (-0.00663, 0.01492, 0.10374)),
///         (54401150, (-0.00664, 0.01506, 0.10087)),
///     ])
///     .build();
///
/// // forward transformation
/// let origin = Point::new(36.10377479, 140.087855041, 2.34);
/// let result = tf.forward(&origin)?;
/// assert_eq!(result.latitude(), 36.103773017086695);
/// assert_eq!(result.longitude(), 140.08785924333452);
/// assert_eq!(result.altitude(), 2.4363138578103);
///
/// // backward transformation
/// let p = tf.backward_safe(&result)?;
/// assert!((p.latitude() - origin.latitude()).abs() < 1e-8);
/// assert!((p.longitude() - origin.longitude()).abs() < 1e-8);
/// assert!((p.altitude() - origin.altitude()).abs() < 1e-3);
/// # Ok::<(), parshift::Error>(())
/// ```
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transformer {
    unit: MeshUnit,
    parameter: HashMap<u32, Parameter>,
    description: Option<String>,
}

impl Transformer {
    /// The iteration limit of [`Transformer::backward_safe`].
    pub const ITERATION: usize = 3;

    /// The tolerance \[deg\] of [`Transformer::backward_safe`].
    ///
    /// This is smaller than the quantization error of the published parameters.
    pub const CRITERIA: f64 = 2.5e-9;

    /// Makes a [`Transformer`].
    ///
    /// # Example
    ///
    /// ```
    /// # use std::collections::HashMap;
    /// # use parshift::{Transformer, Parameter};
    /// # use parshift::mesh::MeshUnit;
    /// let tf = Transformer::new(
    ///     MeshUnit::One,
    ///     HashMap::from([(12345678, Parameter::new(1., 2., 3.))]),
    /// );
    /// assert_eq!(tf.unit(), MeshUnit::One);
    /// assert_eq!(tf.parameter().len(), 1);
    /// assert_eq!(tf.description(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn new(unit: MeshUnit, parameter: HashMap<u32, Parameter>) -> Self {
        Self {
            unit,
            parameter,
            description: None,
        }
    }

    /// Makes a [`Transformer`] with description.
    #[inline]
    #[must_use]
    pub fn with_description(
        unit: MeshUnit,
        parameter: HashMap<u32, Parameter>,
        description: String,
    ) -> Self {
        Self {
            unit,
            parameter,
            description: Some(description),
        }
    }

    /// Deserializes par-formatted [`str`] into a [`Transformer`].
    ///
    /// See [`Parser`](crate::par::Parser) for detail.
    ///
    /// # Errors
    ///
    /// If it fails to parse `s`.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str, format: Format) -> std::result::Result<Self, ParseParError> {
        crate::par::from_str(s, format)
    }

    /// Returns the mesh unit of `self`.
    #[inline]
    #[must_use]
    pub const fn unit(&self) -> MeshUnit {
        self.unit
    }

    /// Returns the parameters of `self`, keyed by meshcode.
    #[inline]
    #[must_use]
    pub const fn parameter(&self) -> &HashMap<u32, Parameter> {
        &self.parameter
    }

    /// Returns the description of `self`.
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the statistics of the parameters.
    ///
    /// See [`StatisticalSummary`] for detail.
    #[must_use]
    pub fn statistics(&self) -> StatisticalSummary {
        StatisticalSummary::from_parameter(&self.parameter)
    }

    /// Returns the transformed position.
    ///
    /// This is [`Transformer::backward`] when `backward` is `true`,
    /// otherwise [`Transformer::forward`].
    ///
    /// # Errors
    ///
    /// Same as [`Transformer::forward`] and [`Transformer::backward`].
    #[inline]
    pub fn transform(&self, point: &Point, backward: bool) -> Result<Point> {
        if backward {
            self.backward(point)
        } else {
            self.forward(point)
        }
    }

    /// Returns the forward-transformed position.
    ///
    /// # Errors
    ///
    /// If the position is out of the mesh, or the parameter of a corner is not found.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::{Point, TransformerBuilder};
    /// # use parshift::mesh::MeshUnit;
    /// let tf = TransformerBuilder::new(MeshUnit::Five)
    ///     .parameters([
    ///         (54401005, (-0.00622, 0.01516, 0.0946)),
    ///         (54401055, (-0.0062, 0.01529, 0.08972)),
    ///         (54401100, (-0.00663, 0.01492, 0.10374)),
    ///         (54401150, (-0.00664, 0.01506, 0.10087)),
    ///     ])
    ///     .build();
    ///
    /// let result = tf.forward(&Point::new(36.10377479, 140.087855041, 2.34))?;
    /// assert_eq!(result, Point::new(36.103773017086695, 140.08785924333452, 2.4363138578103));
    /// # Ok::<(), parshift::Error>(())
    /// ```
    #[inline]
    pub fn forward(&self, point: &Point) -> Result<Point> {
        let corr = self.forward_corr(point)?;
        Ok(point + corr)
    }

    /// Returns the backward-transformed position.
    ///
    /// The result is an approximation of the inverse of [`Transformer::forward`],
    /// its error is data-dependent, see [`Transformer::backward_safe`] for
    /// the verified one.
    ///
    /// # Errors
    ///
    /// If the position is out of the mesh, or the parameter of a corner is not found.
    #[inline]
    pub fn backward(&self, point: &Point) -> Result<Point> {
        let corr = self.backward_corr(point)?;
        Ok(point + corr)
    }

    /// Returns the backward-transformed position verified by Newton's method.
    ///
    /// The error from the exact solution is less than [`Transformer::CRITERIA`]
    /// in latitude and longitude.
    ///
    /// # Errors
    ///
    /// If the position is out of the mesh, the parameter of a corner is not found,
    /// or the iteration does not converge in [`Transformer::ITERATION`] times.
    #[inline]
    pub fn backward_safe(&self, point: &Point) -> Result<Point> {
        let corr = self.backward_safe_corr(point)?;
        Ok(point + corr)
    }

    /// Returns the correction of the forward transformation.
    ///
    /// # Errors
    ///
    /// Same as [`Transformer::forward`].
    #[inline]
    pub fn forward_corr(&self, point: &Point) -> Result<Correction> {
        self.correction_at(point.latitude(), point.longitude())
    }

    /// Returns the correction of the backward transformation.
    ///
    /// # Errors
    ///
    /// Same as [`Transformer::backward`].
    pub fn backward_corr(&self, point: &Point) -> Result<Correction> {
        // 12 arc-seconds, a typical magnitude of the correction
        const DELTA: f64 = 1. / 300.;

        let corr = self.correction_at(point.latitude() - DELTA, point.longitude() + DELTA)?;

        let corr = self.correction_at(
            point.latitude() - corr.latitude,
            point.longitude() - corr.longitude,
        )?;

        Ok(-corr)
    }

    /// Returns the correction of the verified backward transformation.
    ///
    /// # Errors
    ///
    /// Same as [`Transformer::backward_safe`].
    pub fn backward_safe_corr(&self, point: &Point) -> Result<Correction> {
        let (latitude, longitude) = (point.latitude(), point.longitude());
        let (scale_y, scale_x) = self.unit.scale();

        // (yn, xn) solves (latitude, longitude) == (yn, xn) + correction_at(yn, xn)
        let (mut yn, mut xn) = (latitude, longitude);

        for iteration in 1..=Self::ITERATION {
            let cell = MeshCell::try_from_pos(yn, xn, self.unit)?;
            let interpol = Interpol::from(&self.parameter, &cell)?;

            let (y, x) = cell.position(yn, xn);
            let (corr_y, corr_x, _) = interpol.interpol(y, x);

            let fx = longitude - (xn + SECOND * corr_x);
            let fy = latitude - (yn + SECOND * corr_y);

            let (lng_y, lng_x) = interpol.gradient(y, x, |p| p.longitude);
            let (lat_y, lat_x) = interpol.gradient(y, x, |p| p.latitude);

            // Jacobian of (fx, fy) with respect to (xn, yn)
            let fx_x = -1. - SECOND * scale_x * lng_x;
            let fx_y = -SECOND * scale_y * lng_y;
            let fy_x = -SECOND * scale_x * lat_x;
            let fy_y = -1. - SECOND * scale_y * lat_y;

            let det = fx_x * fy_y - fx_y * fy_x;

            xn -= (fy_y * fx - fx_y * fy) / det;
            yn -= (fx_x * fy - fy_x * fx) / det;

            let corr = self.correction_at(yn, xn)?;

            let delta_latitude = latitude - (yn + corr.latitude);
            let delta_longitude = longitude - (xn + corr.longitude);

            tracing::trace!(
                iteration,
                latitude = yn,
                longitude = xn,
                delta_latitude,
                delta_longitude,
                "newton iteration"
            );

            if delta_latitude.abs() <= Self::CRITERIA && delta_longitude.abs() <= Self::CRITERIA
            {
                return Ok(-corr);
            }
        }

        tracing::debug!(
            iteration = Self::ITERATION,
            latitude,
            longitude,
            "backward transformation not converged"
        );

        Err(Error::NotConverged {
            iteration: Self::ITERATION,
            criteria: Self::CRITERIA,
            latitude: yn,
            longitude: xn,
            origin_latitude: latitude,
            origin_longitude: longitude,
        })
    }

    /// Returns the interpolated correction at (`latitude`, `longitude`).
    fn correction_at(&self, latitude: f64, longitude: f64) -> Result<Correction> {
        let cell = MeshCell::try_from_pos(latitude, longitude, self.unit)?;
        let interpol = Interpol::from(&self.parameter, &cell)?;

        // y: latitude, x: longitude
        let (y, x) = cell.position(latitude, longitude);
        let (lat, lng, alt) = interpol.interpol(y, x);

        Ok(Correction::new(SECOND * lat, SECOND * lng, alt))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::TransformerBuilder;

    #[allow(non_upper_case_globals)]
    const SemiDynaEXE: [(u32, (f64, f64, f64)); 4] = [
        (54401005, (-0.00622, 0.01516, 0.0946)),
        (54401055, (-0.0062, 0.01529, 0.08972)),
        (54401100, (-0.00663, 0.01492, 0.10374)),
        (54401150, (-0.00664, 0.01506, 0.10087)),
    ];

    fn semidyna() -> Transformer {
        TransformerBuilder::new(MeshUnit::Five)
            .parameters(SemiDynaEXE)
            .build()
    }

    fn assert_close(actual: &Point, expected: &Point, horizontal: f64, vertical: f64) {
        assert!(
            (actual.latitude() - expected.latitude()).abs() < horizontal,
            "{actual:?} != {expected:?}"
        );
        assert!(
            (actual.longitude() - expected.longitude()).abs() < horizontal,
            "{actual:?} != {expected:?}"
        );
        assert!(
            (actual.altitude() - expected.altitude()).abs() < vertical,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_bilinear_interpolation() {
        let (sw, se, nw, ne) = (1.5, -2.0, 3.25, 4.0);
        assert_eq!(bilinear_interpolation(sw, se, nw, ne, 0., 0.), sw);
        assert_eq!(bilinear_interpolation(sw, se, nw, ne, 0., 1.), se);
        assert_eq!(bilinear_interpolation(sw, se, nw, ne, 1., 0.), nw);
        assert_eq!(bilinear_interpolation(sw, se, nw, ne, 1., 1.), ne);
        assert_eq!(bilinear_interpolation(7., 7., 7., 7., 0.5, 0.5), 7.);
        assert_eq!(bilinear_interpolation(0., 2., 0., 2., 0.3, 0.5), 1.);
    }

    #[test]
    fn test_correction_neg() {
        assert_eq!(
            -Correction::new(1., -2., 3.),
            Correction::new(-1., 2., -3.)
        );
        assert_eq!(Correction::new(3., 4., 0.).horizontal(), 5.);
        assert_eq!(Parameter::from([3., 4., 1.]).horizontal(), 5.);
    }

    #[test]
    fn test_forward() {
        let tf = semidyna();

        let origin = Point::new(36.10377479, 140.087855041, 2.34);
        let expected = Point::new(36.103773017086695, 140.08785924333452, 2.4363138578103);

        assert_close(&tf.forward(&origin).unwrap(), &expected, 1e-9, 1e-9);
        assert_close(&tf.transform(&origin, false).unwrap(), &expected, 1e-9, 1e-9);

        let corr = tf.forward_corr(&origin).unwrap();
        assert!((corr.latitude - -1.7729133100878255e-6).abs() < 1e-15);
        assert!((corr.longitude - 4.202334510058886e-6).abs() < 1e-15);
        assert!((corr.altitude - 0.0963138578103).abs() < 1e-12);
    }

    #[test]
    fn test_backward() {
        let tf = semidyna();

        let origin = Point::new(36.10377479, 140.087855041, 2.34);
        let forward = tf.forward(&origin).unwrap();

        assert_close(&tf.backward(&forward).unwrap(), &origin, 1e-8, 1e-3);
        assert_close(&tf.transform(&forward, true).unwrap(), &origin, 1e-8, 1e-3);
        assert_close(&tf.backward_safe(&forward).unwrap(), &origin, 1e-8, 1e-3);

        let corr = tf.backward_safe_corr(&forward).unwrap();
        let expected = tf.forward_corr(&origin).unwrap();
        assert!((corr.latitude + expected.latitude).abs() < 1e-12);
        assert!((corr.longitude + expected.longitude).abs() < 1e-12);
    }

    #[test]
    fn test_parameter_not_found() {
        let tf = TransformerBuilder::new(MeshUnit::One).build();
        let point = Point::new(36.10377479, 140.087855041, 0.0);

        let expected = Error::ParameterNotFound {
            meshcode: 54401027,
            corner: Corner::SouthWest,
        };
        assert_eq!(tf.forward(&point), Err(expected.clone()));
        assert_eq!(
            tf.backward_safe(&point).unwrap_err().kind(),
            ErrorKind::ParameterNotFound
        );
        match tf.backward(&point) {
            Err(Error::ParameterNotFound { corner, .. }) => assert_eq!(corner, Corner::SouthWest),
            other => panic!("unexpected {other:?}"),
        }
        match tf.backward_safe(&point) {
            Err(Error::ParameterNotFound { corner, .. }) => assert_eq!(corner, Corner::SouthWest),
            other => panic!("unexpected {other:?}"),
        }

        // missing north-east only
        let tf = TransformerBuilder::new(MeshUnit::Five)
            .parameters(SemiDynaEXE.into_iter().take(3))
            .build();
        assert_eq!(
            tf.forward(&point),
            Err(Error::ParameterNotFound {
                meshcode: 54401150,
                corner: Corner::NorthEast
            })
        );
    }

    #[test]
    fn test_out_of_range() {
        let tf = semidyna();

        for point in [
            Point::new(-36.0, 140.0, 0.0),
            Point::new(36.0, 90.0, 0.0),
            Point::new(f64::NAN, 140.0, 0.0),
        ] {
            assert_eq!(tf.forward(&point).unwrap_err().kind(), ErrorKind::Range);
            assert_eq!(tf.backward(&point).unwrap_err().kind(), ErrorKind::Range);
            assert_eq!(
                tf.backward_safe(&point).unwrap_err().kind(),
                ErrorKind::Range
            );
        }

        // the offset point of the approximate backward goes south of the equator
        let point = Point::new(0.001, 140.0, 0.0);
        assert_eq!(tf.backward(&point).unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_not_converged() {
        // the longitude correction drops steeply between the first and second cell,
        // then Newton's method oscillates between them
        let mut builder = TransformerBuilder::new(MeshUnit::One);
        for (k, longitude) in [(0, 90.0), (1, -22.5), (2, 0.0)] {
            builder = builder
                .parameter(54400000 + k, Parameter::new(0.0, longitude, 0.0))
                .parameter(54400010 + k, Parameter::new(0.0, longitude, 0.0));
        }
        let tf = builder.build();

        let point = Point::new(36.0, 140.0, 0.0);
        match tf.backward_safe(&point) {
            Err(Error::NotConverged {
                iteration,
                criteria,
                origin_latitude,
                origin_longitude,
                ..
            }) => {
                assert_eq!(iteration, Transformer::ITERATION);
                assert_eq!(criteria, Transformer::CRITERIA);
                assert_eq!(origin_latitude, 36.0);
                assert_eq!(origin_longitude, 140.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            tf.backward_safe(&point).unwrap_err().kind(),
            ErrorKind::NotConverged
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let tf = Arc::new(semidyna());
        let origin = Point::new(36.10377479, 140.087855041, 2.34);
        let expected = tf.forward(&origin).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tf = Arc::clone(&tf);
                std::thread::spawn(move || tf.forward(&origin).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde() {
        let tf = TransformerBuilder::new(MeshUnit::Five)
            .parameter(54401005, (-0.00622, 0.01516, 0.0946))
            .description("SemiDyna")
            .build();

        let json = serde_json::to_value(&tf).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "unit": 5,
                "description": "SemiDyna",
                "parameter": {
                    "54401005": {"latitude": -0.00622, "longitude": 0.01516, "altitude": 0.0946}
                }
            })
        );

        let actual: Transformer = serde_json::from_value(json).unwrap();
        assert_eq!(actual, tf);

        let tf = semidyna();
        let s = serde_json::to_string(&tf).unwrap();
        assert_eq!(serde_json::from_str::<Transformer>(&s).unwrap(), tf);

        let actual: Transformer =
            serde_json::from_str(r#"{"unit":1,"description":null,"parameter":{}}"#).unwrap();
        assert_eq!(actual, TransformerBuilder::new(MeshUnit::One).build());

        assert!(
            serde_json::from_str::<Transformer>(r#"{"unit":2,"description":null,"parameter":{}}"#)
                .is_err()
        );
    }
}
