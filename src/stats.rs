//! Provides the descriptive statistics of the parameters.
use std::collections::HashMap;

use crate::Parameter;

/// Improved Kahan–Babuška algorithm
///
/// see: https://en.wikipedia.org/wiki/Kahan_summation_algorithm#Further_enhancements
fn ksum(vs: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;
    for v in vs {
        let t = sum + v;
        c += if sum.abs() >= v.abs() {
            (sum - t) + v
        } else {
            (v - t) + sum
        };
        sum = t;
    }
    sum + c
}

/// The statistics of a component of the parameters.
///
/// Every field is [`None`] when the population is empty,
/// NaN values are excluded from the population.
#[derive(Debug, PartialEq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// The count of the population.
    pub count: Option<usize>,
    /// The mean, \[sec\] or \[m\].
    pub mean: Option<f64>,
    /// The population standard deviation, \[sec\] or \[m\].
    pub std: Option<f64>,
    /// The mean of abs value, 1/𝑛 ∑ᵢ | 𝑝𝑎𝑟𝑎𝑚𝑒𝑡𝑒𝑟ᵢ |, \[sec\] or \[m\].
    pub abs: Option<f64>,
    /// The minimum, \[sec\] or \[m\].
    pub min: Option<f64>,
    /// The maximum, \[sec\] or \[m\].
    pub max: Option<f64>,
}

impl Statistics {
    /// Returns the statistics of `vs`.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::stats::Statistics;
    /// let stats = Statistics::from_values([1.0, f64::NAN, 3.0]);
    /// assert_eq!(stats.count, Some(2));
    /// assert_eq!(stats.mean, Some(2.0));
    /// assert_eq!(stats.std, Some(1.0));
    /// assert_eq!(stats.min, Some(1.0));
    /// assert_eq!(stats.max, Some(3.0));
    ///
    /// assert_eq!(Statistics::from_values([f64::NAN]), Statistics::default());
    /// ```
    #[must_use]
    pub fn from_values(vs: impl IntoIterator<Item = f64>) -> Self {
        let vs: Vec<f64> = vs.into_iter().filter(|v| !v.is_nan()).collect();

        if vs.is_empty() {
            return Self::default();
        }

        let count = vs.len();
        let length = count as f64;
        let mean = ksum(&vs) / length;

        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        let mut deviation = Vec::with_capacity(count);
        let mut abs = Vec::with_capacity(count);

        for v in &vs {
            max = v.max(max);
            min = v.min(min);
            deviation.push((v - mean).powi(2));
            abs.push(v.abs());
        }

        Self {
            count: Some(count),
            mean: Some(mean),
            std: Some((ksum(&deviation) / length).sqrt()),
            abs: Some(ksum(&abs) / length),
            min: Some(min),
            max: Some(max),
        }
    }
}

/// The statistical summary of the parameters.
///
/// This is a result that [`Transformer::statistics`](crate::Transformer::statistics) returns.
#[derive(Debug, PartialEq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticalSummary {
    /// The statistics of latitude.
    pub latitude: Statistics,
    /// The statistics of longitude.
    pub longitude: Statistics,
    /// The statistics of altitude.
    pub altitude: Statistics,
    /// The statistics of horizontal, $\sqrt{\text{latitude}^2 + \text{longitude}^2}$.
    pub horizontal: Statistics,
}

impl StatisticalSummary {
    /// Returns the summary of `parameter`.
    #[must_use]
    pub fn from_parameter(parameter: &HashMap<u32, Parameter>) -> Self {
        let values = || parameter.values();

        Self {
            latitude: Statistics::from_values(values().map(|p| p.latitude)),
            longitude: Statistics::from_values(values().map(|p| p.longitude)),
            altitude: Statistics::from_values(values().map(|p| p.altitude)),
            horizontal: Statistics::from_values(values().map(Parameter::horizontal)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshUnit;
    use crate::TransformerBuilder;

    fn assert_approx(actual: Option<f64>, expected: f64) {
        let actual = actual.unwrap();
        assert!(
            (actual - expected).abs() <= 1e-15,
            "{actual} != {expected}"
        );
    }

    #[test]
    fn test_ksum() {
        assert_eq!(ksum(&[]), 0.0);
        assert_eq!(ksum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
        assert!(ksum(&[1., f64::NAN, 1.]).is_nan());
    }

    #[test]
    fn test_summary() {
        let stats = TransformerBuilder::new(MeshUnit::Five)
            .parameters([
                (54401005, (-0.00622, 0.01516, 0.0946)),
                (54401055, (-0.0062, 0.01529, 0.08972)),
                (54401100, (-0.00663, 0.01492, 0.10374)),
                (54401150, (-0.00664, 0.01506, 0.10087)),
            ])
            .build()
            .statistics();

        assert_eq!(stats.latitude.count, Some(4));
        assert_approx(stats.latitude.mean, -0.0064225);
        assert_approx(stats.latitude.std, 0.00021264700797330775);
        assert_approx(stats.latitude.abs, 0.0064225);
        assert_eq!(stats.latitude.min, Some(-0.00664));
        assert_eq!(stats.latitude.max, Some(-0.0062));

        assert_eq!(stats.longitude.count, Some(4));
        assert_approx(stats.longitude.mean, 0.0151075);
        assert_approx(stats.longitude.std, 0.00013553136168429814);
        assert_eq!(stats.longitude.min, Some(0.01492));
        assert_eq!(stats.longitude.max, Some(0.01529));

        assert_eq!(stats.altitude.count, Some(4));
        assert_approx(stats.altitude.mean, 0.0972325);
        assert_approx(stats.altitude.std, 0.005453133846697696);
        assert_eq!(stats.altitude.min, Some(0.08972));
        assert_eq!(stats.altitude.max, Some(0.10374));

        assert_eq!(stats.horizontal.count, Some(4));
        assert_approx(stats.horizontal.mean, 0.016417802947905496);
        assert_approx(stats.horizontal.min, 0.016326766366920303);
        assert_approx(stats.horizontal.max, 0.016499215132847987);
    }

    #[test]
    fn test_nan_excluded() {
        let stats = TransformerBuilder::new(MeshUnit::One)
            .parameters([
                (54401027, (1.0, f64::NAN, -2.0)),
                (54401028, (3.0, f64::NAN, 2.0)),
            ])
            .build()
            .statistics();

        assert_eq!(stats.latitude.count, Some(2));
        assert_eq!(stats.latitude.mean, Some(2.0));
        assert_eq!(stats.latitude.std, Some(1.0));
        assert_eq!(stats.altitude.mean, Some(0.0));
        assert_eq!(stats.altitude.abs, Some(2.0));
        assert_eq!(stats.longitude, Statistics::default());
        assert_eq!(stats.horizontal, Statistics::default());
    }

    #[test]
    fn test_empty() {
        let stats = TransformerBuilder::new(MeshUnit::One).build().statistics();

        let empty = Statistics {
            count: None,
            mean: None,
            std: None,
            abs: None,
            min: None,
            max: None,
        };
        assert_eq!(stats.latitude, empty);
        assert_eq!(stats.longitude, empty);
        assert_eq!(stats.altitude, empty);
        assert_eq!(stats.horizontal, empty);
    }
}
