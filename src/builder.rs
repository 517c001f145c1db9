use std::collections::HashMap;

use crate::mesh::MeshUnit;
use crate::{Parameter, Transformer};

/// The builder of [`Transformer`].
///
/// # Example
///
/// ```
/// # use std::collections::HashMap;
/// # use parshift::{Parameter, TransformerBuilder};
/// # use parshift::mesh::MeshUnit;
/// // from SemiDynaEXE2023.par
/// let tf = TransformerBuilder::new(MeshUnit::Five)
///     .parameters([
///         (54401005, (-0.00622, 0.01516, 0.0946)),
///         (54401055, (-0.0062, 0.01529, 0.08972)),
///     ])
///     .description("My parameter")
///     .build();
///
/// assert_eq!(tf.unit(), MeshUnit::Five);
/// assert_eq!(
///     tf.parameter(),
///     &HashMap::from([
///         (54401005, Parameter::new(-0.00622, 0.01516, 0.0946)),
///         (54401055, Parameter::new(-0.0062, 0.01529, 0.08972)),
///     ])
/// );
/// assert_eq!(tf.description(), Some("My parameter"));
/// ```
#[derive(Debug, Clone)]
pub struct TransformerBuilder {
    unit: MeshUnit,
    parameter: HashMap<u32, Parameter>,
    description: Option<String>,
}

impl TransformerBuilder {
    /// Makes a [`TransformerBuilder`] of `unit` without parameters.
    #[inline]
    #[must_use]
    pub fn new(unit: MeshUnit) -> Self {
        Self {
            unit,
            parameter: HashMap::new(),
            description: None,
        }
    }

    /// Updates the description.
    #[inline]
    #[must_use]
    pub fn description(mut self, s: impl Into<String>) -> Self {
        self.description = Some(s.into());
        self
    }

    /// Adds a [`Parameter`], it overwrites the one of the same meshcode.
    ///
    /// # Example
    ///
    /// ```
    /// # use parshift::{Parameter, TransformerBuilder};
    /// # use parshift::mesh::MeshUnit;
    /// let tf = TransformerBuilder::new(MeshUnit::One)
    ///     .parameter(54401027, (1., 2., 3.))
    ///     .parameter(54401027, Parameter::new(4., 5., 6.))
    ///     .build();
    ///
    /// assert_eq!(tf.parameter().get(&54401027), Some(&Parameter::new(4., 5., 6.)));
    /// ```
    #[inline]
    #[must_use]
    pub fn parameter(mut self, meshcode: u32, parameter: impl Into<Parameter>) -> Self {
        self.parameter.insert(meshcode, parameter.into());
        self
    }

    /// Adds [`Parameter`]s.
    #[inline]
    #[must_use]
    pub fn parameters(
        mut self,
        parameters: impl IntoIterator<Item = (u32, impl Into<Parameter>)>,
    ) -> Self {
        self.parameter.extend(
            parameters
                .into_iter()
                .map(|(meshcode, parameter)| (meshcode, parameter.into())),
        );
        self
    }

    /// Builds a [`Transformer`].
    #[inline]
    #[must_use]
    pub fn build(self) -> Transformer {
        match self.description {
            Some(description) => {
                Transformer::with_description(self.unit, self.parameter, description)
            }
            None => Transformer::new(self.unit, self.parameter),
        }
    }
}
