//! Builder utilities for configuring transmission-tree runs.
//!
//! Collects the pruning threshold, rendering scales and input policies, and
//! validates them before constructing [`Arbor`] instances.

use crate::{
    Result,
    arbor::Arbor,
    cases::UnknownReferencePolicy,
    error::ArborError,
    prune::DegreeThreshold,
    render::RenderScale,
};

/// How [`Arbor::run`] treats a distance graph that is not connected.
///
/// # Examples
/// ```
/// use arbor_core::DisconnectedPolicy;
///
/// assert_eq!(DisconnectedPolicy::default(), DisconnectedPolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisconnectedPolicy {
    /// Fail with [`ArborError::DisconnectedGraph`].
    #[default]
    Reject,
    /// Root every tree of the spanning forest separately and merge the results.
    PerComponent,
}

/// Configures and constructs [`Arbor`] instances.
///
/// # Examples
/// ```
/// use arbor_core::{ArborBuilder, DegreeThreshold, DisconnectedPolicy};
///
/// let arbor = ArborBuilder::new()
///     .with_degree_threshold(DegreeThreshold::Max(8))
///     .with_disconnected_policy(DisconnectedPolicy::PerComponent)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(arbor.degree_threshold(), DegreeThreshold::Max(8));
/// assert_eq!(arbor.disconnected_policy(), DisconnectedPolicy::PerComponent);
/// ```
#[derive(Debug, Clone)]
pub struct ArborBuilder {
    degree_threshold: DegreeThreshold,
    width_divisor: f64,
    length_unit: f64,
    disconnected_policy: DisconnectedPolicy,
    unknown_reference_policy: UnknownReferencePolicy,
}

impl Default for ArborBuilder {
    fn default() -> Self {
        Self {
            degree_threshold: DegreeThreshold::default(),
            width_divisor: RenderScale::DEFAULT_WIDTH_DIVISOR,
            length_unit: RenderScale::DEFAULT_LENGTH_UNIT,
            disconnected_policy: DisconnectedPolicy::default(),
            unknown_reference_policy: UnknownReferencePolicy::default(),
        }
    }
}

impl ArborBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use arbor_core::{ArborBuilder, DegreeThreshold};
    ///
    /// let builder = ArborBuilder::new();
    /// assert_eq!(builder.degree_threshold(), DegreeThreshold::Max(15));
    /// assert_eq!(builder.width_divisor(), 10.0);
    /// assert_eq!(builder.length_unit(), 0.0001);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the degree threshold used for pruning.
    #[must_use]
    pub fn with_degree_threshold(mut self, threshold: DegreeThreshold) -> Self {
        self.degree_threshold = threshold;
        self
    }

    /// Returns the configured degree threshold.
    #[must_use]
    pub fn degree_threshold(&self) -> DegreeThreshold {
        self.degree_threshold
    }

    /// Overrides the divisor applied to `sqrt(cases)` when sizing nodes.
    ///
    /// # Examples
    /// ```
    /// use arbor_core::ArborBuilder;
    ///
    /// let builder = ArborBuilder::new().with_width_divisor(5.0);
    /// assert_eq!(builder.width_divisor(), 5.0);
    /// ```
    #[must_use]
    pub fn with_width_divisor(mut self, divisor: f64) -> Self {
        self.width_divisor = divisor;
        self
    }

    /// Returns the configured width divisor.
    #[must_use]
    pub fn width_divisor(&self) -> f64 {
        self.width_divisor
    }

    /// Overrides the distance that renders as one length unit.
    #[must_use]
    pub fn with_length_unit(mut self, unit: f64) -> Self {
        self.length_unit = unit;
        self
    }

    /// Returns the configured length unit.
    #[must_use]
    pub fn length_unit(&self) -> f64 {
        self.length_unit
    }

    /// Chooses how disconnected distance graphs are handled.
    #[must_use]
    pub fn with_disconnected_policy(mut self, policy: DisconnectedPolicy) -> Self {
        self.disconnected_policy = policy;
        self
    }

    /// Returns the configured disconnected-graph policy.
    #[must_use]
    pub fn disconnected_policy(&self) -> DisconnectedPolicy {
        self.disconnected_policy
    }

    /// Chooses how metadata rows naming unknown clusters are handled.
    #[must_use]
    pub fn with_unknown_reference_policy(mut self, policy: UnknownReferencePolicy) -> Self {
        self.unknown_reference_policy = policy;
        self
    }

    /// Returns the configured unknown-reference policy.
    #[must_use]
    pub fn unknown_reference_policy(&self) -> UnknownReferencePolicy {
        self.unknown_reference_policy
    }

    /// Validates the configuration and constructs an [`Arbor`] instance.
    ///
    /// # Errors
    /// Returns [`ArborError::InvalidScale`] when the width divisor or the
    /// length unit is not a finite value greater than zero.
    ///
    /// # Examples
    /// ```
    /// use arbor_core::{ArborBuilder, ArborErrorCode};
    ///
    /// let err = ArborBuilder::new()
    ///     .with_length_unit(0.0)
    ///     .build()
    ///     .expect_err("zero length unit is rejected");
    /// assert_eq!(err.code(), ArborErrorCode::InvalidScale);
    /// ```
    pub fn build(self) -> Result<Arbor> {
        let width_divisor = validate_scale("width_divisor", self.width_divisor)?;
        let length_unit = validate_scale("length_unit", self.length_unit)?;
        Ok(Arbor::new(
            self.degree_threshold,
            RenderScale::new(width_divisor, length_unit),
            self.disconnected_policy,
            self.unknown_reference_policy,
        ))
    }
}

fn validate_scale(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ArborError::InvalidScale { parameter, value })
    }
}
