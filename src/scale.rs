//! Scale functions for data-to-visual mappings.
//!
//! Encoders first place a value inside the observed value range
//! ([`ValueRange::relative`]) and then map that relative position onto a
//! visual channel with a [`LinearScale`].

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Scale over the unit domain `[0, 1]`.
    #[must_use]
    pub fn unit(range: (f32, f32)) -> Self {
        Self {
            domain_min: 0.0,
            domain_max: 1.0,
            range_min: range.0,
            range_max: range.1,
        }
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Extent of the distinct values observed for a measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f32,
    max: f32,
    distinct: usize,
}

impl ValueRange {
    /// Range of the given values, or `None` if there are none.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        let mut values: Vec<f32> = values.into_iter().collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(f32::total_cmp);
        values.dedup_by(|a, b| a.total_cmp(b).is_eq());

        Some(Self {
            min: values[0],
            max: values[values.len() - 1],
            distinct: values.len(),
        })
    }

    /// Smallest observed value.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Largest observed value.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Number of distinct observed values.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    /// Position of `value` within the range: 0 at the minimum, 1 at the maximum.
    ///
    /// A range holding a single distinct value places every value at 1.
    #[must_use]
    pub fn relative(&self, value: f32) -> f32 {
        if self.distinct <= 1 {
            return 1.0;
        }
        (value - self.min) / (self.max - self.min)
    }
}
