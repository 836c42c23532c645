//! # Trueno-Facet
//!
//! Faceted small-multiples aggregation for declarative visualizations.
//!
//! A [`VizConfig`](config::VizConfig) places attributes on columns, rows,
//! color and size. trueno-facet groups and reduces a tabular source by those
//! attributes, splits the result into a grid of facets, and resolves color and
//! size encodings that stay consistent across the whole grid. Measure
//! reductions run on [trueno](https://crates.io/crates/trueno) SIMD vectors.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_facet::prelude::*;
//!
//! let mut table = Table::new();
//! table.add_column_str("Category", &["Tech", "Tech", "Office", "Office"]).unwrap();
//! table.add_column_str("Region", &["East", "West", "East", "West"]).unwrap();
//! table.add_column_f32("Quantity", &[3.0, 5.0, 2.0, 7.0]).unwrap();
//!
//! let config = VizConfig::new()
//!     .column(Attribute::dimension("Category"))
//!     .column(Attribute::dimension("Region"))
//!     .row(Attribute::measure("Quantity"))
//!     .color_by(Attribute::dimension("Region"));
//!
//! let mut aggregator = Aggregator::new(&table, config).unwrap();
//! let result = aggregator.update().unwrap();
//!
//! assert_eq!(result.ncols(), 2);
//! assert_eq!(result.facets()[0].colors()[0].value().to_string(), "#1f77b4");
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Parallel reductions in trueno
//! - `serde`: Serialize and deserialize configs, attributes and values
//!
//! ## Logging
//!
//! Pipeline steps emit [`tracing`] events. No subscriber is installed; the
//! application picks one.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Modules
// ============================================================================

/// Attributes, values and tabular sources.
pub mod data;

/// Visualization configuration.
pub mod config;

// ============================================================================
// Visual Mapping Modules
// ============================================================================

/// Color types, hex conversion and palettes.
pub mod color;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Color and size encodings.
pub mod encoding;

// ============================================================================
// Pipeline Modules
// ============================================================================

/// Facets and facet building.
pub mod facet;

/// Aggregation pipeline.
pub mod aggregate;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-facet operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_facet::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::{AggregationResult, Aggregator, AxisRange};
    pub use crate::color::{Palette, Rgba};
    pub use crate::config::{Axis, MarkType, VizConfig};
    pub use crate::data::{
        Aggregation, Attribute, Avp, DataValue, Dimension, Measure, TabularSource, Table, TableRow,
    };
    pub use crate::encoding::{ColorEncoding, EncodingKind, SizeEncoding};
    pub use crate::error::{Error, Result};
    pub use crate::facet::{Facet, FacetBuilder};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
