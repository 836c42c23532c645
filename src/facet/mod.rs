//! Facets: the sub-plots of a small-multiples grid.
//!
//! Every aggregated row is split into coordinates (the trailing attribute of
//! each axis), separators (the leading attributes, which identify the facet)
//! and extra data. Rows with equal separators land in the same [`Facet`].

mod builder;
#[allow(clippy::module_inception)]
mod facet;

pub use builder::FacetBuilder;
pub use facet::Facet;
