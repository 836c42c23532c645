//! Assignment of aggregated rows to facets.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::facet::Facet;
use crate::config::VizConfig;
use crate::data::{Attribute, Avp};
use crate::error::{Error, Result};

/// Separator values identifying a facet: `(x_separators, y_separators)`.
type FacetKey = (Vec<Avp>, Vec<Avp>);

/// Groups AVP rows into facets keyed by their separator values.
///
/// The accumulator lives only for one [`FacetBuilder::build`] call, so no
/// facet can leak from one build into the next. Facets are returned in the
/// order their first row appeared.
#[derive(Debug)]
pub struct FacetBuilder<'a> {
    config: &'a VizConfig,
    x_data: Option<&'a Attribute>,
    y_data: Option<&'a Attribute>,
    facets: Vec<Facet>,
    index: HashMap<FacetKey, usize>,
}

/// Treat an empty axis as "no coordinates"; propagate anything else.
fn optional_attribute(attribute: Result<&Attribute>) -> Result<Option<&Attribute>> {
    match attribute {
        Ok(attr) => Ok(Some(attr)),
        Err(Error::NoSuchAttribute { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

impl<'a> FacetBuilder<'a> {
    /// Build the facets for a sequence of AVP rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAttribute`] if a row lacks an attribute the
    /// config places on the columns or rows.
    ///
    /// # Panics
    ///
    /// Panics if merging a row breaks a facet's coordinate-length invariant,
    /// which indicates inconsistent rows rather than bad data.
    pub fn build<I>(rows: I, config: &VizConfig) -> Result<Vec<Facet>>
    where
        I: IntoIterator<Item = Vec<Avp>>,
    {
        let mut builder = FacetBuilder::new(config)?;
        let mut row_count = 0usize;
        for row in rows {
            builder.push(&row)?;
            row_count += 1;
        }
        debug!(rows = row_count, facets = builder.facets.len(), config = %config, "built facets");
        Ok(builder.facets)
    }

    fn new(config: &'a VizConfig) -> Result<Self> {
        Ok(Self {
            config,
            x_data: optional_attribute(config.x_data())?,
            y_data: optional_attribute(config.y_data())?,
            facets: Vec::new(),
            index: HashMap::new(),
        })
    }

    fn push(&mut self, row: &[Avp]) -> Result<()> {
        let take = |attr: &Attribute| -> Result<Avp> {
            row.iter()
                .find(|avp| avp.attribute() == attr)
                .cloned()
                .ok_or_else(|| Error::MissingAttribute(attr.name().to_string()))
        };

        let x_coords: Vec<Avp> = self.x_data.map(take).transpose()?.into_iter().collect();
        let y_coords: Vec<Avp> = self.y_data.map(take).transpose()?.into_iter().collect();
        let x_separators = self.config.x_separators().iter().map(take).collect::<Result<Vec<_>>>()?;
        let y_separators = self.config.y_separators().iter().map(take).collect::<Result<Vec<_>>>()?;

        let extra_data: Vec<Avp> = row
            .iter()
            .filter(|avp| !self.config.is_on_axis(avp.attribute()))
            .cloned()
            .collect();

        let key = (x_separators, y_separators);
        if let Some(&idx) = self.index.get(&key) {
            self.facets[idx].absorb(x_coords, y_coords, extra_data);
        } else {
            let (x_separators, y_separators) = key.clone();
            let facet = Facet::new(x_coords, y_coords, x_separators, y_separators, extra_data);
            trace!(facet = %facet, "created facet");
            self.index.insert(key, self.facets.len());
            self.facets.push(facet);
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> VizConfig {
        VizConfig::new()
            .column(Attribute::dimension("A"))
            .column(Attribute::dimension("X"))
            .row(Attribute::dimension("B"))
            .row(Attribute::measure("V"))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Rows with equal separators share a facet; different separators never do.
        #[test]
        fn prop_facets_partition_rows(
            rows in prop::collection::vec((0u8..3, 0u8..4, 0u8..3, -100.0f32..100.0), 0..60)
        ) {
            let avp_rows: Vec<Vec<Avp>> = rows
                .iter()
                .map(|&(a, x, b, v)| vec![
                    Avp::new(Attribute::dimension("A"), format!("a{a}")),
                    Avp::new(Attribute::dimension("X"), format!("x{x}")),
                    Avp::new(Attribute::dimension("B"), format!("b{b}")),
                    Avp::new(Attribute::measure("V"), v),
                ])
                .collect();

            let facets = FacetBuilder::build(avp_rows.clone(), &config()).unwrap();

            let total: usize = facets.iter().map(Facet::glyph_count).sum();
            prop_assert_eq!(total, avp_rows.len());

            for row in &avp_rows {
                let matching = facets
                    .iter()
                    .filter(|f| f.is_in_plot_of(&row[0..1], &row[2..3]))
                    .count();
                prop_assert_eq!(matching, 1);
            }

            for (i, left) in facets.iter().enumerate() {
                for right in &facets[i + 1..] {
                    prop_assert!(!left.is_in_plot_of(right.x_separators(), right.y_separators()));
                }
            }
        }
    }
}
