//! A single facet: one sub-plot of the grid.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::Axis;
use crate::data::{Attribute, Avp, DataValue};

/// One sub-plot's worth of glyph data.
///
/// A facet is identified by its separator AVPs. Its coordinate lists hold
/// the glyph positions; `extra_data` holds row values that position
/// nothing but may drive color or size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    x_coords: Vec<Avp>,
    y_coords: Vec<Avp>,
    x_separators: Vec<Avp>,
    y_separators: Vec<Avp>,
    extra_data: Vec<Avp>,
    colors: Vec<Avp>,
    sizes: Vec<Avp>,
    rows: usize,
}

impl Facet {
    pub(crate) fn new(
        x_coords: Vec<Avp>,
        y_coords: Vec<Avp>,
        x_separators: Vec<Avp>,
        y_separators: Vec<Avp>,
        extra_data: Vec<Avp>,
    ) -> Self {
        let facet = Self {
            x_coords,
            y_coords,
            x_separators,
            y_separators,
            extra_data,
            colors: Vec::new(),
            sizes: Vec::new(),
            rows: 1,
        };
        facet.assert_coords_consistent();
        facet
    }

    /// Append another row's glyph data to this facet.
    ///
    /// # Panics
    ///
    /// Panics if the merge leaves both axes non-empty with different lengths.
    pub(crate) fn absorb(&mut self, x_coords: Vec<Avp>, y_coords: Vec<Avp>, extra_data: Vec<Avp>) {
        self.x_coords.extend(x_coords);
        self.y_coords.extend(y_coords);
        self.extra_data.extend(extra_data);
        self.rows += 1;
        self.assert_coords_consistent();
    }

    pub(crate) fn set_encodings(&mut self, colors: Vec<Avp>, sizes: Vec<Avp>) {
        self.colors = colors;
        self.sizes = sizes;
    }

    fn assert_coords_consistent(&self) {
        let (x, y) = (self.x_coords.len(), self.y_coords.len());
        assert!(
            x == y || x == 0 || y == 0,
            "facet coordinate lists diverged: {x} x coords vs {y} y coords"
        );
    }

    /// Horizontal glyph positions.
    #[must_use]
    pub fn x_coords(&self) -> &[Avp] {
        &self.x_coords
    }

    /// Vertical glyph positions.
    #[must_use]
    pub fn y_coords(&self) -> &[Avp] {
        &self.y_coords
    }

    /// Glyph positions on an axis.
    #[must_use]
    pub fn coords(&self, axis: Axis) -> &[Avp] {
        match axis {
            Axis::X => &self.x_coords,
            Axis::Y => &self.y_coords,
        }
    }

    /// Column separator values identifying this facet.
    #[must_use]
    pub fn x_separators(&self) -> &[Avp] {
        &self.x_separators
    }

    /// Row separator values identifying this facet.
    #[must_use]
    pub fn y_separators(&self) -> &[Avp] {
        &self.y_separators
    }

    /// Separator values of an axis.
    #[must_use]
    pub fn separators(&self, axis: Axis) -> &[Avp] {
        match axis {
            Axis::X => &self.x_separators,
            Axis::Y => &self.y_separators,
        }
    }

    /// Row values not used for position or identity.
    #[must_use]
    pub fn extra_data(&self) -> &[Avp] {
        &self.extra_data
    }

    /// Per-glyph colors as `#rrggbb` text values.
    #[must_use]
    pub fn colors(&self) -> &[Avp] {
        &self.colors
    }

    /// Per-glyph sizes.
    #[must_use]
    pub fn sizes(&self) -> &[Avp] {
        &self.sizes
    }

    /// Number of glyphs: the length of the longer coordinate list.
    ///
    /// A facet without coordinates on either axis draws one glyph per
    /// merged row, so every per-glyph channel has the same length.
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        match self.x_coords.len().max(self.y_coords.len()) {
            0 => self.rows,
            n => n,
        }
    }

    /// Whether this facet is identified by the given separators.
    #[must_use]
    pub fn is_in_plot_of(&self, x_separators: &[Avp], y_separators: &[Avp]) -> bool {
        self.x_separators == x_separators && self.y_separators == y_separators
    }

    /// Every AVP of this facet holding the attribute.
    #[must_use]
    pub fn find_attributes(&self, attribute: &Attribute) -> Vec<&Avp> {
        self.x_coords
            .iter()
            .chain(&self.y_coords)
            .chain(&self.x_separators)
            .chain(&self.y_separators)
            .chain(&self.extra_data)
            .filter(|avp| avp.attribute() == attribute)
            .collect()
    }

    /// Distinct values of an attribute within this facet.
    #[must_use]
    pub fn variations_of(&self, attribute: &Attribute) -> BTreeSet<DataValue> {
        self.find_attributes(attribute).into_iter().map(|avp| avp.value().clone()).collect()
    }

    /// Label of an axis: the innermost separator value, if any.
    #[must_use]
    pub fn axis_label(&self, axis: Axis) -> Option<&DataValue> {
        self.separators(axis).last().map(Avp::value)
    }

    /// Coordinate values of an axis.
    ///
    /// An axis without coordinates yields one [`DataValue::Null`] per glyph
    /// of the other axis so renderers always get equal-length columns.
    #[must_use]
    pub fn coord_values(&self, axis: Axis) -> Vec<DataValue> {
        let coords = self.coords(axis);
        if coords.is_empty() {
            vec![DataValue::Null; self.glyph_count()]
        } else {
            coords.iter().map(|avp| avp.value().clone()).collect()
        }
    }

    /// Per-glyph values of an attribute.
    ///
    /// Coordinates and extra data carry one value per glyph. A separator
    /// carries one value for the whole facet, repeated for every glyph.
    #[must_use]
    pub fn glyph_values(&self, attribute: &Attribute) -> Vec<DataValue> {
        let values_of = |avps: &[Avp]| -> Vec<DataValue> {
            avps.iter()
                .filter(|avp| avp.attribute() == attribute)
                .map(|avp| avp.value().clone())
                .collect()
        };

        for per_glyph in [&self.x_coords, &self.y_coords, &self.extra_data] {
            let values = values_of(per_glyph);
            if !values.is_empty() {
                return values;
            }
        }

        self.x_separators
            .iter()
            .chain(&self.y_separators)
            .find(|avp| avp.attribute() == attribute)
            .map(|avp| vec![avp.value().clone(); self.glyph_count()])
            .unwrap_or_default()
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |avps: &[Avp]| {
            avps.iter().map(|avp| avp.value().to_string()).collect::<Vec<_>>().join(", ")
        };
        write!(
            f,
            "<Facet [{}|{}] [[{}||{}]]>",
            join(&self.x_coords),
            join(&self.y_coords),
            join(&self.x_separators),
            join(&self.y_separators),
        )
    }
}
