//! Visualization configuration: which attributes go where.

use std::fmt;

use tracing::debug;

use super::mark::MarkType;
use crate::data::{Attribute, Dimension, Measure};
use crate::error::{Error, Result};

/// A plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis, driven by `columns`.
    X,
    /// Vertical axis, driven by `rows`.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// Composition of a faceted visualization.
///
/// The last attribute of `columns` (resp. `rows`) positions glyphs on the
/// x (resp. y) axis. Every earlier attribute is a separator: its values
/// split the data into one facet per combination.
///
/// # Example
///
/// ```rust
/// use trueno_facet::config::VizConfig;
/// use trueno_facet::data::Attribute;
///
/// let config = VizConfig::new()
///     .column(Attribute::dimension("Category"))
///     .column(Attribute::dimension("Region"))
///     .row(Attribute::dimension("Ship Mode"))
///     .row(Attribute::measure("Quantity"))
///     .color_by(Attribute::dimension("Region"));
///
/// assert_eq!(config.x_separators().len(), 1);
/// assert_eq!(config.dimensions().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VizConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    columns: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(default))]
    rows: Vec<Attribute>,
    #[cfg_attr(feature = "serde", serde(default))]
    color: Option<Attribute>,
    #[cfg_attr(feature = "serde", serde(default))]
    size: Option<Attribute>,
    #[cfg_attr(feature = "serde", serde(default))]
    mark_type: MarkType,
}

impl VizConfig {
    /// Create an empty config drawing circles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute to the columns.
    #[must_use]
    pub fn column(mut self, attribute: impl Into<Attribute>) -> Self {
        self.columns.push(attribute.into());
        self
    }

    /// Append an attribute to the rows.
    #[must_use]
    pub fn row(mut self, attribute: impl Into<Attribute>) -> Self {
        self.rows.push(attribute.into());
        self
    }

    /// Encode glyph color by an attribute.
    #[must_use]
    pub fn color_by(mut self, attribute: impl Into<Attribute>) -> Self {
        self.color = Some(attribute.into());
        self
    }

    /// Encode glyph size by an attribute.
    #[must_use]
    pub fn size_by(mut self, attribute: impl Into<Attribute>) -> Self {
        self.size = Some(attribute.into());
        self
    }

    /// Set the mark type.
    #[must_use]
    pub fn mark(mut self, mark_type: MarkType) -> Self {
        self.mark_type = mark_type;
        self
    }

    /// Attributes on the columns, outermost first.
    #[must_use]
    pub fn columns(&self) -> &[Attribute] {
        &self.columns
    }

    /// Attributes on the rows, outermost first.
    #[must_use]
    pub fn rows(&self) -> &[Attribute] {
        &self.rows
    }

    /// Color attribute, if any.
    #[must_use]
    pub fn color(&self) -> Option<&Attribute> {
        self.color.as_ref()
    }

    /// Size attribute, if any.
    #[must_use]
    pub fn size(&self) -> Option<&Attribute> {
        self.size.as_ref()
    }

    /// Mark type.
    #[must_use]
    pub fn mark_type(&self) -> MarkType {
        self.mark_type
    }

    /// Attributes of one axis.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &[Attribute] {
        match axis {
            Axis::X => &self.columns,
            Axis::Y => &self.rows,
        }
    }

    /// Separator attributes of an axis: all but the last.
    #[must_use]
    pub fn separators(&self, axis: Axis) -> &[Attribute] {
        let attrs = self.axis(axis);
        match attrs.split_last() {
            Some((_, separators)) => separators,
            None => &[],
        }
    }

    /// Attribute positioning glyphs on an axis: the last one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchAttribute`] if the axis is empty.
    pub fn data_attribute(&self, axis: Axis) -> Result<&Attribute> {
        self.axis(axis).last().ok_or(Error::NoSuchAttribute { axis })
    }

    /// Column separators.
    #[must_use]
    pub fn x_separators(&self) -> &[Attribute] {
        self.separators(Axis::X)
    }

    /// Row separators.
    #[must_use]
    pub fn y_separators(&self) -> &[Attribute] {
        self.separators(Axis::Y)
    }

    /// Attribute positioning glyphs horizontally.
    pub fn x_data(&self) -> Result<&Attribute> {
        self.data_attribute(Axis::X)
    }

    /// Attribute positioning glyphs vertically.
    pub fn y_data(&self) -> Result<&Attribute> {
        self.data_attribute(Axis::Y)
    }

    /// Whether an attribute sits on the columns or rows.
    #[must_use]
    pub fn is_on_axis(&self, attribute: &Attribute) -> bool {
        self.columns.contains(attribute) || self.rows.contains(attribute)
    }

    fn all_mentioned(&self) -> impl Iterator<Item = &Attribute> {
        self.columns
            .iter()
            .chain(&self.rows)
            .chain(self.color.as_ref())
            .chain(self.size.as_ref())
    }

    /// Distinct dimensions anywhere in the config, in order of appearance.
    #[must_use]
    pub fn dimensions(&self) -> Vec<Dimension> {
        let mut out: Vec<Dimension> = Vec::new();
        for attr in self.all_mentioned() {
            if let Attribute::Dimension(d) = attr {
                if !out.contains(d) {
                    out.push(d.clone());
                }
            }
        }
        out
    }

    /// Distinct measures anywhere in the config, in order of appearance.
    #[must_use]
    pub fn measures(&self) -> Vec<Measure> {
        let mut out: Vec<Measure> = Vec::new();
        for attr in self.all_mentioned() {
            if let Attribute::Measure(m) = attr {
                if !out.contains(m) {
                    out.push(m.clone());
                }
            }
        }
        out
    }

    /// Dimensions followed by measures: the layout of every aggregated row.
    #[must_use]
    pub fn attributes(&self) -> Vec<Attribute> {
        self.dimensions()
            .into_iter()
            .map(Attribute::from)
            .chain(self.measures().into_iter().map(Attribute::from))
            .collect()
    }

    /// Check that measures only appear as the last attribute of an axis.
    pub fn validate(&self) -> Result<()> {
        for axis in [Axis::X, Axis::Y] {
            if let Some(measure) = self.separators(axis).iter().find(|a| a.is_measure()) {
                return Err(Error::MisplacedMeasure {
                    attribute: measure.name().to_string(),
                    axis,
                });
            }
        }
        debug!(config = %self, "validated config");
        Ok(())
    }

    fn axis_signature(attrs: &[Attribute]) -> String {
        let dims = attrs.iter().filter(|a| a.is_dimension()).count();
        let measures = attrs.len() - dims;
        format!("{dims}d{measures}m")
    }

    fn channel_signature(&self, attribute: Option<&Attribute>) -> String {
        let kind = attribute.map_or('N', Attribute::kind_initial);
        let on_axis = attribute.is_some_and(|a| self.is_on_axis(a));
        if on_axis {
            kind.to_string()
        } else {
            format!("{kind}X")
        }
    }
}

impl fmt::Display for VizConfig {
    /// Compact signature such as `CONF_1d0m_1d1m_sizeNX_colD_circle`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CONF_{}_{}_size{}_col{}_{}",
            Self::axis_signature(&self.columns),
            Self::axis_signature(&self.rows),
            self.channel_signature(self.size.as_ref()),
            self.channel_signature(self.color.as_ref()),
            self.mark_type.glyph_name().to_ascii_lowercase(),
        )
    }
}
