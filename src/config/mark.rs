//! Mark types drawn for each glyph.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Glyph type used to draw data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MarkType {
    /// Scatter circles.
    #[default]
    Circle,
    /// Vertical bars.
    Bar,
    /// Connected lines.
    Line,
}

impl MarkType {
    /// Name of the glyph the renderer draws.
    #[must_use]
    pub fn glyph_name(self) -> &'static str {
        match self {
            MarkType::Circle => "Circle",
            MarkType::Bar => "VBar",
            MarkType::Line => "Line",
        }
    }

    /// Base glyph size; size encodings scale around it.
    #[must_use]
    pub fn size_factor(self) -> f32 {
        match self {
            MarkType::Circle => 10.0,
            MarkType::Bar => 0.25,
            MarkType::Line => 1.0,
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph_name())
    }
}

impl FromStr for MarkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(MarkType::Circle),
            "bar" | "vbar" => Ok(MarkType::Bar),
            "line" => Ok(MarkType::Line),
            _ => Err(Error::UnknownMarkType(s.to_string())),
        }
    }
}
