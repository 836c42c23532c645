//! Attribute-value pairs.

use std::fmt;

use super::attribute::Attribute;
use super::value::DataValue;

/// One resolved datum: an attribute paired with its value for one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Avp {
    attribute: Attribute,
    value: DataValue,
}

impl Avp {
    /// Pair an attribute with a value.
    #[must_use]
    pub fn new(attribute: Attribute, value: impl Into<DataValue>) -> Self {
        Self {
            attribute,
            value: value.into(),
        }
    }

    /// The attribute.
    #[must_use]
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    /// The value.
    #[must_use]
    pub fn value(&self) -> &DataValue {
        &self.value
    }
}

impl fmt::Display for Avp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.attribute, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avp_equality_is_by_attribute_and_value() {
        let a = Avp::new(Attribute::dimension("Region"), "East");
        let b = Avp::new(Attribute::dimension("Region"), "East");
        let c = Avp::new(Attribute::dimension("Region"), "West");
        let d = Avp::new(Attribute::dimension("State"), "East");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_avp_display() {
        let avp = Avp::new(Attribute::measure("Quantity"), 12.0);
        assert_eq!(avp.to_string(), "Quantity=12");
    }
}
