//! Element decoding
//!
//! The reader hands every tag name and attribute map to [`DecodeElement`] to
//! obtain the application's element value. Decoding is total: names that are
//! not recognized map to a generic representation instead of failing.

use super::Attributes;
use std::fmt;

/// Conversion from a raw tag into an application-defined element value
pub trait DecodeElement: Sized {
    fn decode(name: &str, attributes: &Attributes) -> Self;
}

/// The tag name as written
impl DecodeElement for String {
    #[inline]
    fn decode(name: &str, _attributes: &Attributes) -> Self {
        name.to_string()
    }
}

/// Element identified by its name only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlElement {
    pub name: String,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement { name: name.into() }
    }

    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Namespace prefix (before colon), if any
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }
}

impl DecodeElement for XmlElement {
    fn decode(name: &str, _attributes: &Attributes) -> Self {
        XmlElement::new(name)
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_decoder() {
        assert_eq!(String::decode("Body", &Attributes::new()), "Body");
    }

    #[test]
    fn test_xml_element_names() {
        let element = XmlElement::decode("svg:rect", &Attributes::new());
        assert_eq!(element.to_string(), "svg:rect");
        assert_eq!(element.local_name(), "rect");
        assert_eq!(element.prefix(), Some("svg"));

        let element = XmlElement::new("item");
        assert_eq!(element.local_name(), "item");
        assert_eq!(element.prefix(), None);
    }
}
