//! HTML element vocabulary
//!
//! Tag names are matched case-insensitively. Anything outside the vocabulary
//! decodes to [`HtmlElement::Custom`] with the name as written.

use super::{Attributes, DecodeElement};
use crate::whitespace::{WhitespaceCollapsing, WhitespacePolicy};
use std::fmt;

macro_rules! html_elements {
    ($($variant:ident => $name:literal,)*) => {
        /// Common HTML elements
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum HtmlElement {
            $($variant,)*
            /// Element outside the known vocabulary
            Custom(String),
        }

        impl HtmlElement {
            /// Canonical lowercase tag name
            pub fn name(&self) -> &str {
                match self {
                    $(HtmlElement::$variant => $name,)*
                    HtmlElement::Custom(name) => name,
                }
            }

            fn from_lowercase(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(HtmlElement::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

html_elements! {
    Html => "html",
    Head => "head",
    Meta => "meta",
    Title => "title",
    Link => "link",
    Style => "style",
    Script => "script",
    Body => "body",
    Header => "header",
    Footer => "footer",
    Nav => "nav",
    Main => "main",
    Article => "article",
    Aside => "aside",
    Section => "section",
    Div => "div",
    Span => "span",
    P => "p",
    Br => "br",
    Hr => "hr",
    Pre => "pre",
    Textarea => "textarea",
    Figure => "figure",
    Img => "img",
    Figcaption => "figcaption",
    A => "a",
    Abbr => "abbr",
    Cite => "cite",
    Q => "q",
    Blockquote => "blockquote",
    Code => "code",
    Sup => "sup",
    Sub => "sub",
    Strong => "strong",
    Em => "em",
    B => "b",
    I => "i",
    U => "u",
    Small => "small",
    H1 => "h1",
    H2 => "h2",
    H3 => "h3",
    H4 => "h4",
    H5 => "h5",
    H6 => "h6",
    Ul => "ul",
    Ol => "ol",
    Li => "li",
    Dl => "dl",
    Dt => "dt",
    Dd => "dd",
    Table => "table",
    Thead => "thead",
    Tbody => "tbody",
    Tfoot => "tfoot",
    Th => "th",
    Tr => "tr",
    Td => "td",
    Caption => "caption",
}

impl HtmlElement {
    /// Whether this is one of `h1` to `h6`
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            HtmlElement::H1 | HtmlElement::H2 | HtmlElement::H3 | HtmlElement::H4 | HtmlElement::H5 | HtmlElement::H6
        )
    }
}

impl DecodeElement for HtmlElement {
    fn decode(name: &str, _attributes: &Attributes) -> Self {
        HtmlElement::from_lowercase(&name.to_ascii_lowercase())
            .unwrap_or_else(|| HtmlElement::Custom(name.to_string()))
    }
}

impl WhitespaceCollapsing for HtmlElement {
    fn whitespace_policy(&self, _attributes: &Attributes) -> WhitespacePolicy {
        use HtmlElement::*;
        match self {
            Span | A | Strong | Em | B | I | U | Code | Small | Sup | Sub | Abbr | Cite | Q | Img | Br => {
                WhitespacePolicy::Inline
            }
            Pre | Textarea => WhitespacePolicy::Preserve,
            _ => WhitespacePolicy::Block,
        }
    }
}

impl fmt::Display for HtmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known() {
        let attrs = Attributes::new();
        assert_eq!(HtmlElement::decode("p", &attrs), HtmlElement::P);
        assert_eq!(HtmlElement::decode("FigCaption", &attrs), HtmlElement::Figcaption);
        assert_eq!(HtmlElement::decode("H3", &attrs), HtmlElement::H3);
    }

    #[test]
    fn test_decode_custom_keeps_name() {
        let element = HtmlElement::decode("My-Widget", &Attributes::new());
        assert_eq!(element, HtmlElement::Custom("My-Widget".to_string()));
        assert_eq!(element.name(), "My-Widget");
    }

    #[test]
    fn test_display() {
        assert_eq!(HtmlElement::Blockquote.to_string(), "blockquote");
        assert_eq!(HtmlElement::Custom("x-y".into()).to_string(), "x-y");
    }

    #[test]
    fn test_whitespace_policy() {
        let attrs = Attributes::new();
        assert_eq!(HtmlElement::Span.whitespace_policy(&attrs), WhitespacePolicy::Inline);
        assert_eq!(HtmlElement::Strong.whitespace_policy(&attrs), WhitespacePolicy::Inline);
        assert_eq!(HtmlElement::Pre.whitespace_policy(&attrs), WhitespacePolicy::Preserve);
        assert_eq!(HtmlElement::Div.whitespace_policy(&attrs), WhitespacePolicy::Block);
        assert_eq!(HtmlElement::H1.whitespace_policy(&attrs), WhitespacePolicy::Block);
        assert_eq!(
            HtmlElement::Custom("x".into()).whitespace_policy(&attrs),
            WhitespacePolicy::Block
        );
    }

    #[test]
    fn test_is_heading() {
        assert!(HtmlElement::H6.is_heading());
        assert!(!HtmlElement::Header.is_heading());
    }
}
