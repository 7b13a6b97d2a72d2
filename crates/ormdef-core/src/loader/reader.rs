//! Cursor-style access to class definition documents.

use crate::def::NamedEnum;
use crate::error::{DefinitionError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use roxmltree::{Document, Node, ParsingOptions};
use std::fmt;
use std::str::FromStr;

/// Parse a document. Document type declarations are allowed and ignored.
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// Parse an ISO 8601 date or date-time without offset.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// One element of a class definition document.
///
/// Empty attribute values are treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> Element<'a, 'input> {
    /// Wrap an element node.
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// The document root element.
    pub fn root(document: &'a Document<'input>) -> Self {
        Self::new(document.root_element())
    }

    /// Local tag name.
    pub fn tag(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Line and column of the start tag.
    pub fn position(&self) -> (u32, u32) {
        let pos = self.node.document().text_pos_at(self.node.range().start);
        (pos.row, pos.col)
    }

    /// Structural error located at this element.
    pub fn error(&self, message: impl fmt::Display) -> DefinitionError {
        let (row, col) = self.position();
        DefinitionError::structural(format!("<{}> at {}:{}: {}", self.tag(), row, col, message))
    }

    /// Fail unless this element has the given tag.
    pub fn expect_tag(&self, tag: &str) -> Result<()> {
        if self.tag() == tag {
            Ok(())
        } else {
            Err(self.error(format_args!("expected a <{}> element", tag)))
        }
    }

    /// Optional attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name).filter(|value| !value.is_empty())
    }

    /// Optional attribute as an owned string.
    pub fn string_attr(&self, name: &str) -> Option<String> {
        self.attr(name).map(str::to_string)
    }

    /// Required attribute.
    pub fn required_attr(&self, name: &str) -> Result<&'a str> {
        self.attr(name)
            .ok_or_else(|| self.error(format_args!("missing required attribute '{}'", name)))
    }

    /// Boolean attribute written as `true` or `false`.
    pub fn bool_attr(&self, name: &str, default: bool) -> Result<bool> {
        match self.attr(name) {
            None => Ok(default),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(self.error(format_args!(
                "attribute '{}' value '{}' is not a boolean; valid values are: true, false",
                name, other
            ))),
        }
    }

    /// Attribute parsed with [`FromStr`]; `expected` names the form in errors.
    pub fn parse_attr<T: FromStr>(&self, name: &str, expected: &str) -> Result<Option<T>> {
        match self.attr(name) {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
                self.error(format_args!(
                    "attribute '{}' value '{}' is not a valid {}",
                    name, raw, expected
                ))
            }),
        }
    }

    /// Enum attribute matched exactly against member names.
    pub fn enum_attr<E: NamedEnum>(&self, name: &str, default: E) -> Result<E> {
        match self.attr(name) {
            None => Ok(default),
            Some(raw) => E::from_name(raw).ok_or_else(|| {
                self.error(format_args!(
                    "attribute '{}' value '{}' is not a valid {}; valid values are: {}",
                    name,
                    raw,
                    E::TYPE_NAME,
                    E::member_names()
                ))
            }),
        }
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = Element<'a, 'input>> {
        self.node.children().filter(Node::is_element).map(Element::new)
    }

    /// Fail on the first child element whose tag is not in `allowed`.
    pub fn ensure_children(&self, allowed: &[&str]) -> Result<()> {
        match self.children().find(|child| !allowed.contains(&child.tag())) {
            None => Ok(()),
            Some(child) if allowed.is_empty() => {
                Err(child.error(format_args!("<{}> takes no child elements", self.tag())))
            }
            Some(child) => Err(child.error(format_args!(
                "unexpected element inside <{}>; valid elements are: {}",
                self.tag(),
                allowed.join(", ")
            ))),
        }
    }

    /// Concatenated text of the subtree, trimmed.
    pub fn text(&self) -> String {
        self.node
            .descendants()
            .filter(Node::is_text)
            .filter_map(|n| n.text())
            .collect::<String>()
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::DeleteAction;

    const DOC: &str = r#"<?xml version="1.0"?>
<!DOCTYPE classes SYSTEM "classes.dtd">
<classes>
  <!-- comment -->
  <class name="Invoice" assembly="" flag="yes" count="12" deleteAction="Prevent">
    <note> some <b>text</b> </note>
  </class>
</classes>"#;

    #[test]
    fn test_attributes() {
        let doc = parse_document(DOC).unwrap();
        let root = Element::root(&doc);
        root.expect_tag("classes").unwrap();

        let class = root.children().next().unwrap();
        assert_eq!(class.tag(), "class");
        assert_eq!(class.attr("name"), Some("Invoice"));
        assert_eq!(class.attr("assembly"), None);
        assert_eq!(class.parse_attr::<u32>("count", "count").unwrap(), Some(12));
        assert_eq!(
            class.enum_attr("deleteAction", DeleteAction::DeleteRelated).unwrap(),
            DeleteAction::Prevent
        );
        assert!(class.bool_attr("missing", true).unwrap());
    }

    #[test]
    fn test_errors_carry_position() {
        let doc = parse_document(DOC).unwrap();
        let class = Element::root(&doc).children().next().unwrap();

        let err = class.required_attr("assembly").unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().starts_with("<class> at 5:"));
        assert!(err.message().contains("'assembly'"));

        let err = class.bool_attr("flag", false).unwrap_err();
        assert!(err.message().contains("valid values are: true, false"));

        let err = class.ensure_children(&["property"]).unwrap_err();
        assert!(err.message().starts_with("<note>"));
    }

    #[test]
    fn test_text_and_children() {
        let doc = parse_document(DOC).unwrap();
        let class = Element::root(&doc).children().next().unwrap();
        let note = class.children().next().unwrap();

        assert_eq!(note.text(), "some text");
        assert_eq!(class.children().count(), 1);
    }

    #[test]
    fn test_parse_date_time() {
        let date = parse_date_time("2024-02-29").unwrap();
        assert_eq!(date.to_string(), "2024-02-29 00:00:00");
        assert!(parse_date_time("2024-02-29T13:45:10.5").is_some());
        assert!(parse_date_time("2024-02-29 13:45:10").is_some());
        assert!(parse_date_time("29/02/2024").is_none());
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_document("<classes><class></classes>").unwrap_err();
        assert!(matches!(err, DefinitionError::Document(_)));
    }
}
