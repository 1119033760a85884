//! A generic, already-parsed markup tree.
//!
//! The document parsers only need named elements with string attributes,
//! ordered children and text content. Any markup source can produce an
//! [`Element`]; [`super::xml`] builds one from XML text.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{TmxError, Result};
use crate::types::Colour;

/// One element of a markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
    /// Concatenated text and CDATA directly inside this element.
    pub text: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// First child with the given tag.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn required_attr(&self, key: &str) -> Result<&str> {
        self.attr(key).ok_or_else(|| TmxError::MissingAttribute {
            element: self.name.clone(),
            attribute: key.to_string(),
        })
    }

    /// Parse an optional attribute; a present but unparsable value is an error.
    pub fn parse_attr<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        self.attr(key)
            .map(|value| self.parse_value(key, value))
            .transpose()
    }

    pub fn required_parse<T: FromStr>(&self, key: &str) -> Result<T> {
        let value = self.required_attr(key)?;
        self.parse_value(key, value)
    }

    /// Parse an optional attribute, falling back to `default` when absent.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.parse_attr(key)?.unwrap_or(default))
    }

    /// Parse an optional keyword attribute, keeping the type's own error.
    pub fn enum_attr<T: FromStr<Err = TmxError>>(&self, key: &str) -> Result<Option<T>> {
        self.attr(key).map(str::parse).transpose()
    }

    /// Boolean attribute; accepts `0`/`1` as well as `false`/`true`.
    pub fn bool_attr(&self, key: &str) -> Result<Option<bool>> {
        match self.attr(key).map(str::trim) {
            None => Ok(None),
            Some("1") | Some("true") => Ok(Some(true)),
            Some("0") | Some("false") => Ok(Some(false)),
            Some(other) => Err(self.invalid(key, other)),
        }
    }

    pub fn colour_attr(&self, key: &str) -> Result<Option<Colour>> {
        self.attr(key)
            .map(|value| Colour::from_hex(value).map_err(|_| self.invalid(key, value)))
            .transpose()
    }

    fn parse_value<T: FromStr>(&self, key: &str, value: &str) -> Result<T> {
        value.trim().parse().map_err(|_| self.invalid(key, value))
    }

    fn invalid(&self, key: &str, value: &str) -> TmxError {
        TmxError::InvalidAttribute {
            element: self.name.clone(),
            attribute: key.to_string(),
            value: value.to_string(),
        }
    }
}
