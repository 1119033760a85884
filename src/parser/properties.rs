//! `<properties>` blocks.

use crate::error::Result;
use crate::types::Properties;

use super::element::Element;

/// Collect the properties declared on `element`.
///
/// Reads the first `<properties>` child; a property's value comes from its
/// `value` attribute or, for multi-line values, from its text.
pub fn parse_properties(element: &Element) -> Result<Properties> {
    let mut properties = Properties::new();

    let Some(block) = element.child("properties") else {
        return Ok(properties);
    };

    for property in block.children_named("property") {
        let name = property.required_attr("name")?;
        let value = match property.attr("value") {
            Some(value) => value.to_string(),
            None => property.text.clone(),
        };
        properties.insert(name.to_string(), value);
    }

    Ok(properties)
}
