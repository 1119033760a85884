//! XML text to [`Element`] tree.

use std::io::BufRead;
use std::str;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{TmxError, Result};

use super::element::Element;

/// Parse XML source text into an element tree.
pub fn parse_element_tree(source: &str) -> Result<Element> {
    read_tree(Reader::from_str(source))
}

/// Parse XML from any buffered byte stream into an element tree.
pub fn read_element_tree<R: BufRead>(reader: R) -> Result<Element> {
    read_tree(Reader::from_reader(reader))
}

fn read_tree<R: BufRead>(mut reader: Reader<R>) -> Result<Element> {
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(start_element(&e)?),
            Event::Empty(e) => {
                let element = start_element(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| xml_error("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    let bytes = c.into_inner();
                    let text = str::from_utf8(&bytes).map_err(|e| xml_error(&e.to_string()))?;
                    current.text.push_str(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(&format!("unclosed element <{}>", open.name)));
    }

    root.ok_or_else(|| xml_error("document has no root element"))
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let name = str::from_utf8(e.name().as_ref())
        .map_err(|err| xml_error(&err.to_string()))?
        .to_string();

    let mut element = Element::new(name);
    for attribute in e.attributes() {
        let attribute = attribute?;
        let key = str::from_utf8(attribute.key.as_ref())
            .map_err(|err| xml_error(&err.to_string()))?
            .to_string();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.insert(key, value);
    }

    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(xml_error("document has more than one root element"));
    }
    *root = Some(element);
    Ok(())
}

fn xml_error(message: &str) -> TmxError {
    TmxError::Xml {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_tree() {
        let source = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" width="2">
 <tileset firstgid="1" source="terrain.tsx"/>
 <layer name="a &amp; b">
  <data encoding="csv">
1,2
</data>
 </layer>
</map>
"#;

        let root = parse_element_tree(source).unwrap();

        assert_eq!(root.name, "map");
        assert_eq!(root.attr("version"), Some("1.10"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].name, "tileset");
        assert_eq!(root.children[1].attr("name"), Some("a & b"));

        let data = root.children[1].child("data").unwrap();
        assert_eq!(data.text.trim(), "1,2");
    }

    #[test]
    fn test_cdata_text() {
        let root = parse_element_tree("<data><![CDATA[1,2,3]]></data>").unwrap();
        assert_eq!(root.text, "1,2,3");
    }

    #[test]
    fn test_stream_matches_str() {
        let source = "<map a=\"1\"><layer/><group><layer/></group></map>";
        let from_str = parse_element_tree(source).unwrap();
        let from_stream = read_element_tree(source.as_bytes()).unwrap();
        assert_eq!(from_str, from_stream);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse_element_tree("").is_err());
        assert!(parse_element_tree("<map>").is_err());
        assert!(parse_element_tree("<map></layer>").is_err());
        assert!(parse_element_tree("<a/><b/>").is_err());
    }
}
