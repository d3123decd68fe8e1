use quick_xml::Reader;
use quick_xml::events::Event;

use crate::tree::{ConvertError, Element};

fn xml_err(e: impl std::fmt::Display) -> ConvertError {
    ConvertError::Xml(e.to_string())
}

/// Parse XML text into a generic element tree rooted at the document element.
///
/// Attribute order, element order within a tag, and the distinction between
/// attributes, children, and text are all preserved. Tag names are kept as
/// written — camt documents use the default namespace without prefixes, and
/// the assembler rewrites the root declarations itself.
pub fn parse(xml: &str) -> Result<Element, ConvertError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(ref e) => {
                stack.push(element_from_start(e)?);
            }
            Event::Empty(ref e) => {
                let element = element_from_start(e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(ref e) => {
                if let Some(current) = stack.last_mut() {
                    let text = e.unescape().map_err(xml_err)?;
                    let text = text.trim();
                    if !text.is_empty() {
                        current.append_text(text);
                    }
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ConvertError::Xml("unbalanced closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ConvertError::Xml("unclosed element at end of input".into()));
    }
    root.ok_or_else(|| ConvertError::Xml("document contains no root element".into()))
}

fn element_from_start(e: &quick_xml::events::BytesStart<'_>) -> Result<Element, ConvertError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_err)?;
        element.set_attr(key, value.into_owned());
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ConvertError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(ConvertError::Xml("multiple root elements".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_structure_with_attributes() {
        let doc = parse(r#"<Document xmlns="ns"><A x="1"><B>text</B></A></Document>"#).unwrap();
        assert_eq!(doc.tag(), "Document");
        assert_eq!(doc.attr("xmlns"), Some("ns"));
        let a = doc.first_child("A").unwrap();
        assert_eq!(a.attr("x"), Some("1"));
        assert_eq!(a.first_child("B").and_then(Element::text), Some("text"));
    }

    #[test]
    fn preserves_mixed_content_on_legacy_amounts() {
        let doc = parse("<Ntry><Amt>9.00<Ccy>CHF</Ccy></Amt></Ntry>").unwrap();
        let amt = doc.first_child("Amt").unwrap();
        assert_eq!(amt.text(), Some("9.00"));
        assert_eq!(amt.first_child("Ccy").and_then(Element::text), Some("CHF"));
    }

    #[test]
    fn keeps_repeated_children_in_document_order() {
        let doc = parse("<RmtInf><Ustrd>a</Ustrd><Ustrd>b</Ustrd></RmtInf>").unwrap();
        let texts: Vec<&str> = doc
            .children_of("Ustrd")
            .iter()
            .filter_map(Element::text)
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn self_closing_elements_become_empty_nodes() {
        let doc = parse("<TxDtls><RltdAgts/></TxDtls>").unwrap();
        assert!(doc.first_child("RltdAgts").unwrap().is_empty());
    }

    #[test]
    fn unescapes_predefined_entities() {
        let doc = parse("<Nm>Müller &amp; Söhne &lt;AG&gt;</Nm>").unwrap();
        assert_eq!(doc.text(), Some("Müller & Söhne <AG>"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("").is_err());
        assert!(parse("<A><B></A>").is_err());
    }
}
