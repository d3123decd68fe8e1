use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::tree::{ConvertError, Element};

fn xml_io(e: std::io::Error) -> ConvertError {
    ConvertError::Xml(format!("XML write error: {e}"))
}

/// Serialize an element tree with a single XML declaration
/// (`version="1.0"`, `encoding="UTF-8"`) and 2-space indentation.
///
/// Attributes are written in the element's declared order; no namespace
/// prefixes are invented beyond what the tree carries.
pub fn serialize(root: &Element) -> Result<String, ConvertError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_io)?;
    write_element(&mut writer, root)?;

    let buf = writer.into_inner().into_inner();
    String::from_utf8(buf).map_err(|e| ConvertError::Xml(format!("XML UTF-8 error: {e}")))
}

fn write_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    element: &Element,
) -> Result<(), ConvertError> {
    let mut start = BytesStart::new(element.tag());
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(xml_io)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_io)?;
    if let Some(text) = element.text() {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
    }
    for child in element.children() {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.tag())))
        .map_err(xml_io)?;
    Ok(())
}
