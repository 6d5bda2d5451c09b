use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};
use std::io::Cursor;

const FHIR_NAMESPACE: &str = "http://hl7.org/fhir";

/// Render a FHIR JSON resource (typically a Bundle) as FHIR XML
pub fn json_to_xml(json: &Value) -> Result<String, String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| format!("Failed to write XML declaration: {}", e))?;

    match json {
        Value::Object(map) => write_resource(&mut writer, map)?,
        _ => return Err("Expected JSON object at root".to_string()),
    }

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| format!("Failed to convert XML to UTF-8: {}", e))
}

// A resource becomes an element named after its resourceType.
fn write_resource<W: std::io::Write>(
    writer: &mut Writer<W>,
    map: &Map<String, Value>,
) -> Result<(), String> {
    let resource_type = map
        .get("resourceType")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Resource is missing resourceType".to_string())?;

    let mut elem = BytesStart::new(resource_type);
    elem.push_attribute(("xmlns", FHIR_NAMESPACE));

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| format!("Failed to write start tag: {}", e))?;

    for (key, val) in map.iter() {
        if key != "resourceType" {
            write_field(writer, key, val)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(resource_type)))
        .map_err(|e| format!("Failed to write end tag: {}", e))?;

    Ok(())
}

fn write_field<W: std::io::Write>(
    writer: &mut Writer<W>,
    key: &str,
    value: &Value,
) -> Result<(), String> {
    match value {
        Value::Null => {}
        Value::Bool(b) => write_primitive(writer, key, if *b { "true" } else { "false" })?,
        Value::Number(n) => write_primitive(writer, key, &n.to_string())?,
        Value::String(s) => {
            if !s.is_empty() {
                write_primitive(writer, key, s)?;
            }
        }
        Value::Array(arr) => {
            for item in arr {
                write_field(writer, key, item)?;
            }
        }
        Value::Object(map) if key == "resource" && map.contains_key("resourceType") => {
            writer
                .write_event(Event::Start(BytesStart::new(key)))
                .map_err(|e| format!("Failed to write resource start tag: {}", e))?;

            write_resource(writer, map)?;

            writer
                .write_event(Event::End(BytesEnd::new(key)))
                .map_err(|e| format!("Failed to write resource end tag: {}", e))?;
        }
        Value::Object(map) => {
            // Extension urls are attributes, not child elements
            let mut elem = BytesStart::new(key);
            let url = if key == "extension" {
                map.get("url").and_then(|u| u.as_str())
            } else {
                None
            };
            if let Some(url) = url {
                elem.push_attribute(("url", url));
            }

            let children: Vec<_> = map
                .iter()
                .filter(|(k, v)| !(url.is_some() && k.as_str() == "url") && !v.is_null())
                .collect();

            if children.is_empty() {
                writer
                    .write_event(Event::Empty(elem))
                    .map_err(|e| format!("Failed to write empty element: {}", e))?;
                return Ok(());
            }

            writer
                .write_event(Event::Start(elem))
                .map_err(|e| format!("Failed to write complex start tag: {}", e))?;

            for (nested_key, nested_val) in children {
                write_field(writer, nested_key, nested_val)?;
            }

            writer
                .write_event(Event::End(BytesEnd::new(key)))
                .map_err(|e| format!("Failed to write complex end tag: {}", e))?;
        }
    }

    Ok(())
}

fn write_primitive<W: std::io::Write>(
    writer: &mut Writer<W>,
    key: &str,
    value: &str,
) -> Result<(), String> {
    let mut elem = BytesStart::new(key);
    elem.push_attribute(("value", value));

    writer
        .write_event(Event::Empty(elem))
        .map_err(|e| format!("Failed to write {} element: {}", key, e))
}
