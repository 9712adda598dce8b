//! OOXML Part Helpers
//!
//! Small shared utilities for reading XML parts out of zip-packaged office
//! documents. Namespace prefixes vary between producers, so element and
//! attribute lookups go through local names.

use quick_xml::events::BytesStart;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Read one part of the package as a string. Missing or unreadable parts
/// yield `None`; callers decide whether that is an error or just absence.
pub fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Option<String> {
    let mut file = archive.by_name(name).ok()?;
    let mut content = String::new();
    file.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Attribute value by local name (`r:id` and `id` both match `b"id"`).
pub fn attr(element: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// True when the element's local name matches.
pub fn is_element(element: &BytesStart<'_>, local: &[u8]) -> bool {
    element.name().local_name().as_ref() == local
}

/// Resolve a relationship target against a base directory inside the
/// package (`xl/worksheets` + `../comments1.xml` → `xl/comments1.xml`).
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            ".." => {
                parts.pop();
            }
            "." | "" => {}
            name => parts.push(name),
        }
    }
    parts.join("/")
}

/// The `_rels` part describing the given part.
pub fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// Parse a relationships part into (id, type, target) triples.
pub fn parse_relationships(xml: &str) -> Vec<(String, String, String)> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut rels = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if is_element(&e, b"Relationship") => {
                let id = attr(&e, b"Id").unwrap_or_default();
                let kind = attr(&e, b"Type").unwrap_or_default();
                let target = attr(&e, b"Target").unwrap_or_default();
                rels.push((id, kind, target));
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    rels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_resolution_handles_parent_and_absolute() {
        assert_eq!(
            resolve_target("xl/worksheets", "../comments1.xml"),
            "xl/comments1.xml"
        );
        assert_eq!(
            resolve_target("xl", "worksheets/sheet1.xml"),
            "xl/worksheets/sheet1.xml"
        );
        assert_eq!(resolve_target("xl/worksheets", "/xl/media/a.png"), "xl/media/a.png");
    }

    #[test]
    fn rels_name_sits_next_to_the_part() {
        assert_eq!(
            rels_part_name("xl/workbook.xml"),
            "xl/_rels/workbook.xml.rels"
        );
        assert_eq!(
            rels_part_name("word/document.xml"),
            "word/_rels/document.xml.rels"
        );
    }

    #[test]
    fn relationships_parse_ids_types_targets() {
        let xml = r#"<?xml version="1.0"?>
            <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
              <Relationship Id="rId1" Type="http://x/worksheet" Target="worksheets/sheet1.xml"/>
              <Relationship Id="rId2" Type="http://x/image" Target="media/image1.png"/>
            </Relationships>"#;
        let rels = parse_relationships(xml);
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].0, "rId1");
        assert!(rels[1].1.contains("image"));
        assert_eq!(rels[0].2, "worksheets/sheet1.xml");
    }
}
