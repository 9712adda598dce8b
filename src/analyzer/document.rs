//! Word-Processor Document Analyzer
//!
//! Streams `word/document.xml` through a small state machine instead of
//! materializing a DOM: paragraph text and styles, heading levels, top-level
//! tables, and section breaks fall out of one pass. Images come from the
//! document relationships part and header/footer snippets from the
//! `header*.xml` / `footer*.xml` parts.

use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader as XmlReader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::analyzer::xmlpart::{attr, is_element, parse_relationships, read_part};
use crate::analyzer::{make_preview, truncate_chars};
use crate::constants::limits;
use crate::types::{AnalysisError, DocTable, DocumentAnalysis, Heading};

const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";

/// Analyze a `.docx` package.
pub fn analyze_document(path: &Path) -> Result<DocumentAnalysis, AnalysisError> {
    let file = std::fs::File::open(path).map_err(AnalysisError::unreadable)?;
    let mut archive = ZipArchive::new(file).map_err(AnalysisError::unreadable)?;

    let body = read_part(&mut archive, DOCUMENT_PART).ok_or_else(|| {
        AnalysisError::extraction("document body", "word/document.xml part missing")
    })?;
    let mut analysis = parse_body(&body)?;

    analysis.image_count = count_images(&mut archive);
    analysis.header_snippets = part_snippets(&mut archive, "word/header");
    analysis.footer_snippets = part_snippets(&mut archive, "word/footer");

    Ok(analysis)
}

/// Map a paragraph style id to its heading level. Non-heading styles are
/// `None`; a heading style without a parseable number reads as level 1.
pub fn heading_level(style: &str) -> Option<u8> {
    let rest = style.strip_prefix("Heading")?;
    Some(rest.trim().parse().unwrap_or(1))
}

// =============================================================================
// Body Pass
// =============================================================================

/// One streaming pass over the document body.
///
/// Table rows are only collected for *top-level* tables; `tbl_depth` tracks
/// nesting so a table inside a table cell neither double-counts rows nor
/// pollutes paragraph text.
fn parse_body(xml: &str) -> Result<DocumentAnalysis, AnalysisError> {
    let mut reader = XmlReader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut analysis = DocumentAnalysis::default();
    let mut full_text = String::new();

    let mut paragraph = String::new();
    let mut style: Option<String> = None;
    let mut in_paragraph = false;

    let mut tbl_depth = 0usize;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut cells: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_cell = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if is_element(&e, b"tbl") {
                    tbl_depth += 1;
                    if tbl_depth == 1 {
                        analysis.table_count += 1;
                        rows.clear();
                    }
                } else if is_element(&e, b"tr") && tbl_depth == 1 {
                    cells.clear();
                } else if is_element(&e, b"tc") && tbl_depth == 1 {
                    cell.clear();
                    in_cell = true;
                } else if is_element(&e, b"p") && tbl_depth == 0 {
                    paragraph.clear();
                    style = None;
                    in_paragraph = true;
                }
            }
            Ok(Event::Empty(e)) => {
                if is_element(&e, b"pStyle") && in_paragraph {
                    style = attr(&e, b"val");
                } else if is_element(&e, b"sectPr") {
                    analysis.section_count += 1;
                } else if is_element(&e, b"br") && in_cell && tbl_depth == 1 {
                    cell.push(' ');
                }
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().unwrap_or_default();
                if in_cell {
                    // Nested-table text belongs to the inner table, not the
                    // surrounding cell.
                    if tbl_depth == 1 {
                        cell.push_str(&text);
                    }
                } else if in_paragraph {
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"tbl" => {
                        if tbl_depth == 1 {
                            push_table(&mut analysis, &rows);
                        }
                        tbl_depth = tbl_depth.saturating_sub(1);
                    }
                    b"tr" if tbl_depth == 1 => rows.push(std::mem::take(&mut cells)),
                    b"tc" if tbl_depth == 1 => {
                        cells.push(cell.trim().to_string());
                        in_cell = false;
                    }
                    b"p" if tbl_depth == 0 => {
                        in_paragraph = false;
                        let text = paragraph.trim();
                        if !text.is_empty() {
                            analysis.paragraph_count += 1;
                            if let Some(level) =
                                style.as_deref().and_then(heading_level)
                            {
                                analysis.headings.push(Heading {
                                    level,
                                    text: text.to_string(),
                                });
                            }
                            if !full_text.is_empty() {
                                full_text.push('\n');
                            }
                            full_text.push_str(text);
                        }
                    }
                    // sectPr with child elements arrives as Start/End.
                    b"sectPr" => analysis.section_count += 1,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(AnalysisError::extraction("document body", err));
            }
            _ => {}
        }
    }

    analysis.word_count = full_text.split_whitespace().count();
    analysis.char_count = full_text.chars().count();
    let (preview, truncated) = make_preview(&full_text);
    analysis.preview = preview;
    analysis.preview_truncated = truncated;
    Ok(analysis)
}

fn push_table(analysis: &mut DocumentAnalysis, rows: &[Vec<String>]) {
    if analysis.tables.len() >= limits::DOC_TABLES_SHOWN || rows.is_empty() {
        return;
    }
    let clip = |row: &Vec<String>| -> Vec<String> {
        row.iter()
            .map(|c| truncate_chars(c, limits::TABLE_CELL_CHARS).0)
            .collect()
    };
    analysis.tables.push(DocTable {
        rows_total: rows.len(),
        header: clip(&rows[0]),
        data: rows[1..]
            .iter()
            .take(limits::DOC_TABLE_ROWS)
            .map(clip)
            .collect(),
    });
}

// =============================================================================
// Package Extras
// =============================================================================

fn count_images<R: Read + Seek>(archive: &mut ZipArchive<R>) -> usize {
    read_part(archive, DOCUMENT_RELS)
        .map(|xml| {
            parse_relationships(&xml)
                .iter()
                .filter(|(_, kind, _)| kind.contains("image"))
                .count()
        })
        .unwrap_or(0)
}

/// Plain text of up to `HEADER_FOOTER_SNIPPETS` header or footer parts.
fn part_snippets<R: Read + Seek>(archive: &mut ZipArchive<R>, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = (0..archive.len())
        .filter_map(|i| archive.by_index(i).ok().map(|f| f.name().to_string()))
        .filter(|n| n.starts_with(prefix) && n.ends_with(".xml"))
        .collect();
    names.sort();

    let mut snippets = Vec::new();
    for name in names.iter().take(limits::HEADER_FOOTER_SNIPPETS) {
        if let Some(xml) = read_part(archive, name) {
            let text = extract_text(&xml);
            if !text.is_empty() {
                snippets.push(text);
            }
        }
    }
    snippets
}

/// Concatenate every `w:t` run in a part, space-separated.
fn extract_text(xml: &str) -> String {
    let mut reader = XmlReader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if is_element(&e, b"t") => in_text = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => in_text = false,
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().unwrap_or_default();
                if !out.is_empty() && !text.trim().is_empty() {
                    out.push(' ');
                }
                out.push_str(text.trim());
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    out.trim().to_string()
}
