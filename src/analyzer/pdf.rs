//! PDF Analyzer
//!
//! Structure over content: page stats, document metadata, image counts via
//! page XObject resources, and a text-layout heuristic for tables. Text is
//! only sampled from the first `PDF_STAT_PAGES` pages, so `total_words` is
//! a floor rather than an exact count for very long documents.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::analyzer::{make_preview, truncate_chars};
use crate::constants::limits;
use crate::types::{AnalysisError, PageStats, PdfAnalysis, PdfMetadata, PdfTable};

/// Analyze a PDF file.
pub fn analyze_pdf(path: &Path) -> Result<PdfAnalysis, AnalysisError> {
    let doc = Document::load(path).map_err(AnalysisError::unreadable)?;
    let pages = doc.get_pages();

    let mut analysis = PdfAnalysis {
        page_count: pages.len(),
        metadata: read_metadata(&doc),
        ..Default::default()
    };

    let mut full_text = String::new();
    for (idx, (&page_no, &page_id)) in pages.iter().enumerate() {
        if idx >= limits::PDF_STAT_PAGES {
            break;
        }

        let text = match doc.extract_text(&[page_no]) {
            Ok(text) => text,
            Err(err) => {
                analysis
                    .notes
                    .push(AnalysisError::extraction(format!("page {page_no}"), err).to_string());
                String::new()
            }
        };

        let words = text.split_whitespace().count();
        let tables = detect_text_tables(&text);
        let images = count_page_images(&doc, page_id);

        analysis.total_words += words;
        analysis.total_tables += tables.len();
        analysis.total_images += images;

        if idx < limits::PDF_DETAIL_PAGES {
            analysis.pages.push(PageStats {
                page: page_no as usize,
                words,
                tables: tables.len(),
                images,
            });
        }

        if idx < limits::PDF_TABLE_PAGES {
            for (t_idx, rows) in tables.iter().take(limits::PDF_TABLES_PER_PAGE).enumerate() {
                analysis
                    .sampled_tables
                    .push(sample_table(page_no as usize, t_idx + 1, rows));
            }
        }

        if !text.trim().is_empty() {
            if !full_text.is_empty() {
                full_text.push('\n');
            }
            full_text.push_str(text.trim());
        }
    }

    let (preview, truncated) = make_preview(&full_text);
    analysis.preview = preview;
    analysis.preview_truncated = truncated;
    Ok(analysis)
}

// =============================================================================
// Metadata
// =============================================================================

fn read_metadata(doc: &Document) -> PdfMetadata {
    let Some(info) = info_dictionary(doc) else {
        return PdfMetadata::default();
    };
    PdfMetadata {
        title: info_string(doc, info, b"Title"),
        author: info_string(doc, info, b"Author"),
        subject: info_string(doc, info, b"Subject"),
        creator: info_string(doc, info, b"Creator"),
        creation_date: info_string(doc, info, b"CreationDate"),
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    let info = match info {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    info.as_dict().ok()
}

fn info_string(doc: &Document, info: &Dictionary, key: &[u8]) -> Option<String> {
    let value = info.get(key).ok()?;
    let value = match value {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    match value {
        Object::String(bytes, _) => {
            let text = decode_pdf_string(bytes);
            (!text.is_empty()).then_some(text)
        }
        _ => None,
    }
}

/// Text strings are either UTF-16BE with a BOM or a byte encoding we treat
/// as UTF-8 best-effort.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units).trim().to_string()
    } else {
        String::from_utf8_lossy(bytes).trim().to_string()
    }
}

// =============================================================================
// Images
// =============================================================================

/// Count image XObjects reachable from a page's resource dictionaries.
fn count_page_images(doc: &Document, page_id: ObjectId) -> usize {
    let (direct, inherited) = doc.get_page_resources(page_id);

    let mut dicts: Vec<&Dictionary> = Vec::new();
    if let Some(dict) = direct {
        dicts.push(dict);
    }
    for id in inherited {
        if let Ok(object) = doc.get_object(id)
            && let Ok(dict) = object.as_dict()
        {
            dicts.push(dict);
        }
    }

    let mut count = 0;
    for resources in dicts {
        let Ok(xobjects) = resources.get(b"XObject").and_then(Object::as_dict) else {
            continue;
        };
        for (_, value) in xobjects.iter() {
            let object = match value {
                Object::Reference(id) => match doc.get_object(*id) {
                    Ok(object) => object,
                    Err(_) => continue,
                },
                other => other,
            };
            if let Object::Stream(stream) = object
                && let Ok(subtype) = stream.dict.get(b"Subtype")
                && matches!(subtype, Object::Name(name) if name == b"Image")
            {
                count += 1;
            }
        }
    }
    count
}

// =============================================================================
// Table Heuristic
// =============================================================================

/// Detect table-like regions in extracted text.
///
/// A line splits into columns on tabs or runs of two or more spaces; two or
/// more consecutive lines with at least two columns each form a table.
pub fn detect_text_tables(text: &str) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in text.lines() {
        let cells = split_columns(line);
        if cells.len() >= 2 {
            current.push(cells);
        } else {
            flush_table(&mut tables, &mut current);
        }
    }
    flush_table(&mut tables, &mut current);
    tables
}

fn flush_table(tables: &mut Vec<Vec<Vec<String>>>, current: &mut Vec<Vec<String>>) {
    if current.len() >= 2 {
        tables.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Split a text line into column cells on tabs or 2+ consecutive spaces.
pub fn split_columns(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut space_run = 0usize;

    for ch in line.chars() {
        match ch {
            '\t' => {
                space_run = 0;
                if !cell.trim().is_empty() {
                    cells.push(cell.trim().to_string());
                }
                cell.clear();
            }
            ' ' => {
                space_run += 1;
                if space_run == 2 {
                    // The single space already buffered belongs to the gap.
                    cell.pop();
                    if !cell.trim().is_empty() {
                        cells.push(cell.trim().to_string());
                    }
                    cell.clear();
                } else if space_run == 1 {
                    cell.push(' ');
                }
            }
            other => {
                space_run = 0;
                cell.push(other);
            }
        }
    }
    if !cell.trim().is_empty() {
        cells.push(cell.trim().to_string());
    }
    cells
}

fn sample_table(page: usize, index: usize, rows: &[Vec<String>]) -> PdfTable {
    let clip = |row: &Vec<String>| -> Vec<String> {
        row.iter()
            .map(|c| truncate_chars(c, limits::PDF_CELL_CHARS).0)
            .collect()
    };
    let header = clip(&rows[0]);
    let width = header.len();
    let data: Vec<Vec<String>> = rows[1..]
        .iter()
        .take(limits::DOC_TABLE_ROWS)
        .map(|row| {
            let mut row = clip(row);
            row.resize(width, String::new());
            row.truncate(width);
            row
        })
        .collect();
    let remaining_rows = rows.len().saturating_sub(1 + data.len());
    PdfTable {
        page,
        index,
        header,
        data,
        remaining_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_split_on_tabs_and_double_spaces() {
        assert_eq!(split_columns("Name\tAmount"), vec!["Name", "Amount"]);
        assert_eq!(
            split_columns("Region  Total   Notes"),
            vec!["Region", "Total", "Notes"]
        );
        assert_eq!(split_columns("single spaced words"), vec![
            "single spaced words"
        ]);
        assert!(split_columns("   ").is_empty());
    }

    #[test]
    fn consecutive_columned_lines_form_a_table() {
        let text = "Report 2024\n\nRegion  Total\nNorth  120\nSouth  95\n\nClosing remarks.";
        let tables = detect_text_tables(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 3);
        assert_eq!(tables[0][0], vec!["Region", "Total"]);
        assert_eq!(tables[0][2], vec!["South", "95"]);
    }

    #[test]
    fn a_lone_columned_line_is_not_a_table() {
        let tables = detect_text_tables("Name\tValue\nplain prose line\n");
        assert!(tables.is_empty());
    }

    #[test]
    fn sampled_tables_pad_rows_to_header_width() {
        let rows = vec![
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ];
        let table = sample_table(1, 1, &rows);
        assert_eq!(table.header.len(), 3);
        assert_eq!(table.data[0], vec!["1", "2", ""]);
        assert_eq!(table.remaining_rows, 0);
    }

    #[test]
    fn sampled_tables_count_rows_beyond_the_cap() {
        let mut rows = vec![vec!["Col".to_string()]];
        for i in 0..limits::DOC_TABLE_ROWS + 4 {
            rows.push(vec![i.to_string()]);
        }
        let table = sample_table(2, 1, &rows);
        assert_eq!(table.data.len(), limits::DOC_TABLE_ROWS);
        assert_eq!(table.remaining_rows, 4);
    }

    #[test]
    fn utf16_metadata_strings_decode() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "Büro".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_pdf_string(&bytes), "Büro");
        assert_eq!(decode_pdf_string(b"Plain"), "Plain");
    }
}
