//! Workbook Annotation Pass
//!
//! Reads the annotation data calamine does not surface, straight from the
//! xlsx package: data-validation rules, conditional-formatting entries,
//! chart counts (via the worksheet → drawing → chart relationship chain),
//! and cell comments. Keyed by sheet name so the spreadsheet analyzer can
//! merge the results into its per-sheet output.
//!
//! Everything in here is best-effort: a missing part means "none", and a
//! malformed part stops that part's extraction without failing the workbook.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use crate::analyzer::truncate_chars;
use crate::analyzer::xmlpart::{
    attr, is_element, parse_relationships, read_part, rels_part_name, resolve_target,
};
use crate::constants::limits;
use crate::types::{AnalysisError, CellComment, ValidationRule};

/// Per-sheet annotation data.
#[derive(Debug, Clone, Default)]
pub struct SheetExtras {
    pub validations: Vec<ValidationRule>,
    pub validation_total: usize,
    pub conditional_formatting: usize,
    pub chart_count: usize,
    pub comments: Vec<CellComment>,
    pub comment_total: usize,
}

/// Extract annotations for every sheet in the workbook, keyed by sheet name.
pub fn workbook_extras(path: &Path) -> Result<HashMap<String, SheetExtras>, AnalysisError> {
    let file = File::open(path).map_err(AnalysisError::unreadable)?;
    let mut archive = ZipArchive::new(file).map_err(AnalysisError::unreadable)?;

    let workbook_xml = read_part(&mut archive, "xl/workbook.xml")
        .ok_or_else(|| AnalysisError::extraction("workbook", "xl/workbook.xml missing"))?;
    let sheet_rids = parse_sheet_rids(&workbook_xml);

    let workbook_rels = read_part(&mut archive, &rels_part_name("xl/workbook.xml"))
        .map(|xml| parse_relationships(&xml))
        .unwrap_or_default();
    let targets: HashMap<&str, &str> = workbook_rels
        .iter()
        .map(|(id, _, target)| (id.as_str(), target.as_str()))
        .collect();

    let mut extras = HashMap::new();
    for (sheet_name, rid) in sheet_rids {
        let Some(target) = targets.get(rid.as_str()) else {
            continue;
        };
        let sheet_part = resolve_target("xl", target);
        extras.insert(sheet_name, sheet_extras(&mut archive, &sheet_part));
    }
    Ok(extras)
}

/// Sheet name → relationship id pairs from `xl/workbook.xml`.
fn parse_sheet_rids(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    let mut sheets = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if is_element(&e, b"sheet") => {
                if let (Some(name), Some(rid)) = (attr(&e, b"name"), attr(&e, b"id")) {
                    sheets.push((name, rid));
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    sheets
}

fn sheet_extras(archive: &mut ZipArchive<File>, sheet_part: &str) -> SheetExtras {
    let mut extras = SheetExtras::default();

    if let Some(xml) = read_part(archive, sheet_part) {
        scan_worksheet(&xml, &mut extras);
    }

    // Comments and charts hang off the worksheet's relationships.
    let sheet_dir = sheet_part.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
    let rels = read_part(archive, &rels_part_name(sheet_part))
        .map(|xml| parse_relationships(&xml))
        .unwrap_or_default();

    for (_, kind, target) in &rels {
        let part = resolve_target(sheet_dir, target);
        if kind.contains("comments") {
            collect_comments(archive, &part, &mut extras);
        } else if kind.contains("drawing") {
            extras.chart_count += count_drawing_charts(archive, &part);
        }
    }
    extras
}

/// Count `<dataValidation>` (with sqref/type/formula1) and
/// `<conditionalFormatting>` entries in one worksheet part.
fn scan_worksheet(xml: &str, extras: &mut SheetExtras) {
    let mut reader = Reader::from_str(xml);
    let mut current: Option<ValidationRule> = None;
    let mut in_formula1 = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if is_element(&e, b"conditionalFormatting") => {
                extras.conditional_formatting += 1;
            }
            Ok(Event::Start(e)) if is_element(&e, b"dataValidation") => {
                current = Some(validation_from(&e));
            }
            Ok(Event::Empty(e)) if is_element(&e, b"dataValidation") => {
                push_validation(extras, validation_from(&e));
            }
            Ok(Event::Start(e)) if is_element(&e, b"formula1") => {
                in_formula1 = current.is_some();
            }
            Ok(Event::Text(t)) if in_formula1 => {
                if let (Some(rule), Ok(text)) = (current.as_mut(), t.unescape()) {
                    rule.formula.push_str(&text);
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"formula1" => {
                in_formula1 = false;
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"dataValidation" => {
                if let Some(rule) = current.take() {
                    push_validation(extras, rule);
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
}

fn validation_from(e: &quick_xml::events::BytesStart<'_>) -> ValidationRule {
    ValidationRule {
        sqref: attr(e, b"sqref").unwrap_or_default(),
        kind: attr(e, b"type").unwrap_or_default(),
        formula: String::new(),
    }
}

fn push_validation(extras: &mut SheetExtras, rule: ValidationRule) {
    extras.validation_total += 1;
    if extras.validations.len() < limits::VALIDATIONS_SHOWN {
        extras.validations.push(rule);
    }
}

/// Collect `<comment ref="A1">` entries from a comments part.
fn collect_comments(archive: &mut ZipArchive<File>, part: &str, extras: &mut SheetExtras) {
    let Some(xml) = read_part(archive, part) else {
        return;
    };
    let mut reader = Reader::from_str(xml.as_str());
    let mut current_ref: Option<String> = None;
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if is_element(&e, b"comment") => {
                current_ref = attr(&e, b"ref");
                text.clear();
            }
            Ok(Event::Start(e)) if is_element(&e, b"t") => {
                in_text = current_ref.is_some();
            }
            Ok(Event::Text(t)) if in_text => {
                if let Ok(chunk) = t.unescape() {
                    text.push_str(&chunk);
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => {
                in_text = false;
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"comment" => {
                if let Some(cell) = current_ref.take() {
                    extras.comment_total += 1;
                    if extras.comments.len() < limits::COMMENTS_SHOWN {
                        extras.comments.push(CellComment {
                            cell,
                            text: truncate_chars(text.trim(), limits::COMMENT_CHARS).0,
                        });
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
}

/// Charts referenced by one drawing part (via its own relationships).
fn count_drawing_charts(archive: &mut ZipArchive<File>, drawing_part: &str) -> usize {
    read_part(archive, &rels_part_name(drawing_part))
        .map(|xml| {
            parse_relationships(&xml)
                .iter()
                .filter(|(_, kind, _)| kind.contains("chart"))
                .count()
        })
        .unwrap_or(0)
}
