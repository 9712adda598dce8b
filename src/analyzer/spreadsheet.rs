//! Spreadsheet Analyzer
//!
//! Deep structural analysis of modern workbooks and a reduced-capability
//! path for legacy `.xls` files. Formula *evaluation* is out of scope; the
//! analyzer extracts formula text and the cell references inside it.
//!
//! Cell scanning is bounded to the `SHEET_SCAN_ROWS` × `SHEET_SCAN_COLS`
//! window measured in absolute sheet coordinates, matching the report caps.

use std::path::Path;

use calamine::{Data, Reader, open_workbook};

use crate::constants::limits;
use crate::types::AnalysisError;

#[cfg(feature = "xls")]
use crate::types::{LegacySheetAnalysis, LegacySpreadsheetAnalysis};
#[cfg(feature = "xls")]
use calamine::Xls;

#[cfg(feature = "xlsx")]
use calamine::Xlsx;
#[cfg(feature = "xlsx")]
use std::collections::HashSet;

#[cfg(feature = "xlsx")]
use crate::analyzer::formula::{cell_ref, extract_cell_refs, range_ref};
#[cfg(feature = "xlsx")]
use crate::analyzer::ooxml;
#[cfg(feature = "xlsx")]
use crate::types::{
    CellDependencies, FormulaCell, SheetAnalysis, SpreadsheetAnalysis, TableInfo,
};

// =============================================================================
// Modern Workbooks
// =============================================================================

/// Analyze a modern (`.xlsx`-family) workbook.
#[cfg(feature = "xlsx")]
pub fn analyze_workbook(path: &Path) -> Result<SpreadsheetAnalysis, AnalysisError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(AnalysisError::unreadable)?;
    let mut analysis = SpreadsheetAnalysis {
        sheet_names: workbook.sheet_names().to_owned(),
        ..Default::default()
    };

    // merged_regions_by_sheet requires a successful load first
    let merged_loaded = match workbook.load_merged_regions() {
        Ok(()) => true,
        Err(err) => {
            analysis
                .notes
                .push(AnalysisError::extraction("merged ranges", err).to_string());
            false
        }
    };

    analysis.defined_names = workbook.defined_names().to_vec();

    let mut tables: Vec<TableInfo> = Vec::new();
    match workbook.load_tables() {
        Ok(()) => {
            let names: Vec<String> = workbook
                .table_names()
                .into_iter()
                .map(|n| n.to_string())
                .collect();
            for name in names {
                if let Ok(table) = workbook.table_by_name(&name) {
                    let data = table.data();
                    let range = match (data.start(), data.end()) {
                        (Some(start), Some(end)) => range_ref(start, end),
                        _ => String::new(),
                    };
                    tables.push(TableInfo {
                        name: table.name().to_string(),
                        sheet: table.sheet_name().to_string(),
                        range,
                        columns: table.columns().to_vec(),
                    });
                }
            }
        }
        Err(err) => analysis
            .notes
            .push(AnalysisError::extraction("tables", err).to_string()),
    }

    // Annotation data calamine does not expose, straight from the package.
    let mut extras = match ooxml::workbook_extras(path) {
        Ok(extras) => extras,
        Err(err) => {
            analysis.notes.push(err.to_string());
            Default::default()
        }
    };

    for name in analysis.sheet_names.clone() {
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(err) => {
                analysis
                    .notes
                    .push(AnalysisError::extraction(format!("sheet `{name}`"), err).to_string());
                continue;
            }
        };

        let mut sheet = sheet_shape(&name, &range);

        if merged_loaded {
            let merged = workbook.merged_regions_by_sheet(&name);
            sheet.merged_total = merged.len();
            sheet.merged_ranges = merged
                .iter()
                .take(limits::MERGES_SHOWN)
                .map(|(_, _, dims)| range_ref(dims.start, dims.end))
                .collect();
        }

        collect_formulas(&mut sheet, workbook.worksheet_formula(&name), &range);

        sheet.tables = tables.iter().filter(|t| t.sheet == name).cloned().collect();

        if let Some(sheet_extras) = extras.remove(&name) {
            sheet.validations = sheet_extras.validations;
            sheet.validation_total = sheet_extras.validation_total;
            sheet.conditional_formatting = sheet_extras.conditional_formatting;
            sheet.chart_count = sheet_extras.chart_count;
            sheet.comments = sheet_extras.comments;
            sheet.comment_total = sheet_extras.comment_total;
        }

        sheet.sample_rows = sample_rows(&range);
        analysis.sheets.push(sheet);
    }

    Ok(analysis)
}

/// Shape facts every path reports: bounding range and row/column counts,
/// plus the header row (first row, ≤ `SHEET_HEADER_COLS` non-empty cells).
#[cfg(feature = "xlsx")]
fn sheet_shape(name: &str, range: &calamine::Range<Data>) -> SheetAnalysis {
    let (row_count, col_count) = range.get_size();
    SheetAnalysis {
        name: name.to_string(),
        dimensions: match (range.start(), range.end()) {
            (Some(start), Some(end)) => Some(range_ref(start, end)),
            _ => None,
        },
        row_count,
        col_count,
        headers: header_row(range),
        ..Default::default()
    }
}

fn header_row(range: &calamine::Range<Data>) -> Vec<String> {
    range
        .rows()
        .next()
        .map(|row| {
            row.iter()
                .take(limits::SHEET_HEADER_COLS)
                .filter(|cell| !matches!(cell, Data::Empty))
                .map(|cell| cell.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Gather formula cells and their dependency edges, preferring the
/// workbook's formula parts and falling back to `=`-prefixed values.
#[cfg(feature = "xlsx")]
fn collect_formulas(
    sheet: &mut SheetAnalysis,
    formula_range: Result<calamine::Range<String>, calamine::XlsxError>,
    value_range: &calamine::Range<Data>,
) {
    let mut seen: HashSet<(u32, u32)> = HashSet::new();

    if let Ok(formulas) = formula_range
        && let Some(start) = formulas.start()
    {
        for (r, row) in formulas.rows().enumerate() {
            let abs_row = start.0 + r as u32;
            if abs_row as usize >= limits::SHEET_SCAN_ROWS {
                break;
            }
            for (c, text) in row.iter().enumerate() {
                let abs_col = start.1 + c as u32;
                if abs_col as usize >= limits::SHEET_SCAN_COLS {
                    break;
                }
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                seen.insert((abs_row, abs_col));
                record_formula(sheet, abs_row, abs_col, text);
            }
        }
    }

    // A producer can store a formula as a plain `=...` text value.
    if let Some(start) = value_range.start() {
        for (r, row) in value_range.rows().enumerate() {
            let abs_row = start.0 + r as u32;
            if abs_row as usize >= limits::SHEET_SCAN_ROWS {
                break;
            }
            for (c, cell) in row.iter().enumerate() {
                let abs_col = start.1 + c as u32;
                if abs_col as usize >= limits::SHEET_SCAN_COLS {
                    break;
                }
                if seen.contains(&(abs_row, abs_col)) {
                    continue;
                }
                if let Data::String(value) = cell
                    && value.starts_with('=')
                {
                    record_formula(sheet, abs_row, abs_col, value);
                }
            }
        }
    }
}

#[cfg(feature = "xlsx")]
fn record_formula(sheet: &mut SheetAnalysis, row: u32, col: u32, text: &str) {
    let reference = cell_ref(row, col);
    let display = if text.starts_with('=') {
        text.to_string()
    } else {
        format!("={text}")
    };
    let references = extract_cell_refs(text);
    sheet.formulas.push(FormulaCell {
        cell: reference.clone(),
        formula: display,
    });
    if !references.is_empty() {
        sheet.dependencies.push(CellDependencies {
            cell: reference,
            references,
        });
    }
}

/// First header row plus up to `SAMPLE_ROWS` data rows, `SAMPLE_COLS` wide.
#[cfg(feature = "xlsx")]
fn sample_rows(range: &calamine::Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .take(limits::SAMPLE_ROWS + 1)
        .map(|row| {
            row.iter()
                .take(limits::SAMPLE_COLS)
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

// =============================================================================
// Legacy Workbooks
// =============================================================================

/// Reduced-capability analysis of a legacy `.xls` workbook: sheet names,
/// row/column counts, and the header row. No formulas, merges, or
/// dependencies.
#[cfg(feature = "xls")]
pub fn analyze_legacy_workbook(path: &Path) -> Result<LegacySpreadsheetAnalysis, AnalysisError> {
    let mut workbook: Xls<_> = open_workbook(path).map_err(AnalysisError::unreadable)?;
    let sheet_names = workbook.sheet_names().to_owned();
    let mut analysis = LegacySpreadsheetAnalysis {
        sheet_names: sheet_names.clone(),
        sheets: Vec::new(),
    };

    for name in sheet_names {
        let (row_count, col_count, headers) = match workbook.worksheet_range(&name) {
            Ok(range) => {
                let (rows, cols) = range.get_size();
                (rows, cols, header_row(&range))
            }
            Err(_) => (0, 0, Vec::new()),
        };
        analysis.sheets.push(LegacySheetAnalysis {
            name,
            row_count,
            col_count,
            headers,
        });
    }
    Ok(analysis)
}

#[cfg(all(test, feature = "xlsx"))]
mod tests {
    use super::*;
    use std::io::Write;

    /// Build a minimal one-sheet xlsx package by hand.
    fn write_fixture(path: &Path) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();

        let parts: &[(&str, &str)] = &[
            (
                "[Content_Types].xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#,
            ),
            (
                "_rels/.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
            ),
            (
                "xl/workbook.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Data" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
            ),
            (
                "xl/_rels/workbook.xml.rels",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
            ),
            (
                "xl/worksheets/sheet1.xml",
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<dimension ref="A1:B2"/>
<sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>Name</t></is></c><c r="B1" t="inlineStr"><is><t>Amount</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>Widget</t></is></c><c r="B2"><f>Data!A1+1</f><v>0</v></c></row>
</sheetData>
<mergeCells count="1"><mergeCell ref="A3:B3"/></mergeCells>
</worksheet>"#,
            ),
        ];

        for (name, content) in parts {
            zip.start_file(name.to_string(), options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn minimal_workbook_yields_headers_formula_and_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.xlsx");
        write_fixture(&path);

        let analysis = analyze_workbook(&path).unwrap();
        assert_eq!(analysis.sheet_names, vec!["Data"]);
        assert_eq!(analysis.sheets.len(), 1);

        let sheet = &analysis.sheets[0];
        assert_eq!(sheet.headers, vec!["Name", "Amount"]);
        assert_eq!(sheet.row_count, 2);
        assert_eq!(sheet.col_count, 2);

        assert_eq!(sheet.formulas.len(), 1);
        assert_eq!(sheet.formulas[0].cell, "B2");
        assert_eq!(sheet.formulas[0].formula, "=Data!A1+1");

        // The sheet qualifier is not part of the reference token.
        assert_eq!(sheet.dependencies.len(), 1);
        assert_eq!(sheet.dependencies[0].cell, "B2");
        assert_eq!(sheet.dependencies[0].references, vec!["A1"]);
    }

    #[test]
    fn merged_regions_render_as_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.xlsx");
        write_fixture(&path);

        let analysis = analyze_workbook(&path).unwrap();
        let sheet = &analysis.sheets[0];
        assert_eq!(sheet.merged_total, 1);
        assert_eq!(sheet.merged_ranges, vec!["A3:B3"]);
    }

    #[test]
    fn sample_rows_include_header_and_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.xlsx");
        write_fixture(&path);

        let analysis = analyze_workbook(&path).unwrap();
        let sample = &analysis.sheets[0].sample_rows;
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0][0], "Name");
        assert_eq!(sample[1][0], "Widget");
    }

    #[test]
    fn unreadable_workbook_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        let err = analyze_workbook(&path).unwrap_err();
        assert!(err.is_unreadable());
    }
}
