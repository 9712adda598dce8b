//! Analysis Markdown Renderer
//!
//! Turns the pure data structs from `types` into Markdown fragments. Every
//! renderer is a function of its input alone, so the exact report text is
//! testable without touching a filesystem or a real document.
//!
//! Display caps come from `constants::limits`; whenever a list is clipped the
//! heading carries the true total.

use std::fmt::Write;

use crate::constants::limits;
use crate::types::{
    AnalysisError, DocTable, DocumentAnalysis, FileAnalysis, LegacySpreadsheetAnalysis,
    PdfAnalysis, PdfTable, SheetAnalysis, SpreadsheetAnalysis,
};

/// Render the body of one file's analysis section.
pub fn render_analysis(analysis: &FileAnalysis) -> String {
    let mut out = String::new();
    match analysis {
        FileAnalysis::Spreadsheet(a) => render_spreadsheet(&mut out, a),
        FileAnalysis::LegacySpreadsheet(a) => render_legacy_spreadsheet(&mut out, a),
        FileAnalysis::Document(a) => render_document(&mut out, a),
        FileAnalysis::Pdf(a) => render_pdf(&mut out, a),
        FileAnalysis::Unsupported { extension } => {
            if extension.is_empty() {
                out.push_str("*No structural analyzer for files without an extension.*\n");
            } else {
                let _ = writeln!(out, "*No structural analyzer for `.{extension}` files.*");
            }
        }
        FileAnalysis::Skipped(err) => render_skipped(&mut out, err),
    }
    out
}

fn render_skipped(out: &mut String, err: &AnalysisError) {
    let _ = writeln!(out, "> ⚠️ {err}");
    if let AnalysisError::CapabilityMissing { capability } = err {
        let _ = writeln!(
            out,
            ">\n> Rebuild with the `{capability}` feature enabled to analyze this file."
        );
    }
}

// =============================================================================
// Spreadsheets
// =============================================================================

fn render_spreadsheet(out: &mut String, analysis: &SpreadsheetAnalysis) {
    let _ = writeln!(
        out,
        "- **Sheets ({}):** {}",
        analysis.sheet_names.len(),
        analysis.sheet_names.join(", ")
    );
    if !analysis.defined_names.is_empty() {
        let _ = writeln!(out, "- **Defined names ({}):**", analysis.defined_names.len());
        for (name, reference) in &analysis.defined_names {
            let _ = writeln!(out, "  - **{name}** = `{reference}`");
        }
    }
    out.push('\n');

    for sheet in &analysis.sheets {
        render_sheet(out, sheet);
    }

    render_notes(out, &analysis.notes);
}

fn render_sheet(out: &mut String, sheet: &SheetAnalysis) {
    let _ = writeln!(out, "#### 📄 Sheet: {}\n", sheet.name);
    if let Some(dims) = &sheet.dimensions {
        let _ = writeln!(out, "- **Range:** `{dims}`");
    }
    let _ = writeln!(
        out,
        "- **Size:** {} rows × {} columns",
        sheet.row_count, sheet.col_count
    );
    if !sheet.headers.is_empty() {
        let _ = writeln!(out, "- **Headers:** {}", sheet.headers.join(", "));
    }
    if sheet.merged_total > 0 {
        let _ = writeln!(
            out,
            "- **Merged ranges ({}):** {}",
            sheet.merged_total,
            sheet.merged_ranges.join(", ")
        );
    }
    if sheet.conditional_formatting > 0 {
        let _ = writeln!(
            out,
            "- **Conditional formatting rules:** {}",
            sheet.conditional_formatting
        );
    }
    if sheet.chart_count > 0 {
        let _ = writeln!(out, "- **Charts:** {}", sheet.chart_count);
    }

    for table in &sheet.tables {
        let _ = writeln!(
            out,
            "- **Table `{}`** (`{}`): {}",
            table.name,
            table.range,
            table.columns.join(", ")
        );
    }

    if !sheet.formulas.is_empty() {
        let _ = writeln!(
            out,
            "\n<details>\n<summary>🧮 Formulas ({})</summary>\n",
            sheet.formulas.len()
        );
        for cell in sheet.formulas.iter().take(limits::FORMULAS_SHOWN) {
            let _ = writeln!(out, "- **{}**: `{}`", cell.cell, cell.formula);
        }
        let hidden = sheet.formulas.len().saturating_sub(limits::FORMULAS_SHOWN);
        if hidden > 0 {
            let _ = writeln!(out, "- *... and {hidden} more*");
        }
        out.push_str("\n</details>\n");
    }

    if !sheet.dependencies.is_empty() {
        let _ = writeln!(
            out,
            "\n<details>\n<summary>🔗 Cell references ({})</summary>\n",
            sheet.dependencies.len()
        );
        for dep in sheet.dependencies.iter().take(limits::DEPENDENCIES_SHOWN) {
            let _ = writeln!(out, "- **{}** ← {}", dep.cell, dep.references.join(", "));
        }
        let hidden = sheet
            .dependencies
            .len()
            .saturating_sub(limits::DEPENDENCIES_SHOWN);
        if hidden > 0 {
            let _ = writeln!(out, "- *... and {hidden} more*");
        }
        out.push_str("\n</details>\n");
    }

    if sheet.validation_total > 0 {
        let _ = writeln!(
            out,
            "\n**Data validations ({}):**\n",
            sheet.validation_total
        );
        for rule in sheet.validations.iter().take(limits::VALIDATIONS_SHOWN) {
            if rule.formula.is_empty() {
                let _ = writeln!(out, "- `{}`: {}", rule.sqref, rule.kind);
            } else {
                let _ = writeln!(out, "- `{}`: {} = `{}`", rule.sqref, rule.kind, rule.formula);
            }
        }
    }

    if sheet.comment_total > 0 {
        let _ = writeln!(out, "\n**Comments ({}):**\n", sheet.comment_total);
        for comment in sheet.comments.iter().take(limits::COMMENTS_SHOWN) {
            let _ = writeln!(out, "- **{}**: {}", comment.cell, comment.text);
        }
    }

    if !sheet.sample_rows.is_empty() {
        out.push_str("\n**Sample data:**\n\n");
        render_table(out, &sheet.sample_rows);
    }
    out.push('\n');
}

fn render_legacy_spreadsheet(out: &mut String, analysis: &LegacySpreadsheetAnalysis) {
    let _ = writeln!(
        out,
        "- **Sheets ({}):** {}",
        analysis.sheet_names.len(),
        analysis.sheet_names.join(", ")
    );
    out.push_str("- *Legacy format: structure only, no formula analysis.*\n\n");
    for sheet in &analysis.sheets {
        let _ = writeln!(
            out,
            "- **{}**: {} rows × {} columns",
            sheet.name, sheet.row_count, sheet.col_count
        );
        if !sheet.headers.is_empty() {
            let _ = writeln!(out, "  - Headers: {}", sheet.headers.join(", "));
        }
    }
}

// =============================================================================
// Documents
// =============================================================================

fn render_document(out: &mut String, analysis: &DocumentAnalysis) {
    let _ = writeln!(out, "- **Paragraphs:** {}", analysis.paragraph_count);
    let _ = writeln!(
        out,
        "- **Words:** {} ({} characters)",
        analysis.word_count, analysis.char_count
    );
    if analysis.table_count > 0 {
        let _ = writeln!(out, "- **Tables:** {}", analysis.table_count);
    }
    if analysis.image_count > 0 {
        let _ = writeln!(out, "- **Images:** {}", analysis.image_count);
    }
    if analysis.section_count > 0 {
        let _ = writeln!(out, "- **Sections:** {}", analysis.section_count);
    }

    if !analysis.headings.is_empty() {
        out.push_str("\n**Outline:**\n\n");
        for heading in &analysis.headings {
            let indent = "  ".repeat(heading.level.saturating_sub(1) as usize);
            let _ = writeln!(out, "{indent}- {}", heading.text);
        }
    }

    for (idx, table) in analysis.tables.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n**Table {} ({} rows):**\n",
            idx + 1,
            table.rows_total
        );
        render_doc_table(out, table);
    }

    if !analysis.header_snippets.is_empty() {
        let _ = writeln!(
            out,
            "\n- **Headers:** {}",
            analysis.header_snippets.join(" | ")
        );
    }
    if !analysis.footer_snippets.is_empty() {
        let _ = writeln!(
            out,
            "- **Footers:** {}",
            analysis.footer_snippets.join(" | ")
        );
    }

    render_preview(out, &analysis.preview, analysis.preview_truncated);
    render_notes(out, &analysis.notes);
}

fn render_doc_table(out: &mut String, table: &DocTable) {
    let mut rows = Vec::with_capacity(1 + table.data.len());
    rows.push(table.header.clone());
    rows.extend(table.data.iter().cloned());
    render_table(out, &rows);
    let remaining = table
        .rows_total
        .saturating_sub(1 + table.data.len());
    if remaining > 0 {
        let _ = writeln!(out, "\n*... and {remaining} more rows*");
    }
}

// =============================================================================
// PDFs
// =============================================================================

fn render_pdf(out: &mut String, analysis: &PdfAnalysis) {
    let _ = writeln!(out, "- **Pages:** {}", analysis.page_count);

    let meta = &analysis.metadata;
    if let Some(title) = &meta.title {
        let _ = writeln!(out, "- **Title:** {title}");
    }
    if let Some(author) = &meta.author {
        let _ = writeln!(out, "- **Author:** {author}");
    }
    if let Some(subject) = &meta.subject {
        let _ = writeln!(out, "- **Subject:** {subject}");
    }
    if let Some(creator) = &meta.creator {
        let _ = writeln!(out, "- **Creator:** {creator}");
    }
    if let Some(date) = &meta.creation_date {
        let _ = writeln!(out, "- **Created:** {date}");
    }

    let _ = writeln!(
        out,
        "- **Totals (first {} pages):** {} words, {} tables, {} images",
        analysis.page_count.min(limits::PDF_STAT_PAGES),
        analysis.total_words,
        analysis.total_tables,
        analysis.total_images
    );

    if !analysis.pages.is_empty() {
        out.push_str("\n**Per-page:**\n\n");
        for page in &analysis.pages {
            let _ = writeln!(
                out,
                "- Page {}: {} words, {} tables, {} images",
                page.page, page.words, page.tables, page.images
            );
        }
    }

    for table in &analysis.sampled_tables {
        render_pdf_table(out, table);
    }

    render_preview(out, &analysis.preview, analysis.preview_truncated);
    render_notes(out, &analysis.notes);
}

fn render_pdf_table(out: &mut String, table: &PdfTable) {
    let _ = writeln!(
        out,
        "\n**Page {} · table {}:**\n",
        table.page, table.index
    );
    let mut rows = Vec::with_capacity(1 + table.data.len());
    rows.push(table.header.clone());
    rows.extend(table.data.iter().cloned());
    render_table(out, &rows);
    if table.remaining_rows > 0 {
        let _ = writeln!(out, "\n*... and {} more rows*", table.remaining_rows);
    }
}

// =============================================================================
// Shared Fragments
// =============================================================================

/// Render rows as a Markdown table; the first row is the header. Pipes in
/// cell text are escaped so they cannot break the table.
pub fn render_table(out: &mut String, rows: &[Vec<String>]) {
    let Some(header) = rows.first() else {
        return;
    };
    let escape = |cell: &str| cell.replace('|', "\\|").replace('\n', " ");

    let _ = writeln!(
        out,
        "| {} |",
        header.iter().map(|c| escape(c)).collect::<Vec<_>>().join(" | ")
    );
    let _ = writeln!(
        out,
        "|{}|",
        header.iter().map(|_| " --- ").collect::<Vec<_>>().join("|")
    );
    for row in &rows[1..] {
        let _ = writeln!(
            out,
            "| {} |",
            row.iter().map(|c| escape(c)).collect::<Vec<_>>().join(" | ")
        );
    }
}

fn render_preview(out: &mut String, preview: &str, truncated: bool) {
    if preview.is_empty() {
        return;
    }
    let suffix = if truncated { " *(truncated)*" } else { "" };
    let _ = writeln!(out, "\n**Preview:**{suffix}\n\n> {preview}");
}

fn render_notes(out: &mut String, notes: &[String]) {
    for note in notes {
        let _ = writeln!(out, "\n> ⚠️ {note}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellDependencies, FormulaCell, Heading};

    #[test]
    fn spreadsheet_sections_carry_sheet_headings() {
        let analysis = SpreadsheetAnalysis {
            sheet_names: vec!["Data".into()],
            sheets: vec![SheetAnalysis {
                name: "Data".into(),
                dimensions: Some("A1:B2".into()),
                row_count: 2,
                col_count: 2,
                headers: vec!["Name".into(), "Amount".into()],
                formulas: vec![FormulaCell {
                    cell: "B2".into(),
                    formula: "=A1+1".into(),
                }],
                dependencies: vec![CellDependencies {
                    cell: "B2".into(),
                    references: vec!["A1".into()],
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        let text = render_analysis(&FileAnalysis::Spreadsheet(analysis));
        assert!(text.contains("#### 📄 Sheet: Data"));
        assert!(text.contains("**Headers:** Name, Amount"));
        assert!(text.contains("🧮 Formulas (1)"));
        assert!(text.contains("- **B2**: `=A1+1`"));
        assert!(text.contains("- **B2** ← A1"));
    }

    #[test]
    fn defined_names_show_their_references() {
        let analysis = SpreadsheetAnalysis {
            sheet_names: vec!["Data".into()],
            defined_names: vec![("TaxRate".into(), "Data!$B$1".into())],
            ..Default::default()
        };
        let text = render_analysis(&FileAnalysis::Spreadsheet(analysis));
        assert!(text.contains("- **Defined names (1):**"));
        assert!(text.contains("  - **TaxRate** = `Data!$B$1`"));
    }

    #[test]
    fn formula_list_is_capped_with_a_remainder_line() {
        let formulas: Vec<FormulaCell> = (0..40)
            .map(|i| FormulaCell {
                cell: format!("A{}", i + 1),
                formula: "=1".into(),
            })
            .collect();
        let analysis = SpreadsheetAnalysis {
            sheet_names: vec!["S".into()],
            sheets: vec![SheetAnalysis {
                name: "S".into(),
                formulas,
                ..Default::default()
            }],
            ..Default::default()
        };
        let text = render_analysis(&FileAnalysis::Spreadsheet(analysis));
        assert!(text.contains("🧮 Formulas (40)"));
        assert!(text.contains("*... and 10 more*"));
    }

    #[test]
    fn document_outline_indents_by_level() {
        let analysis = DocumentAnalysis {
            paragraph_count: 3,
            word_count: 10,
            char_count: 60,
            headings: vec![
                Heading {
                    level: 1,
                    text: "Intro".into(),
                },
                Heading {
                    level: 2,
                    text: "Detail".into(),
                },
            ],
            ..Default::default()
        };
        let text = render_analysis(&FileAnalysis::Document(analysis));
        assert!(text.contains("- Intro"));
        assert!(text.contains("  - Detail"));
    }

    #[test]
    fn capability_placeholder_names_the_feature() {
        let text = render_analysis(&FileAnalysis::Skipped(AnalysisError::capability("pdf")));
        assert!(text.contains("`pdf` capability is missing"));
        assert!(text.contains("Rebuild with the `pdf` feature"));
    }

    #[test]
    fn tables_escape_pipes() {
        let mut out = String::new();
        render_table(&mut out, &[
            vec!["a|b".into(), "c".into()],
            vec!["1".into(), "2".into()],
        ]);
        assert!(out.contains("a\\|b"));
        assert!(out.lines().nth(1).unwrap().contains("---"));
    }
}
