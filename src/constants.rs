//! Global Constants
//!
//! Centralized constants for classification and report tuning.
//! All magic numbers should be defined here with documentation.

/// File extension tables (lowercase, without the leading dot)
pub mod extensions {
    /// Modern spreadsheet formats handled by the deep analyzer
    pub const EXCEL: &[&str] = &["xlsx", "xlsm", "xltx", "xltm"];

    /// Legacy spreadsheet format handled by the reduced-capability path
    pub const EXCEL_LEGACY: &[&str] = &["xls"];

    /// Word-processor formats
    pub const WORD: &[&str] = &["docx"];

    /// PDF
    pub const PDF: &[&str] = &["pdf"];

    /// Raster/vector image formats (listed, not analyzed)
    pub const IMAGE: &[&str] = &[
        "png", "jpg", "jpeg", "gif", "bmp", "svg", "ico", "webp", "tiff",
    ];

    /// Source, markup, and configuration files
    pub const CODE: &[&str] = &[
        "py", "js", "ts", "jsx", "tsx", "java", "cs", "cpp", "c", "h", "go", "rs", "rb", "php",
        "swift", "kt", "scala", "r", "m", "html", "css", "scss", "less", "vue", "svelte", "sql",
        "sh", "bash", "zsh", "ps1", "bat", "cmd", "json", "yaml", "yml", "toml", "xml", "ini",
        "cfg", "env", "md", "markdown", "txt", "rst", "tex", "dockerfile", "dockerignore",
        "gitignore", "editorconfig",
    ];

    /// Archive formats
    pub const ARCHIVE: &[&str] = &["zip", "tar", "gz", "rar", "7z", "bz2", "xz"];

    /// Video formats (own glyph, classified as `other`)
    pub const VIDEO: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

    /// Audio formats (own glyph, classified as `other`)
    pub const AUDIO: &[&str] = &["mp3", "wav", "flac", "aac", "ogg"];
}

/// Directory names excluded from every tree, category list, and statistic
pub const IGNORED_DIRS: &[&str] = &[
    "__pycache__",
    "node_modules",
    ".git",
    ".svn",
    ".hg",
    ".DS_Store",
    ".idea",
    ".vscode",
    "venv",
    "env",
    ".env",
    ".venv",
    "dist",
    "build",
    "target",
    "__MACOSX",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
];

/// Report artifact names (excluded from traversal alongside [`IGNORED_DIRS`])
pub mod artifacts {
    /// Per-run report directory created at the analyzed root
    pub const REPORT_DIR: &str = "_ANALYSIS_REPORTS";

    /// Per-folder report file written inside each analyzed folder
    pub const FOLDER_REPORT: &str = "_FOLDER_REPORT.md";

    /// Aggregated master document inside the report directory
    pub const MASTER_REPORT: &str = "MASTER_REPORT.md";

    /// Root-level copy of the master document
    pub const ROOT_SUMMARY: &str = "PROJECT_ANALYSIS_REPORT.md";

    /// Renamed copy of the root folder's report inside the report directory
    pub const ROOT_FOLDER_REPORT: &str = "ROOT_FOLDER_REPORT.md";
}

/// Scan ceilings and display caps
///
/// These bound both memory and latency against pathological inputs; the
/// analyzers must enforce them exactly. Displayed-item caps are always paired
/// with a true total in the rendered report.
pub mod limits {
    /// Default maximum tree depth; a truncation line replaces deeper levels
    pub const TREE_MAX_DEPTH: usize = 6;

    /// Cell scan window per sheet (rows)
    pub const SHEET_SCAN_ROWS: usize = 5000;

    /// Cell scan window per sheet (columns)
    pub const SHEET_SCAN_COLS: usize = 100;

    /// Header cells read from a sheet's first row
    pub const SHEET_HEADER_COLS: usize = 50;

    /// Merged ranges listed per sheet
    pub const MERGES_SHOWN: usize = 20;

    /// Formula rows listed per sheet
    pub const FORMULAS_SHOWN: usize = 30;

    /// Dependency rows listed per sheet
    pub const DEPENDENCIES_SHOWN: usize = 20;

    /// Data-validation rules listed per sheet
    pub const VALIDATIONS_SHOWN: usize = 10;

    /// Cell comments listed per sheet
    pub const COMMENTS_SHOWN: usize = 10;

    /// Characters kept of each cell comment
    pub const COMMENT_CHARS: usize = 100;

    /// Sample data rows rendered per sheet
    pub const SAMPLE_ROWS: usize = 5;

    /// Sample data columns rendered per sheet
    pub const SAMPLE_COLS: usize = 15;

    /// Tables rendered per word-processor document
    pub const DOC_TABLES_SHOWN: usize = 10;

    /// Data rows rendered per document table (after the header row)
    pub const DOC_TABLE_ROWS: usize = 3;

    /// Characters kept per rendered table cell
    pub const TABLE_CELL_CHARS: usize = 30;

    /// Characters kept per rendered PDF table cell
    pub const PDF_CELL_CHARS: usize = 25;

    /// Header/footer snippets listed per document
    pub const HEADER_FOOTER_SNIPPETS: usize = 3;

    /// Characters of the content preview
    pub const PREVIEW_CHARS: usize = 500;

    /// Pages accumulated into PDF totals
    pub const PDF_STAT_PAGES: usize = 50;

    /// Pages given a detailed per-page line
    pub const PDF_DETAIL_PAGES: usize = 10;

    /// Pages sampled for table rendering
    pub const PDF_TABLE_PAGES: usize = 5;

    /// Tables rendered per sampled PDF page
    pub const PDF_TABLES_PER_PAGE: usize = 3;

    /// Lines inspected for a code file's one-line description
    pub const CODE_PREVIEW_LINES: usize = 5;

    /// Characters kept of a code file's one-line description
    pub const CODE_PREVIEW_CHARS: usize = 80;
}
