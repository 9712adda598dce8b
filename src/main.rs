use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bundlescope::analyzer::{Capabilities, FileAnalyzer};
use bundlescope::config::{CONFIG_FILE, Config, ConfigLoader};
use bundlescope::report::{ProjectAnalyzer, ReportWriter, format_size, render_analysis};
use bundlescope::scanner::{PathFilter, TreeBuilder, render_tree};
use bundlescope::types::normalized_extension;

#[derive(Parser)]
#[command(name = "bundlescope")]
#[command(
    version,
    about = "Structural analyzer and Markdown report generator for office document trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Configuration file (default: bundlescope.toml)")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a directory tree and compose its reports
    Analyze {
        #[arg(default_value = ".", help = "Root directory to analyze")]
        path: PathBuf,
        #[arg(long, help = "Print the run summary as JSON instead of text")]
        json: bool,
        #[arg(long = "no-write", help = "Compose reports without writing artifacts")]
        no_write: bool,
        #[arg(short, long, help = "Maximum tree depth override")]
        depth: Option<usize>,
    },

    /// Print the filtered directory tree
    Tree {
        #[arg(default_value = ".", help = "Root directory")]
        path: PathBuf,
        #[arg(short, long, help = "Maximum tree depth override")]
        depth: Option<usize>,
    },

    /// Analyze a single file and print its report section
    File {
        #[arg(help = "File to analyze")]
        path: PathBuf,
        #[arg(long, help = "Print the analysis as JSON instead of Markdown")]
        json: bool,
    },

    /// Show build capabilities and configuration sources
    Status,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("✗").red());
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    match cli.command {
        Commands::Analyze {
            path,
            json,
            no_write,
            depth,
        } => run_analyze(config, &path, json, no_write, depth),
        Commands::Tree { path, depth } => run_tree(config, &path, depth),
        Commands::File { path, json } => run_file(&path, json),
        Commands::Status => run_status(&config),
    }
}

// =============================================================================
// Commands
// =============================================================================

fn run_analyze(
    mut config: Config,
    path: &Path,
    json: bool,
    no_write: bool,
    depth: Option<usize>,
) -> anyhow::Result<()> {
    if let Some(depth) = depth {
        config.scan.max_depth = depth;
    }
    config.validate()?;

    let caps = Capabilities::detect();
    if !json {
        print_banner(caps);
    }

    let analyzer = ProjectAnalyzer::new(config.clone(), caps);
    let run = analyzer.run(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&run.summary())?);
        return Ok(());
    }

    println!(
        "{} Scanned {} folders, {} files ({})",
        style("✓").green(),
        run.stats.dir_count,
        run.stats.file_count,
        format_size(run.stats.total_bytes)
    );
    for report in &run.folders {
        println!(
            "  {} {} ({} files, {} analyzed)",
            style("📂").dim(),
            report.relative.display(),
            report.file_count,
            report.analyzed_count()
        );
    }
    println!(
        "{} Analyzed {} documents across {} folder reports",
        style("✓").green(),
        run.total_analyzed(),
        run.folders.len()
    );

    if no_write || !config.report.write_artifacts {
        println!("{} Artifacts not written (disabled)", style("ℹ").blue());
        return Ok(());
    }

    let written = ReportWriter::new(&config.report).persist(&run)?;
    println!(
        "{} Wrote {} artifacts under {}",
        style("✓").green(),
        written.len(),
        style(run.root.join(&config.report.dir_name).display()).bold()
    );
    println!(
        "{} Master report: {}",
        style("✓").green(),
        style(
            run.root
                .join(bundlescope::constants::artifacts::ROOT_SUMMARY)
                .display()
        )
        .bold()
    );
    Ok(())
}

fn run_tree(config: Config, path: &Path, depth: Option<usize>) -> anyhow::Result<()> {
    let filter = PathFilter::new(&config.report);
    let max_depth = depth.unwrap_or(config.scan.max_depth);
    let tree = TreeBuilder::new(&filter).with_max_depth(max_depth).build(path)?;
    println!("{}", render_tree(&tree));
    Ok(())
}

fn run_file(path: &Path, json: bool) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!("not a file: {}", path.display());
    }
    let analyzer = FileAnalyzer::new(Capabilities::detect());
    let analysis = analyzer.analyze(path);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let extension = normalized_extension(path);
        if extension.is_empty() {
            println!("## {name}\n");
        } else {
            println!("## {name} (.{extension})\n");
        }
        print!("{}", render_analysis(&analysis));
    }
    Ok(())
}

fn run_status(config: &Config) -> anyhow::Result<()> {
    print_banner(Capabilities::detect());

    println!("\n{}", style("Configuration").bold());
    println!("{}", "─".repeat(40));
    let source = if Path::new(CONFIG_FILE).exists() {
        format!("{CONFIG_FILE} (+ BUNDLESCOPE_* environment)")
    } else {
        "defaults (+ BUNDLESCOPE_* environment)".to_string()
    };
    println!("  source: {source}\n");
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn print_banner(caps: Capabilities) {
    println!("{}", style("BundleScope").bold().underlined());
    let mark = |enabled: bool| {
        if enabled {
            style("✓").green()
        } else {
            style("✗").red()
        }
    };
    println!(
        "  {} xlsx   {} xls   {} docx   {} pdf",
        mark(caps.xlsx),
        mark(caps.xls),
        mark(caps.docx),
        mark(caps.pdf)
    );
    let missing = caps.missing();
    if !missing.is_empty() {
        println!(
            "  {} missing features: {} (affected files get a placeholder)",
            style("⚠").yellow(),
            missing.join(", ")
        );
    }
}
