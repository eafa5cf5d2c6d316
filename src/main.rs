//! shiori - recover structure from legacy index pages

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use shiori::Rules;
use shiori::batch::{self, Manifest, PageJob, PageOutcome, PageReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Blocks and header registry as JSON
    Json,
    /// Rendered topic-list fragment and jump-navigation options
    Html,
}

#[derive(Parser)]
#[command(name = "shiori")]
#[command(version, about = "Recover structure from legacy HTML index pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    shiori --volume shumeic1 --level-up ../ shumeic1/index2.html
    shiori --manifest pages.toml --format html --out-dir site/
    RUST_LOG=shiori=debug shiori index.html   Show every dropped node")]
struct Cli {
    /// Index pages to normalize
    #[arg(value_name = "INPUT", required_unless_present = "manifest")]
    inputs: Vec<PathBuf>,

    /// TOML manifest listing pages ([[page]] source, volume, level_up)
    #[arg(short, long, conflicts_with = "inputs")]
    manifest: Option<PathBuf>,

    /// Volume id used in reader links
    #[arg(long, default_value = "shumeic1")]
    volume: String,

    /// Path from the page back to the site root
    #[arg(long, default_value = "../")]
    level_up: String,

    /// TOML rules overriding the built-in corpus lists
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write one file per page here instead of printing
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Label of the first jump-navigation option
    #[arg(long, default_value = "Navegação por Temas")]
    nav_label: String,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(missing) if missing > 0 => {
            eprintln!("warning: {missing} page(s) could not be read");
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns the number of pages that fell back to the placeholder.
fn run(cli: &Cli) -> Result<usize, String> {
    let rules = match &cli.rules {
        Some(path) => Rules::load(path).map_err(|e| format!("{}: {e}", path.display()))?,
        None => Rules::default(),
    };

    let jobs = match &cli.manifest {
        Some(path) => {
            Manifest::load(path)
                .map_err(|e| format!("{}: {e}", path.display()))?
                .pages
        }
        None => cli
            .inputs
            .iter()
            .map(|input| PageJob::new(input, &cli.volume, &cli.level_up))
            .collect(),
    };

    let reports = batch::run(&jobs, &rules);

    for report in &reports {
        let text = format_report(report, cli.format, &cli.nav_label)?;
        match &cli.out_dir {
            Some(dir) => write_output(dir, report, cli.format, &text)?,
            None => println!("{text}"),
        }
    }

    Ok(reports.iter().filter(|r| r.is_missing()).count())
}

fn format_report(report: &PageReport, format: Format, nav_label: &str) -> Result<String, String> {
    match format {
        Format::Json => {
            let value = match &report.outcome {
                PageOutcome::Normalized(page) => serde_json::json!({
                    "source": report.job.source.display().to_string(),
                    "volume": report.job.volume,
                    "blocks": page.blocks,
                    "headers": page.headers,
                }),
                PageOutcome::Missing { reason } => serde_json::json!({
                    "source": report.job.source.display().to_string(),
                    "volume": report.job.volume,
                    "error": reason,
                }),
            };
            serde_json::to_string_pretty(&value).map_err(|e| e.to_string())
        }
        Format::Html => {
            let rendered = report.render(nav_label);
            Ok(format!(
                "<!-- {} -->\n<select class=\"jump-nav\">\n{}</select>\n<div class=\"topic-list\">\n{}</div>",
                report.job.source.display(),
                rendered.jump_nav,
                rendered.body
            ))
        }
    }
}

fn write_output(dir: &Path, report: &PageReport, format: Format, text: &str) -> Result<(), String> {
    let mut path = dir.join(report.job.output_path());
    if format == Format::Json {
        path.set_extension("json");
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("{}: {e}", parent.display()))?;
    }
    std::fs::write(&path, text).map_err(|e| format!("{}: {e}", path.display()))
}
