use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use overdue_core::{build_report_with, select_policy, AgingPolicy, Exclusion, Report, ReportType};
use overdue_ingest::read_rows;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

mod config;
mod logging;
mod render;
mod state;

use config::{init_config, load_config, today_in, Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "overdue",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("OVERDUE_BUILD_SHA"), ")"),
    about = "Aging reports over client balance extracts"
)]
struct Cli {
    /// Config file (default: ~/.overdue/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an aging report from a spreadsheet or CSV extract
    Report {
        /// Source file (.xls, .xlsx, .xlsm, .xlsb, .ods, .csv, .tsv)
        #[arg(long, short)]
        input: PathBuf,

        /// Report type: overdue, 30_37, 37_44 or 24_31 (unknown values mean overdue)
        #[arg(long = "type", short = 't')]
        report_type: Option<String>,

        /// Reference date (YYYY-MM-DD); defaults to today in the configured timezone
        #[arg(long)]
        today: Option<NaiveDate>,

        #[arg(long, short, value_enum)]
        format: Option<OutputFormat>,

        /// Write here instead of stdout; a directory gets a generated file name
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Worksheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,
    },

    /// List report types and their date windows
    Types {
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(p) => p.clone(),
        None => state::default_config_path()?,
    };
    let cfg = load_config(&config_path)?;

    let level = if cli.verbose { "debug" } else { cfg.output.log_level.as_str() };
    logging::init(level);

    match cli.command {
        Command::Report {
            input,
            report_type,
            today,
            format,
            output,
            sheet,
        } => {
            let selector = report_type.unwrap_or_else(|| cfg.report.default_type.clone());
            let today = resolve_today(today, &cfg)?;
            let format = format.unwrap_or(cfg.output.format);
            run_report(&cfg, &input, &selector, today, format, output, sheet)?;
        }

        Command::Types { today } => {
            let today = resolve_today(today, &cfg)?;
            println!("Reference date: {}\n", today.format("%Y-%m-%d"));
            for t in ReportType::ALL {
                let p = AgingPolicy::new(t, today);
                println!("{:<8} {:<32} {}", t.selector(), p.label, p.range_description());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                if init_config(&config_path)? {
                    println!("Wrote {}", config_path.display());
                } else {
                    println!("Config already exists: {}", config_path.display());
                }
            }
            ConfigCommand::Show => {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn resolve_today(flag: Option<NaiveDate>, cfg: &Config) -> Result<NaiveDate> {
    match flag {
        Some(d) => Ok(d),
        None => today_in(&cfg.report.timezone),
    }
}

fn run_report(
    cfg: &Config,
    input: &Path,
    selector: &str,
    today: NaiveDate,
    format: OutputFormat,
    output: Option<PathBuf>,
    sheet: Option<String>,
) -> Result<()> {
    if ReportType::recognize(selector).is_none() {
        warn!(selector, "unknown report type, using overdue");
    }
    let policy = select_policy(selector, today);

    let mut layout = cfg.sheet.clone();
    if sheet.is_some() {
        layout.sheet = sheet;
    }

    let rows = read_rows(input, &layout)
        .with_context(|| format!("reading {}", input.display()))?;
    let report = build_report_with(rows, &policy, &cfg.report.unknown_contact);

    let generated = today_in(&cfg.report.timezone)?;
    let rendered = render::render(&report, format, generated)?;
    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(render::suggested_file_name(&report, format))
            } else {
                path
            };
            fs::write(&path, &rendered).with_context(|| format!("write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes()).context("write report")?;
            stdout.flush().context("flush report")?;
        }
    }

    eprintln!("{}", summary_line(&report));
    Ok(())
}

fn summary_line(report: &Report) -> String {
    let d = &report.diagnostics;
    let reasons: Vec<String> = Exclusion::ALL
        .iter()
        .filter(|r| d.excluded_for(**r) > 0)
        .map(|r| format!("{}={}", r, d.excluded_for(*r)))
        .collect();

    let mut line = format!(
        "{}: {} rows read, {} accepted, {} excluded",
        report.report_type,
        d.rows_seen,
        d.accepted,
        d.excluded_total()
    );
    if !reasons.is_empty() {
        line.push_str(&format!(" ({})", reasons.join(", ")));
    }
    if d.malformed_balances > 0 {
        line.push_str(&format!(
            "; {} unreadable balance cell(s) counted as zero",
            d.malformed_balances
        ));
    }
    line
}
