//! gridreport CLI - ACEX spreadsheet reports
//!
//! Command-line interface for writing the Gantt chart and the resources
//! breakdown workbooks, and for inspecting the computed timeline.

mod data;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gridreport_core::{ActivityKind, Renderer};
use gridreport_layout::timeline::{TimelineLayout, TimelineRow};
use gridreport_render::{GanttWriter, ResourcesWriter, XlsxWriter};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "gridreport")]
#[command(author, version, about = "ACEX spreadsheet report generator", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Pad or truncate malformed records instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Directory for workbooks written under their default names
    #[arg(long, env = "GRIDREPORT_OUT_DIR", global = true, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the Gantt chart workbook
    Gantt {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the resources and logistics workbook
    Resources {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write both workbooks
    All,

    /// Print the computed timeline
    Timeline {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = TimelineFormat::Text)]
        format: TimelineFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TimelineFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let out_dir = cli.out_dir.as_deref();

    match cli.command.unwrap_or(Commands::All) {
        Commands::Gantt { output } => {
            let path = output_path(output, out_dir, data::GANTT_FILE)?;
            write_gantt(&path)?;
        }
        Commands::Resources { output } => {
            let path = output_path(output, out_dir, data::RESOURCES_FILE)?;
            write_resources(&path, cli.lenient)?;
        }
        Commands::All => {
            write_gantt(&output_path(None, out_dir, data::GANTT_FILE)?)?;
            write_resources(&output_path(None, out_dir, data::RESOURCES_FILE)?, cli.lenient)?;
        }
        Commands::Timeline { format } => print_timeline(format)?,
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from `warn`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Explicit path, else the default name inside `out_dir` (created on demand)
fn output_path(explicit: Option<PathBuf>, out_dir: Option<&Path>, default: &str) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    match out_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            Ok(dir.join(default))
        }
        None => Ok(PathBuf::from(default)),
    }
}

fn write_gantt(path: &Path) -> Result<()> {
    let report = data::gantt_report();
    let grid = GanttWriter::new()
        .render(&report)
        .context("Failed to lay out the Gantt chart")?;
    XlsxWriter::new()
        .save(&grid, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Gantt chart written: {}", path.display());
    println!(
        "  {} activities, {} milestones",
        report.activities.len(),
        report.milestone_count()
    );
    Ok(())
}

fn write_resources(path: &Path, lenient: bool) -> Result<()> {
    let report = data::resources_report();
    let writer = if lenient {
        ResourcesWriter::new().lenient()
    } else {
        ResourcesWriter::new()
    };
    let grid = writer
        .render(&report)
        .context("Failed to lay out the resources sheet")?;
    XlsxWriter::new()
        .save(&grid, path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Resources breakdown written: {}", path.display());
    for section in &report.sheet.sections {
        println!("  {}: {}", section.subtotal_label, section.subtotal);
    }
    println!("  {}: {}", report.sheet.total_label, report.sheet.total);
    Ok(())
}

fn print_timeline(format: TimelineFormat) -> Result<()> {
    let report = data::gantt_report();
    let layout = TimelineLayout::new(report.start).weeks(report.weeks);
    let rows = layout
        .layout(&report.activities)
        .context("Failed to lay out the timeline")?;
    info!(activities = rows.len(), weeks = report.weeks, "timeline computed");

    match format {
        TimelineFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).context("Failed to serialize timeline")?;
            println!("{json}");
        }
        TimelineFormat::Text => print!("{}", timeline_text(&rows, report.weeks)),
    }
    Ok(())
}

/// One line per activity: id, dates, duration and a week strip
fn timeline_text(rows: &[TimelineRow], weeks: u32) -> String {
    let mut out = String::new();
    for row in rows {
        let strip: String = (0..weeks)
            .map(|week| {
                if row.marker == Some(week) {
                    '◆'
                } else if row.bar.contains(&week) {
                    '█'
                } else {
                    '·'
                }
            })
            .collect();
        let indent = match row.kind {
            ActivityKind::Phase | ActivityKind::Milestone => "",
            ActivityKind::Task | ActivityKind::Subtask => "  ",
        };
        out.push_str(&format!(
            "{:<5} {} {} {:>7} {}{}{indent}{}\n",
            row.id,
            row.start.format("%d/%m/%y"),
            row.end.format("%d/%m/%y"),
            row.duration_label,
            strip,
            if row.clipped { "» " } else { "  " },
            row.label,
        ));
    }
    out
}
