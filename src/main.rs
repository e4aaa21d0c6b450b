//! bundleburst - Sunburst layout and hover model for bundle composition.
//!
//! Usage:
//!   bundleburst summary <FILE>        Print the module tree with shares
//!   bundleburst export <FILE>         Export the sunburst layout to JSON
//!   bundleburst hover <FILE> <PATH>   Show what hovering a module displays
//!   bundleburst --help                Show help

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use bundleburst_core::{BuildConfig, ModuleTree, NodeId, PathTreeBuilder};
use bundleburst_hover::{HoverController, InteractionConfig, percentage_label, size_label};
use bundleburst_ingest::{parse_rows, read_stats, select_build};
use bundleburst_layout::{ArcGeometry, PartitionLayout, Palette, Sector, Segment};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "BUNDLEBURST_LOG";

#[derive(Parser)]
#[command(
    name = "bundleburst",
    version,
    about = "Sunburst layout and hover model for bundle composition",
    long_about = "bundleburst turns bundle build stats into a nested module tree, \
                  lays it out as a sunburst and answers what a hover on any \
                  segment would show."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the module tree with share and size per node
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Maximum depth to display
        #[arg(short, long, default_value = "3")]
        depth: u32,

        /// Show all entries (no depth limit on display)
        #[arg(short, long)]
        all: bool,

        /// Number of top entries to show per directory
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Export the sunburst layout to JSON
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Chart radius in pixels
        #[arg(short, long, default_value = "300")]
        radius: f64,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the display state for hovering a module or directory
    Hover {
        #[command(flatten)]
        input: InputArgs,

        /// Module path, e.g. `./client/App.jsx` or `client/components/`
        path: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Stats JSON file, or `path,size` text with --rows
    file: PathBuf,

    /// Build to use, 1-based (defaults to the latest)
    #[arg(short, long)]
    build: Option<usize>,

    /// Read two-column `path,size` text instead of stats JSON
    #[arg(long)]
    rows: bool,

    /// Keep the leading `./` of module paths as a `.` directory
    #[arg(long)]
    keep_dot: bool,
}

impl InputArgs {
    /// Tree building config for this input. Webpack names start with `./`,
    /// which the CLI strips unless asked not to.
    fn build_config(&self) -> BuildConfig {
        BuildConfig {
            strip_prefix: (!self.keep_dot).then(|| "./".into()),
            ..BuildConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Command::Summary {
            input,
            depth,
            all,
            top,
            format,
        } => {
            run_summary(&input, if all { None } else { Some(depth) }, top, format)?;
        }
        Command::Export {
            input,
            radius,
            output,
        } => {
            run_export(&input, radius, output)?;
        }
        Command::Hover {
            input,
            path,
            format,
        } => {
            run_hover(&input, &path, format)?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `BUNDLEBURST_LOG` (default `warn`).
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to install logger")
}

/// Read the input file and build the module tree.
fn load_tree(input: &InputArgs) -> Result<ModuleTree> {
    let records = if input.rows {
        let text = fs::read_to_string(&input.file)
            .with_context(|| format!("Failed to read {}", input.file.display()))?;
        parse_rows(&text)
    } else {
        let builds = read_stats(&input.file).context("Failed to load stats")?;
        let index = input.build.unwrap_or(builds.len());
        let build = select_build(&builds, index).context("Invalid build")?;
        if let Some(built_at) = build.built_at() {
            info!(build = index, %built_at, "selected build");
        }
        build.records()
    };

    let tree = PathTreeBuilder::with_config(input.build_config()).build(records);
    if tree.has_warnings() {
        warn!(skipped = tree.warnings.len(), "skipped malformed records");
    }
    Ok(tree)
}

#[derive(Serialize)]
struct Summary<'a> {
    total_size: f64,
    total_size_label: String,
    modules: u64,
    directories: u64,
    max_depth: u32,
    largest_module: Option<&'a str>,
    skipped: usize,
    top_level: Vec<SummaryEntry<'a>>,
}

#[derive(Serialize)]
struct SummaryEntry<'a> {
    name: &'a str,
    value: f64,
    percentage: String,
    size: String,
}

/// Print the tree with percentage and size labels.
fn run_summary(
    input: &InputArgs,
    max_depth: Option<u32>,
    top_n: usize,
    format: OutputFormat,
) -> Result<()> {
    let tree = load_tree(input)?;
    let layout = PartitionLayout::from_tree(&tree);

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(
                " {} - {}",
                input.file.display(),
                size_label(layout.total_value())
            );
            println!(
                " {} modules, {} directories, depth {}",
                tree.stats.total_modules, tree.stats.total_dirs, tree.stats.max_depth
            );
            if let Some((path, size)) = &tree.stats.largest_module {
                println!(" Largest: {} ({})", path, size_label(*size));
            }
            println!("{}", "─".repeat(60));
            println!();

            print_segment(
                &layout,
                layout.root(),
                0,
                max_depth.unwrap_or(u32::MAX),
                top_n,
            );

            if tree.has_warnings() {
                println!();
                println!("{} record(s) skipped", tree.warnings.len());
            }
        }
        OutputFormat::Json => {
            let total = layout.total_value();
            let summary = Summary {
                total_size: total,
                total_size_label: size_label(total),
                modules: tree.stats.total_modules,
                directories: tree.stats.total_dirs,
                max_depth: tree.stats.max_depth,
                largest_module: tree
                    .stats
                    .largest_module
                    .as_ref()
                    .map(|(path, _)| path.as_str()),
                skipped: tree.warnings.len(),
                top_level: layout
                    .children(NodeId::ROOT)
                    .map(|segment| SummaryEntry {
                        name: segment.name.as_str(),
                        value: segment.value,
                        percentage: percentage_label(segment.value, total),
                        size: size_label(segment.value),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Print a segment and its children, largest first.
fn print_segment(
    layout: &PartitionLayout,
    segment: &Segment,
    depth: u32,
    max_depth: u32,
    top_n: usize,
) {
    let indent = "  ".repeat(depth as usize);
    let dir_marker = if segment.has_children() { "/" } else { "" };
    let ratio = if layout.total_value() > 0.0 {
        segment.value / layout.total_value()
    } else {
        0.0
    };

    println!(
        "{}{}{:<40} {:>12} {:>7} {}",
        indent,
        if segment.has_children() { "▼ " } else { "  " },
        truncate(&format!("{}{}", segment.name, dir_marker), 40),
        size_label(segment.value),
        percentage_label(segment.value, layout.total_value()),
        make_bar(ratio, 10)
    );

    if segment.has_children() && depth < max_depth {
        for child in layout.children(segment.id).take(top_n) {
            print_segment(layout, child, depth + 1, max_depth, top_n);
        }

        let remaining = segment.children.len().saturating_sub(top_n);
        if remaining > 0 {
            let indent = "  ".repeat((depth + 1) as usize);
            println!("{}  ... and {} more", indent, remaining);
        }
    }
}

#[derive(Serialize)]
struct ExportedSegment<'a> {
    #[serde(flatten)]
    segment: &'a Segment,
    visible: bool,
    color: Option<&'a str>,
    sector: Sector,
}

#[derive(Serialize)]
struct Export<'a> {
    total_value: f64,
    height: u32,
    radius: f64,
    segments: Vec<ExportedSegment<'a>>,
}

/// Export the layout with colours and pixel sectors.
fn run_export(input: &InputArgs, radius: f64, output: Option<PathBuf>) -> Result<()> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(eyre!("Radius must be a positive number, got {radius}"));
    }

    let tree = load_tree(input)?;
    let layout = PartitionLayout::from_tree(&tree);
    let geometry = ArcGeometry::for_layout(&layout, radius);
    let palette = Palette::default();
    let colors: HashMap<NodeId, &str> = palette
        .assign(&layout)
        .map(|assigned| (assigned.id, assigned.color))
        .collect();

    let min_width = layout.config().min_angular_width;
    let export = Export {
        total_value: layout.total_value(),
        height: layout.height(),
        radius,
        segments: layout
            .iter()
            .map(|segment| ExportedSegment {
                segment,
                visible: segment.is_visible(min_width),
                color: colors.get(&segment.id).copied(),
                sector: geometry.sector(segment),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&export)?;

    match output {
        Some(output_path) => {
            fs::write(&output_path, json)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

/// Show what hovering a path displays.
fn run_hover(input: &InputArgs, path: &str, format: OutputFormat) -> Result<()> {
    let tree = load_tree(input)?;
    let layout = PartitionLayout::from_tree(&tree);
    let segment = find_segment(&layout, &tree.config, path)
        .ok_or_else(|| eyre!("No module at {path}"))?;

    let mut controller = HoverController::new(InteractionConfig::default());
    let state = controller
        .on_hover(&layout, segment.id)
        .ok_or_else(|| eyre!("Nothing to hover at {path}"))?;

    match format {
        OutputFormat::Text => {
            println!();
            println!(" {}", state.path_string.as_deref().unwrap_or_default());
            println!(" {}", state.percentage_caption());
            println!(" {}", state.size_caption());
            println!(" {}", state.breadcrumbs.label());
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(state)?);
        }
    }

    Ok(())
}

/// Find a segment by module path, normalized the same way the tree was built.
/// Directories may carry a trailing slash.
fn find_segment<'a>(
    layout: &'a PartitionLayout,
    config: &BuildConfig,
    path: &str,
) -> Option<&'a Segment> {
    config
        .normalize_path(path)
        .split('/')
        .filter(|name| !name.is_empty())
        .try_fold(layout.root(), |current, name| {
            layout.children(current.id).find(|child| child.name == name)
        })
}

/// Create a simple ASCII bar.
fn make_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}
