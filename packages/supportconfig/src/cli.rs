//! Command-line interface for the splitter.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::validate_output_dir;
use crate::error::Result;
use crate::splitting::{
    ExcludePrefixes, FileSplitter, Flatten, RemapChain, SplitConfig, SplitSummary, UniqueNames,
};

/// Supportconfig splitter - Recover collected files from a supportconfig report.
#[derive(Parser)]
#[command(name = "supportconfig-split")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a report into its configuration and log files.
    Split {
        /// Report file to split ("-" reads standard input)
        report: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write every file directly into the output directory
        #[arg(long)]
        flatten: bool,

        /// Append .1, .2, ... instead of overwriting repeated paths
        #[arg(long)]
        unique: bool,

        /// Skip files at or below this source path (repeatable)
        #[arg(long, value_name = "PREFIX")]
        exclude: Vec<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options for the split command.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    pub flatten: bool,
    pub unique: bool,
    pub exclude: Vec<String>,
    pub json: bool,
}

impl SplitOptions {
    /// Build the remapper chain for these options, if any applies.
    ///
    /// Order: exclusion, then flattening, then collision avoidance.
    #[must_use]
    pub fn remapper(&self) -> Option<RemapChain> {
        let mut chain = RemapChain::new();
        if !self.exclude.is_empty() {
            chain = chain.with(ExcludePrefixes::new(self.exclude.iter().cloned()));
        }
        if self.flatten {
            chain = chain.with(Flatten);
        }
        if self.unique {
            chain = chain.with(UniqueNames::new());
        }
        (!chain.is_empty()).then_some(chain)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            report,
            output,
            flatten,
            unique,
            exclude,
            json,
        } => {
            let options = SplitOptions {
                flatten,
                unique,
                exclude,
                json,
            };
            split_command(&report, output.as_deref(), &options)
        }
    }
}

/// Open the report, or standard input for `-`.
fn open_report(report: &Path) -> Result<Box<dyn BufRead>> {
    if report == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    Ok(Box::new(BufReader::new(File::open(report)?)))
}

/// Execute the split command.
fn split_command(report: &Path, output: Option<&Path>, options: &SplitOptions) -> Result<()> {
    let output_dir = output.unwrap_or(Path::new("."));
    validate_output_dir(output_dir)?;

    let source = open_report(report)?;

    let mut config = SplitConfig::new(output_dir);
    if let Some(chain) = options.remapper() {
        config = config.with_remapper(chain);
    }
    let splitter = FileSplitter::new(config);

    if !options.json {
        println!(
            "{} {} into {}",
            style("Splitting").bold(),
            style(report.display()).cyan(),
            style(output_dir.display()).green()
        );
    }

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Reading report...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match splitter.split(source) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &SplitSummary) {
    println!("  Sections: {}", summary.sections);
    println!("  Files: {}", style(summary.file_count()).green());
    if !summary.skipped.is_empty() {
        println!("  Skipped: {}", style(summary.skipped.len()).yellow().bold());
    }
}
