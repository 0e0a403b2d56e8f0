mod cli;

use crate::cli::Cli;
use clap::Parser;
use eyre::{eyre, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::path::Path;
use vcp_core::copy::{CopyOptions, OverwritePolicy, OverwritePrompt};
use vcp_core::engine::{self, CopyRequest};
use vcp_core::errors::{CopyError, CopyResult};
use vcp_core::stats::CopyStats;
use vcp_core::walk::ProgressObserver;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    if args.version {
        println!("vcp {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let (Some(source), Some(destination)) = (args.source, args.destination) else {
        // Unreachable once clap has enforced the requirement.
        return Err(eyre!("source and destination are required"));
    };

    if !args.quiet {
        println!(
            "Copying from {} to {}",
            std::path::absolute(&source)?.display(),
            std::path::absolute(&destination)?.display()
        );
    }

    let request = CopyRequest {
        source,
        destination,
        options: CopyOptions {
            chunk_size: usize::try_from(args.buffer)?,
            overwrite: match args.overwrite {
                Some(true) => OverwritePolicy::Always,
                Some(false) => OverwritePolicy::Never,
                None => OverwritePolicy::Ask,
            },
            dry_run: args.dry_run,
        },
    };

    let progress = TransferProgress::new(args.quiet);
    let outcome = engine::execute(&request, &StdinPrompt, &progress);
    progress.clear();

    match outcome {
        Ok(stats) => {
            if !args.quiet {
                print_summary(&stats, args.dry_run);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1);
        }
    }
}

/// Answers the engine's overwrite questions from the controlling terminal.
/// A closed stdin reads as an empty answer, which declines.
struct StdinPrompt;

impl OverwritePrompt for StdinPrompt {
    fn confirm_overwrite(&self, destination: &Path) -> CopyResult<bool> {
        print!(
            "Destination file {} already exists. Overwrite? [y/N]: ",
            destination.display()
        );
        io::stdout()
            .flush()
            .map_err(|err| CopyError::io(err, None))?;
        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(|err| CopyError::io(err, None))?;
        let decision = input.trim().to_ascii_lowercase();
        Ok(decision == "y" || decision == "yes")
    }
}

/// Drives an indicatif bar from the walker's progress callbacks. Hidden in
/// quiet mode; single-file copies never call `begin`, so the bar stays blank.
struct TransferProgress {
    bar: ProgressBar,
}

impl TransferProgress {
    fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::no_length()
        };
        Self { bar }
    }

    fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for TransferProgress {
    fn begin(&self, total_entries: u64) {
        self.bar.set_length(total_entries);
        self.bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}").unwrap(),
        );
    }

    fn entry_done(&self, path: &Path) {
        if let Some(name) = path.file_name() {
            self.bar.set_message(name.to_string_lossy().into_owned());
        }
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn print_summary(stats: &CopyStats, dry_run: bool) {
    let Ok(elapsed) = stats.elapsed() else {
        return;
    };
    println!(
        "Copy{} complete: {} file(s), {} in {:.2?}",
        if dry_run { " (dry run)" } else { "" },
        stats.files_copied(),
        format_bytes(stats.bytes_copied()),
        elapsed
    );
    if let Ok(rate) = stats.throughput() {
        println!("Throughput: {}/s", format_bytes(rate as u64));
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0usize;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
