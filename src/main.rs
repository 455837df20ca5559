/*!
 * Command-line interface for dumpmd
 */

use std::io;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use dumpmd::config::{Args, Config};
use dumpmd::error::Result;
use dumpmd::provider::{ArgPathProvider, PathProvider, PromptPathProvider};
use dumpmd::report::{ReportFormat, Reporter, ScanReport};
use dumpmd::scanner::Scanner;
use dumpmd::tree::build_tree;
use dumpmd::writer::{DocumentSink, FileSink, MarkdownWriter};

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "dumpmd", &mut io::stdout());
        return;
    }

    setup_logging(args.quiet, args.verbose);
    log::debug!("CLI args parsed: {:?}", args);

    if let Err(e) = run(args) {
        log::debug!("Run failed: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run(args: Args) -> Result<()> {
    let provider: Box<dyn PathProvider> = match args.directory_path {
        Some(_) => Box::new(ArgPathProvider::new(args.directory_path.clone())),
        None => Box::new(PromptPathProvider::default()),
    };

    let Some(target_dir) = provider.provide()? else {
        println!("Operation canceled.");
        return Ok(());
    };

    let quiet = args.quiet;
    let show_report = !args.no_report && !quiet;

    let config = Config::from_args(args, target_dir);
    config.validate()?;
    log::info!("Processing {}", config.target_dir.display());

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress
    };
    progress.set_prefix("📊 Scanning");
    progress.set_message(format!(
        "📂 Scanning directory: {}",
        config.target_dir.display()
    ));

    let start_time = Instant::now();

    let scanner = Scanner::new(&config);
    let flat = scanner.scan()?;
    let tree = build_tree(&flat);

    progress.set_length(tree.file_count() as u64);
    progress.set_prefix("📊 Processing");

    let writer = MarkdownWriter::new(&config, Arc::new(progress.clone()))?;
    let document = writer.document(&tree, &config.target_dir);
    let output_path = FileSink::current_dir().write(&config.output_file, &document)?;

    let total_duration = start_time.elapsed();
    progress.finish_and_clear();

    let scanner_stats = scanner.get_statistics();
    let writer_stats = writer.get_statistics();

    if show_report {
        let scan_report = ScanReport {
            output_file: output_path.display().to_string(),
            duration: total_duration,
            directories: scanner_stats.directories_visited,
            directories_ignored: scanner_stats.directories_ignored,
            files_processed: writer_stats.files_read,
            files_skipped: writer_stats.files_skipped,
            total_lines: writer_stats.total_lines,
            total_chars: writer_stats.total_chars,
            file_details: writer_stats.file_details,
            failures: writer_stats.failures,
        };
        Reporter::new(ReportFormat::ConsoleTable).print_report(&scan_report);
    }

    if !quiet {
        println!("File generated: {}", output_path.display());
    }

    Ok(())
}
