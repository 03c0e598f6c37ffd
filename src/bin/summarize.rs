//! Summarize solver flop exports by hand category.
//!
//! Usage:
//!   cargo run --release --bin summarize -- [OPTIONS] <EXPORT.json>...
//!
//! Options:
//!   --board <CARDS>      Flop, e.g. QsJh2h (default: each file's stem)
//!   --node <PATH>        Action path into the tree, e.g. "CHECK/BET 6.0"
//!   --config <FILE>      SummaryConfig JSON file (optional)
//!   --skip-invalid       Skip malformed holdings instead of failing
//!   --parallel           Classify rows on the thread pool
//!   --threads <N>        Number of threads (default: auto)
//!   --output <FILE>      Write the report(s) as JSON
//!   --no-groups          Leave out the coarse group table
//!
//! Set RUST_LOG=debug for per-file details.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use flop_summary::strategy::SolverNode;
use flop_summary::summary::{aggregate_with, RowPolicy, SummaryConfig, SummaryReport};
use flop_summary::{Board, Error};

struct Args {
    files: Vec<PathBuf>,
    board: Option<String>,
    node: Option<String>,
    config_file: Option<String>,
    skip_invalid: bool,
    parallel: bool,
    threads: Option<usize>,
    output: Option<String>,
    no_groups: bool,
}

fn parse_args() -> Result<Option<Args>, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        files: Vec::new(),
        board: None,
        node: None,
        config_file: None,
        skip_invalid: false,
        parallel: false,
        threads: None,
        output: None,
        no_groups: false,
    };

    let mut i = 1;
    while i < args.len() {
        let value = |i: usize| {
            args.get(i + 1)
                .cloned()
                .ok_or_else(|| format!("{} needs a value", args[i]))
        };
        match args[i].as_str() {
            "--board" | "-b" => {
                parsed.board = Some(value(i)?);
                i += 1;
            }
            "--node" | "-n" => {
                parsed.node = Some(value(i)?);
                i += 1;
            }
            "--config" | "-c" => {
                parsed.config_file = Some(value(i)?);
                i += 1;
            }
            "--threads" | "-t" => {
                let raw = value(i)?;
                parsed.threads = Some(
                    raw.parse()
                        .map_err(|_| format!("invalid thread count: {}", raw))?,
                );
                i += 1;
            }
            "--output" | "-o" => {
                parsed.output = Some(value(i)?);
                i += 1;
            }
            "--skip-invalid" => parsed.skip_invalid = true,
            "--parallel" | "-p" => parsed.parallel = true,
            "--no-groups" => parsed.no_groups = true,
            "--help" | "-h" => return Ok(None),
            flag if flag.starts_with('-') => return Err(format!("Unknown argument: {}", flag)),
            file => parsed.files.push(PathBuf::from(file)),
        }
        i += 1;
    }

    if parsed.files.is_empty() {
        return Err("no export files given".to_string());
    }
    Ok(Some(parsed))
}

fn print_help() {
    println!("Summarize solver flop exports by hand category");
    println!();
    println!("Usage: summarize [OPTIONS] <EXPORT.json>...");
    println!();
    println!("Options:");
    println!("  -b, --board <CARDS>   Flop, e.g. QsJh2h (default: each file's stem)");
    println!("  -n, --node <PATH>     Action path into the tree, e.g. \"CHECK/BET 6.0\"");
    println!("  -c, --config <FILE>   SummaryConfig JSON file");
    println!("      --skip-invalid    Skip malformed holdings instead of failing");
    println!("  -p, --parallel        Classify rows on the thread pool");
    println!("  -t, --threads <N>     Number of threads (default: auto)");
    println!("  -o, --output <FILE>   Write the report(s) as JSON");
    println!("      --no-groups       Leave out the coarse group table");
    println!("  -h, --help            Print this help");
}

fn build_config(args: &Args) -> Result<SummaryConfig, Error> {
    let mut config = match &args.config_file {
        Some(path) => {
            log::info!("loading configuration from {}", path);
            SummaryConfig::from_json_file(path)?
        }
        None => SummaryConfig::default(),
    };

    if args.skip_invalid {
        config = config.with_row_policy(RowPolicy::Skip);
    }
    if args.parallel {
        config = config.with_parallel(true);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(node) = &args.node {
        config = config.with_action_path(node.split('/'));
    }
    if args.no_groups {
        config = config.with_groups(false);
    }

    config.validate()?;
    Ok(config)
}

/// The board a file was solved for: `--board` if given, else the file stem.
fn board_for(path: &Path, board: Option<&Board>) -> Result<Board, Error> {
    match board {
        Some(b) => Ok(*b),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default()
            .parse(),
    }
}

fn summarize_file(
    path: &Path,
    board: Option<&Board>,
    config: &SummaryConfig,
) -> Result<SummaryReport, Error> {
    let board = board_for(path, board)?;
    let root = SolverNode::from_json_file(path)?;
    let node = root.child(config.action_path.as_slice())?;
    let table = node.to_table()?;
    let summary = aggregate_with(&table, &board, config)?;

    Ok(SummaryReport::new(&board, &table, &summary)
        .with_node(node)
        .with_groups(config.include_groups))
}

fn run(args: Args) -> Result<bool, Error> {
    let config = build_config(&args)?;

    if let Some(threads) = config.num_threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            log::warn!("could not size thread pool: {}", e);
        }
    }

    let board = args.board.as_deref().map(str::parse::<Board>).transpose()?;

    let start = Instant::now();
    let progress = if args.files.len() > 1 {
        let bar = ProgressBar::new(args.files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} exports [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<(&PathBuf, Result<SummaryReport, Error>)> = args
        .files
        .par_iter()
        .map(|path| {
            let result = summarize_file(path, board.as_ref(), &config);
            progress.inc(1);
            (path, result)
        })
        .collect();
    progress.finish_and_clear();

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(report) => {
                report.print_table();
                println!();
                reports.push(report);
            }
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    log::info!(
        "summarized {}/{} exports in {:.2}s",
        reports.len(),
        args.files.len(),
        start.elapsed().as_secs_f64()
    );

    if let Some(path) = &args.output {
        match reports.as_slice() {
            [single] => single.save_json(path)?,
            _ => {
                fs::write(path, serde_json::to_string_pretty(&reports)?)?;
                log::info!("saved {} reports to {}", reports.len(), path);
            }
        }
    }

    Ok(failures == 0)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_help();
            process::exit(2);
        }
    };

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    }
}
