//! Dinary fee engine CLI
//!
//! Command-line interface for computing commission fee breakdowns for a
//! batch of transactions against an admin rule export.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --rules rules.csv requests.csv > breakdowns.csv
//! cargo run -- --rules rules.csv --strategy sync requests.csv > breakdowns.csv
//! cargo run -- --rules rules.csv --strategy async --batch-size 2000 --max-concurrent 8 requests.csv > breakdowns.csv
//! cargo run -- --rules rules.csv --fail-open --report requests.csv > breakdowns.csv
//! ```
//!
//! The program loads the rule snapshot, computes a fee breakdown for every
//! request row using the selected processing strategy, and writes the
//! breakdowns to stdout in input order. With --report, an aggregated
//! revenue summary goes to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Synchronous CSV parsing with single-threaded processing
//! - **async**: Asynchronous batch processing with multi-threaded parallelism (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, malformed rules file, etc.)

use dinary_fees::cli;
use dinary_fees::io::rules_reader::load_snapshot;
use dinary_fees::strategy;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // The rules file is configuration: a bad export aborts the run rather
    // than silently mispricing rows
    let snapshot = match load_snapshot(&args.rules_file, args.referral_rules_file.as_deref()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Create the appropriate processing strategy based on CLI arguments
    let policy = args.rule_policy();
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, policy, config)
    };

    // Process requests using the selected strategy
    // Breakdowns go to stdout
    let mut output = std::io::stdout();
    match strategy.process(snapshot, &args.input_file, &mut output) {
        Ok(report) => {
            if args.report {
                eprint!("{}", report);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
