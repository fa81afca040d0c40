//! # Postage Quote
//!
//! Prices one order read as JSON and prints the quote as JSON.
//!
//! ## Usage
//! ```bash
//! # Order from a file
//! cargo run -p postage-core --bin quote -- order.json
//!
//! # Order from stdin, custom rules
//! cat order.json | cargo run -p postage-core --bin quote -- --rules postage.toml
//! ```
//!
//! ## Exit Codes
//! - `0` quote printed
//! - `1` bad arguments, unreadable input or invalid rules
//! - `2` the order cannot be delivered (message on stderr)

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use postage_core::{ConfigError, DeliveryError, Order, PostageCalculator, Quote, RuleTable};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum QuoteError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to read order: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid order JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

#[derive(Debug, Default)]
struct Args {
    order_path: Option<PathBuf>,
    rules_path: Option<PathBuf>,
    help: bool,
}

impl Args {
    fn parse(args: &[String]) -> Result<Self, QuoteError> {
        let mut parsed = Args::default();
        let mut i = 0;

        while i < args.len() {
            match args[i].as_str() {
                "--rules" | "-r" => {
                    let path = args
                        .get(i + 1)
                        .ok_or_else(|| QuoteError::Usage("--rules needs a path".to_string()))?;
                    parsed.rules_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--help" | "-h" => parsed.help = true,
                flag if flag.starts_with('-') => {
                    return Err(QuoteError::Usage(format!("Unknown option: {flag}")));
                }
                path => parsed.order_path = Some(PathBuf::from(path)),
            }
            i += 1;
        }

        Ok(parsed)
    }
}

fn print_usage() {
    println!("Postage Quote");
    println!();
    println!("Usage: quote [ORDER_JSON] [OPTIONS]");
    println!();
    println!("Reads the order from ORDER_JSON, or stdin when omitted.");
    println!();
    println!("Options:");
    println!("  -r, --rules <PATH>   Rule table TOML file (default: built-in tariff)");
    println!("  -h, --help           Show this help message");
}

fn read_order(path: Option<&PathBuf>) -> Result<Order, QuoteError> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&contents)?)
}

fn run(args: &Args) -> Result<Quote, QuoteError> {
    let rules = RuleTable::load(args.rules_path.as_deref())?;
    let calculator = PostageCalculator::new(rules);

    let order = read_order(args.order_path.as_ref())?;
    info!(
        items = order.items.len(),
        class = %order.delivery_class,
        country = order.destination.country(),
        "Pricing order"
    );

    Ok(order.quote(&calculator)?)
}

fn main() -> ExitCode {
    init_tracing();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match Args::parse(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return ExitCode::from(1);
        }
    };

    if args.help {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(&args).and_then(|quote| Ok(serde_json::to_string_pretty(&quote)?)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(QuoteError::Delivery(e)) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "Quote failed");
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,postage_core=debug,quote=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every calculation step
/// - Default: INFO, DEBUG for this crate
///
/// Logs go to stderr so stdout stays pure JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse(&argv(&["order.json", "--rules", "postage.toml"])).unwrap();
        assert_eq!(args.order_path, Some(PathBuf::from("order.json")));
        assert_eq!(args.rules_path, Some(PathBuf::from("postage.toml")));
        assert!(!args.help);

        let args = Args::parse(&argv(&[])).unwrap();
        assert!(args.order_path.is_none());
        assert!(args.rules_path.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(
            Args::parse(&argv(&["--rules"])),
            Err(QuoteError::Usage(_))
        ));
        assert!(matches!(
            Args::parse(&argv(&["--verbose"])),
            Err(QuoteError::Usage(_))
        ));
    }

    #[test]
    fn test_run_prices_order_file() {
        let dir = tempfile::tempdir().unwrap();
        let order_path = dir.path().join("order.json");
        fs::write(
            &order_path,
            r#"{
                "items": [{ "size": 31 }],
                "delivery_class": "first_class",
                "declared_total_pence": 2499,
                "destination": { "country": "UK" }
            }"#,
        )
        .unwrap();

        let args = Args {
            order_path: Some(order_path),
            rules_path: None,
            help: false,
        };
        let quote = run(&args).unwrap();
        assert_eq!(quote.total.pence(), 2788);
    }

    #[test]
    fn test_default_log_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        assert!(DEFAULT_LOG_FILTER.contains("postage_core=debug"));
    }

    #[test]
    fn test_run_rejects_missing_rules_file() {
        let dir = tempfile::tempdir().unwrap();
        let order_path = dir.path().join("order.json");
        fs::write(&order_path, r#"{ "items": [{ "size": 10 }] }"#).unwrap();

        let args = Args {
            order_path: Some(order_path),
            rules_path: Some(dir.path().join("typo.toml")),
            help: false,
        };
        assert!(matches!(
            run(&args),
            Err(QuoteError::Config(ConfigError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_run_reports_delivery_errors() {
        let dir = tempfile::tempdir().unwrap();
        let order_path = dir.path().join("order.json");
        fs::write(
            &order_path,
            r#"{ "items": [{ "size": 10 }], "declared_total_pence": 1000,
                 "destination": { "country": "France" } }"#,
        )
        .unwrap();

        let args = Args {
            order_path: Some(order_path),
            ..Args::default()
        };
        let err = run(&args).unwrap_err();
        assert!(matches!(err, QuoteError::Delivery(_)));
        assert_eq!(err.to_string(), "Sorry, we don't deliver to France yet.");
    }
}
