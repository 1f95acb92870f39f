//! Binary entrypoint for the coinage CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `render <amount> [--currency C] [--style S | --all]` - describe an amount of base units
//! - `parse <text...> [--currency C]` - read typed text back into base units
//! - `check [seed-file]` - validate seeds and summarise every loaded currency
//! - `export-builtin` - print the stock currency seeds as JSON
//!
//! See the library crate docs for module-level details: `coinage::`.
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::str::FromStr;

use coinage::config::Config;
use coinage::currency::{builtin, CurrencyRegistry, PredicateRegistry, Style};
use coinage::logutil::escape_log;

#[derive(Parser)]
#[command(name = "coinage")]
#[command(about = "Describe and parse amounts in multi-division currencies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Describe an amount given in base units
    Render {
        /// Amount in base units (may be negative)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Currency name; defaults to engine.default_currency
        #[arg(short = 'C', long)]
        currency: Option<String>,
        /// casual, wordy, long, short or short_decimal
        #[arg(short, long, conflicts_with = "all")]
        style: Option<String>,
        /// Print every style
        #[arg(short, long)]
        all: bool,
    },
    /// Read an amount typed by a user
    Parse {
        /// Text to read, e.g. `3s 6d`
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Currency name; defaults to engine.default_currency
        #[arg(short = 'C', long)]
        currency: Option<String>,
    },
    /// Validate currency seeds and list what loaded
    Check {
        /// Seed file to validate instead of engine.seed_file
        seed_file: Option<String>,
    },
    /// Print the stock currency seeds as JSON
    ExportBuiltin,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => None,
        _ => Some(Config::load_or_default(&cli.config)?),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Init => {
            Config::create_default(&cli.config)?;
            println!("Configuration file created at {}", cli.config);
        }
        Commands::Render {
            amount,
            currency,
            style,
            all,
        } => {
            let config = config.unwrap_or_default();
            let registry = build_registry(&config, None)?;
            let name = currency.unwrap_or_else(|| config.engine.default_currency.clone());
            let amount = Decimal::from_str(amount.trim())
                .map_err(|e| anyhow!("'{}' is not a number of base units: {}", amount, e))?;
            let styles = if all {
                Style::ALL.to_vec()
            } else {
                let style = match style {
                    Some(s) => Style::from_str(&s).map_err(|e| anyhow!(e))?,
                    None => config.engine.default_style,
                };
                vec![style]
            };
            for style in styles {
                let text = registry.render(&name, amount, style)?;
                if all {
                    println!("{:<13} {}", style, text);
                } else {
                    println!("{}", text);
                }
            }
        }
        Commands::Parse { text, currency } => {
            let config = config.unwrap_or_default();
            let registry = build_registry(&config, None)?;
            let name = currency.unwrap_or_else(|| config.engine.default_currency.clone());
            let text = text.join(" ");
            debug!("parsing \"{}\" as {}", escape_log(&text), name);
            let amount = registry.parse(&name, &text)?;
            println!("{}", amount.normalize());
        }
        Commands::Check { seed_file } => {
            let config = config.unwrap_or_default();
            let registry = build_registry(&config, seed_file.as_deref())?;
            for name in registry.names() {
                let Some(currency) = registry.get(&name) else {
                    continue;
                };
                let divisions: Vec<String> = currency
                    .divisions()
                    .iter()
                    .map(|d| format!("{}={}", d.name, d.rate))
                    .collect();
                println!("{}: {}", currency.name(), divisions.join(", "));
                for style in Style::ALL {
                    println!("  {:<13} {} pattern(s)", style, currency.patterns_for(style).count());
                }
            }
            println!("{} currencies OK", registry.len());
        }
        Commands::ExportBuiltin => {
            let seeds = builtin::all();
            println!("{}", serde_json::to_string_pretty(&seeds)?);
        }
    }

    Ok(())
}

/// Publish the stock currencies (when enabled) and any seed file.
fn build_registry(config: &Config, seed_override: Option<&str>) -> Result<CurrencyRegistry> {
    let registry = CurrencyRegistry::new();
    if config.engine.include_builtin {
        for currency in builtin::load_all().context("stock currencies failed validation")? {
            registry.publish(currency);
        }
    }
    let seed_file = match (seed_override, config.engine.seed_file.as_deref()) {
        (Some(path), _) => Some(path),
        (None, Some(path)) if std::path::Path::new(path).exists() => Some(path),
        (None, Some(path)) => {
            warn!("Seed file {} not found; using stock currencies only", path);
            None
        }
        (None, None) => None,
    };
    if let Some(path) = seed_file {
        registry
            .publish_seed_file(path, &PredicateRegistry::new())
            .with_context(|| format!("loading currency seeds from {}", path))?;
    }
    if registry.is_empty() {
        return Err(anyhow!("no currencies configured"));
    }
    Ok(registry)
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .as_ref()
        .and_then(|c| log::LevelFilter::from_str(&c.logging.level).ok())
        .unwrap_or(log::LevelFilter::Warn);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when someone is watching it
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
