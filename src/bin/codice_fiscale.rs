//! Fiscal Code CLI
//!
//! Decodes and validates Italian fiscal codes from the command line.

use clap::{Parser, Subcommand};
use codice_fiscale::{CenturyPolicy, CodiceFiscaleConfig, PlaceKind, PlaceResolver};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codice-fiscale")]
#[command(about = "Decode and validate Italian fiscal codes")]
struct Cli {
    /// Path to a config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one or more codes
    Parse {
        /// Codes to decode
        #[arg(required = true)]
        codes: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Two-digit years below this are 20xx (overrides config)
        #[arg(long)]
        century_pivot: Option<u8>,
    },

    /// Validate codes, printing the configured message for failures
    Check {
        /// Codes to validate
        #[arg(required = true)]
        codes: Vec<String>,
        /// Attribute name used in messages
        #[arg(short, long, default_value = "codice fiscale")]
        attribute: String,
    },

    /// Look up a place code
    Place {
        /// Letter followed by three digits (e.g. F205)
        code: String,
    },

    /// Show or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration
    Init {
        #[arg(short, long, default_value = "codicefiscale.toml")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

/// Returns `Ok(false)` when any input code was rejected
fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = CodiceFiscaleConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse {
            codes,
            json,
            century_pivot,
        } => {
            let parser = config.build_parser()?;
            let policy = century_pivot
                .map(CenturyPolicy::Pivot)
                .unwrap_or_else(|| config.century.policy());
            let mut all_valid = true;

            for raw in &codes {
                match parser.parse(raw) {
                    Ok(decoded) => {
                        let birth_date = decoded.birth_date(policy);
                        if json {
                            let mut value = serde_json::to_value(&decoded)?;
                            value["birth_date"] = serde_json::json!(birth_date);
                            println!("{}", serde_json::to_string_pretty(&value)?);
                        } else {
                            println!("✅ {}", decoded.code());
                            println!("   sex:        {}", decoded.sex());
                            println!(
                                "   birth:      {:02}/{:02}/{:02}",
                                decoded.day(),
                                decoded.month(),
                                decoded.year()
                            );
                            if let Some(date) = birth_date {
                                println!("   birth date: {} ({:?})", date, policy);
                            }
                            println!(
                                "   place:      {} {}",
                                decoded.place_code(),
                                decoded.place_name().unwrap_or("(unknown)")
                            );
                            if decoded.omocodia_level() > 0 {
                                println!("   omocodia:   {} substitution(s)", decoded.omocodia_level());
                            }
                        }
                    }
                    Err(e) => {
                        all_valid = false;
                        if json {
                            let value = serde_json::json!({
                                "code": raw,
                                "error": e.kind(),
                                "detail": e.to_string(),
                            });
                            println!("{}", serde_json::to_string_pretty(&value)?);
                        } else {
                            println!("❌ {} - {} ({})", raw, e.kind(), e);
                        }
                    }
                }
            }
            Ok(all_valid)
        }

        Commands::Check { codes, attribute } => {
            let rule = config.build_rule()?;
            let mut all_valid = true;

            for raw in &codes {
                match rule.validate(&attribute, Some(raw)) {
                    Ok(_) => println!("✅ {} - valid", raw),
                    Err(e) => {
                        all_valid = false;
                        println!("❌ {} - {}: {}", raw, e.kind, e.message);
                    }
                }
            }
            Ok(all_valid)
        }

        Commands::Place { code } => {
            let resolver = config.build_resolver()?;
            let code = code.to_ascii_uppercase();
            let kind = match PlaceKind::of(&code) {
                PlaceKind::Municipality => "municipality",
                PlaceKind::Foreign => "foreign country",
            };
            match resolver.resolve(&code) {
                Some(name) => {
                    println!("{} ({}): {}", code, kind, name);
                    Ok(true)
                }
                None => {
                    println!("{} ({}): not found", code, kind);
                    Ok(false)
                }
            }
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    println!("{}", toml::to_string_pretty(&config)?);
                }
                ConfigAction::Init { output } => {
                    CodiceFiscaleConfig::default().save(&output)?;
                    println!("✅ Configuration written to {}", output);
                }
            }
            Ok(true)
        }
    }
}
