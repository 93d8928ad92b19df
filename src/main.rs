//! Command-line interface for xsdtags

#[cfg(feature = "cli")]
use clap::{ArgGroup, Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing::{info, Level};

#[cfg(feature = "cli")]
use xsdtags::loaders::Loader;
#[cfg(feature = "cli")]
use xsdtags::{ValidationResult, Validator};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdtags")]
#[command(author, version, about = "Compare XSD cardinality with a SQL path mapping", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare a schema with a SQL mapping script
    Validate {
        /// Path to the XSD schema file
        #[arg(short, long, value_name = "SCHEMA")]
        xsd: PathBuf,

        /// Path to the SQL mapping file
        #[arg(short, long, value_name = "SQL")]
        sql: PathBuf,

        /// Output as JSON ({"valid": .., "differences": [..]})
        #[arg(short, long)]
        json: bool,

        /// Pretty print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the path mapping extracted from one input
    #[command(group(ArgGroup::new("input").required(true).args(["xsd", "sql"])))]
    Paths {
        /// Extract leaf paths from an XSD schema
        #[arg(long, value_name = "SCHEMA")]
        xsd: Option<PathBuf>,

        /// Extract paths from a SQL mapping script
        #[arg(long, value_name = "SQL")]
        sql: Option<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate {
            xsd,
            sql,
            json,
            pretty,
        } => cmd_validate(xsd, sql, json, pretty),
        Commands::Paths { xsd, sql, json } => cmd_paths(xsd, sql, json),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Returns whether the mapping agrees with the schema.
#[cfg(feature = "cli")]
fn cmd_validate(
    xsd: PathBuf,
    sql: PathBuf,
    json_output: bool,
    pretty: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    info!(xsd = %xsd.display(), sql = %sql.display(), "validation started");
    let result = Validator::new().validate_files(&xsd, &sql)?;
    info!("validation finished");

    if json_output {
        let json_str = if pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        println!("{}", json_str);
    } else {
        print_result(&result);
    }

    Ok(result.is_valid())
}

#[cfg(feature = "cli")]
fn print_result(result: &ValidationResult) {
    if result.is_valid() {
        println!("✓ SQL mapping matches the schema");
        return;
    }

    println!("✗ {} difference(s) found", result.differences().len());
    println!();
    for difference in result.differences() {
        println!("  - {}", difference);
    }
}

#[cfg(feature = "cli")]
fn cmd_paths(
    xsd: Option<PathBuf>,
    sql: Option<PathBuf>,
    json_output: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let validator = Validator::new();
    let loader = Loader::new().with_limits(validator.limits().clone());

    let entries: Vec<(String, i64)>;
    let json_str;
    if let Some(path) = xsd {
        let paths = validator.schema_paths(&loader.load(&path)?)?;
        json_str = serde_json::to_string_pretty(&paths)?;
        entries = paths.iter().map(|(p, c)| (p.to_string(), c.value())).collect();
    } else if let Some(path) = sql {
        let paths = validator.sql_paths(&loader.load(&path)?);
        json_str = serde_json::to_string_pretty(&paths)?;
        entries = paths.iter().map(|(p, v)| (p.to_string(), *v)).collect();
    } else {
        return Err("either --xsd or --sql is required".into());
    }

    if json_output {
        println!("{}", json_str);
    } else {
        for (path, value) in entries {
            println!("{}\t{}", value, path);
        }
    }

    Ok(true)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
