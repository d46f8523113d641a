//! es2sql — the es2sql CLI
//!
//! Reads an Elasticsearch bool-query JSON document and prints the
//! equivalent SQL WHERE expression.
//!
//! # Usage
//!
//! ```bash
//! # Translate a query file
//! es2sql query.json
//!
//! # Read from stdin, apply rewrite rules
//! cat query.json | es2sql - --rules rules.json
//!
//! # Write the expression to a file
//! es2sql query.json --output query.sql
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use es2sql::prelude::*;

#[derive(Parser)]
#[command(name = "es2sql")]
#[command(version)]
#[command(about = "Translate ES bool-query documents into SQL WHERE expressions", long_about = None)]
#[command(after_help = "EXAMPLES:
    es2sql query.json
    es2sql query.json --rules rules.json --output query.sql
    es2sql explain query.json")]
struct Cli {
    /// Query document to translate ('-' for stdin)
    query: Option<PathBuf>,

    /// JSON file with per-field rewrite rules
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Write the SQL expression to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query document and print the classified tree
    Explain {
        /// Query document to classify ('-' for stdin)
        query: PathBuf,

        /// JSON file with per-field rewrite rules
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Explain { query, rules }) => explain(query, rules.as_deref()),
        None => match &cli.query {
            Some(query) => run(query, &cli),
            None => {
                println!("{}", "es2sql — ES bool-queries to SQL".cyan().bold());
                println!();
                println!("Usage: es2sql <QUERY_FILE> [OPTIONS]");
                println!();
                println!("Try: es2sql --help");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(query: &Path, cli: &Cli) -> Result<()> {
    let doc = load_query(query)?;
    let rules = load_rules(cli.rules.as_deref())?;

    if cli.verbose {
        let tree = es2sql::parser::parse(&doc, &rules)?;
        eprintln!("{}", "Classified tree:".dimmed());
        eprintln!("{:#?}", tree);
    }

    let sql = es2sql::translate(&doc, &rules)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &sql)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if cli.verbose {
                eprintln!("{} {}", "Wrote".green(), path.display());
            }
        }
        None => println!("{}", sql),
    }

    Ok(())
}

fn explain(query: &Path, rules: Option<&Path>) -> Result<()> {
    let doc = load_query(query)?;
    let rules = load_rules(rules)?;
    let tree = es2sql::parser::parse(&doc, &rules)?;

    println!("{}", "Classified tree:".green().bold());
    println!("{:#?}", tree);
    Ok(())
}

fn load_query(path: &Path) -> Result<serde_json::Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read query from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).context("query document is not valid JSON")
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let Some(path) = path else {
        return Ok(RuleSet::new());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid rules file", path.display()))
}
