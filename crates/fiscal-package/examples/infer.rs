//! Example: infer the schema of a tabular source and list candidate concepts.
//!
//! Usage:
//!   cargo run --example infer -- <path-or-url>
//!
//! Example:
//!   cargo run --example infer -- data/budget-2024.csv

use std::env;

use fiscal_package::{DataSource, FiscalConfig, FiscalPackager};

#[tokio::main]
async fn main() -> fiscal_package::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example infer -- <path-or-url>");
        std::process::exit(1);
    }

    let packager = FiscalPackager::with_config(FiscalConfig::from_env()?)?;
    let inferred = packager.infer(&DataSource::from_location(&args[1])).await?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Resource: {}", inferred.source.name);
    println!("{}", separator);
    println!("  Location: {}", inferred.source.location);
    println!("  Format: {}", inferred.source.format);
    println!("  Records: {}", inferred.source.record_count);
    println!("  Hash: {}", inferred.source.hash);
    println!();

    let resolver = packager.resolver();
    println!("## Columns ({})", inferred.columns.len());
    for column in &inferred.columns {
        let types: Vec<&str> = column.candidate_types.iter().map(|t| t.id()).collect();
        let concepts: Vec<&str> = resolver
            .compatible_concepts(&column.candidate_types)
            .into_iter()
            .filter(|c| !c.is_unselected())
            .map(|c| c.name.as_str())
            .collect();
        println!(
            "  {:20} {:10} [{}]",
            column.name,
            column.inferred_type.map(|t| t.id()).unwrap_or("-"),
            types.join(", ")
        );
        println!("                       concepts: {}", concepts.join(", "));
    }

    Ok(())
}
