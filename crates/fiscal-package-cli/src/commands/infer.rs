//! Infer command - sample a source and print its inferred schema.

use std::path::PathBuf;

use colored::Colorize;
use fiscal_package::DataSource;
use tracing::info;

use super::CommandResult;

pub async fn run(
    source: String,
    sample_limit: Option<usize>,
    raw_output: Option<PathBuf>,
    schema_output: Option<PathBuf>,
    json_output: bool,
) -> CommandResult {
    let packager = super::packager(|config| {
        if let Some(limit) = sample_limit {
            config.parser.sample_limit = Some(limit);
        }
    })?;

    let source = DataSource::from_location(&source);
    let inferred = packager.infer(&source).await?;

    if let Some(path) = &raw_output {
        std::fs::write(path, &inferred.raw)?;
        info!(path = %path.display(), "wrote canonical data");
    }
    if let Some(path) = &schema_output {
        std::fs::write(path, serde_json::to_string_pretty(&inferred.schema)?)?;
        info!(path = %path.display(), "wrote schema descriptor");
    }

    if json_output {
        let resolver = packager.resolver();
        let columns: Vec<_> = inferred
            .columns
            .iter()
            .map(|column| {
                let concepts: Vec<&str> = resolver
                    .compatible_concepts(&column.candidate_types)
                    .into_iter()
                    .map(|c| c.id.as_str())
                    .collect();
                serde_json::json!({
                    "name": column.name,
                    "position": column.position,
                    "candidate_types": column.candidate_types,
                    "inferred_type": column.inferred_type,
                    "concepts": concepts,
                })
            })
            .collect();
        let output = serde_json::json!({
            "source": inferred.source,
            "headers": inferred.headers,
            "columns": columns,
            "schema": inferred.schema,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Resource".cyan().bold(),
        inferred.source.name.white().bold()
    );
    println!("  Location: {}", inferred.source.location);
    println!(
        "  Format: {}  Records: {}  Size: {} bytes",
        inferred.source.format, inferred.source.record_count, inferred.source.size_bytes
    );
    if inferred.source.truncated {
        println!("  {}", "Source truncated at the read limit".yellow());
    }
    println!();

    println!("{}", "Columns:".yellow().bold());
    for column in &inferred.columns {
        let inferred_type = column
            .inferred_type
            .map(|t| t.id())
            .unwrap_or("-");
        let candidates: Vec<&str> = column.candidate_types.iter().map(|t| t.id()).collect();
        println!(
            "  {:24} {:10} {}",
            column.name,
            inferred_type.green(),
            candidates.join(", ").dimmed()
        );
    }

    Ok(())
}
