//! Validate command - run a source through the validation service.

use std::path::PathBuf;

use colored::Colorize;
use fiscal_package::validation::IssueLevel;
use fiscal_package::{DataSource, TableSchema};

use super::CommandResult;

pub async fn run(
    source: String,
    endpoint: Option<String>,
    schema: Option<PathBuf>,
    no_schema: bool,
    json_output: bool,
) -> CommandResult {
    let packager = super::packager(|config| {
        if let Some(endpoint) = endpoint {
            config.validation.endpoint = endpoint;
        }
    })?;

    let inferred = packager.infer(&DataSource::from_location(&source)).await?;

    let schema = match (schema, no_schema) {
        (_, true) => None,
        (Some(path), false) => Some(TableSchema::from_json(&std::fs::read_to_string(&path)?)?),
        (None, false) => Some(inferred.schema.clone()),
    };

    println!(
        "{} {} {} {}",
        "Validating".cyan().bold(),
        inferred.source.name.white(),
        "with".cyan(),
        packager.config().validation.endpoint
    );

    let Some(report) = packager.validate(&inferred.raw, schema.as_ref()).await? else {
        if json_output {
            println!("null");
        } else {
            println!("{}", "The validation service returned no report".yellow());
        }
        return Ok(());
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("{}", "No issues found".green().bold());
        return Ok(());
    }

    println!(
        "{} rows with issues ({} errors, {} warnings)",
        report.len().to_string().white().bold(),
        report.count_level(IssueLevel::Error).to_string().red(),
        report.count_level(IssueLevel::Warning).to_string().yellow()
    );
    println!();

    for row in &report.rows {
        println!("{} {}", "Row".bold(), row.row_index);
        for issue in &row.errors {
            let level = match issue.level {
                IssueLevel::Error => issue.level.label().red(),
                IssueLevel::Warning => issue.level.label().yellow(),
                IssueLevel::Info => issue.level.label().blue(),
            };
            let column = row.column_name(issue).unwrap_or("-");
            println!("  [{}] {:16} {} ({})", level, column, issue.message, issue.code.dimmed());
        }
    }

    Ok(())
}
