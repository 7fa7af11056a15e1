//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fdp: build fiscal data packages from tabular budget data
#[derive(Parser)]
#[command(name = "fdp")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer column types and a schema descriptor from a data source
    Infer {
        /// Local path, URL or proxy URL of the data (CSV/TSV)
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Maximum records to sample, header included
        #[arg(long)]
        sample_limit: Option<usize>,

        /// Write the canonical CSV to this file
        #[arg(long, value_name = "FILE")]
        raw_output: Option<PathBuf>,

        /// Write the schema descriptor to this file
        #[arg(long, value_name = "FILE")]
        schema_output: Option<PathBuf>,

        /// Print the inference result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a data source against a GoodTables endpoint
    Validate {
        /// Local path, URL or proxy URL of the data (CSV/TSV)
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Validation endpoint (default: FDP_VALIDATION_ENDPOINT or the public service)
        #[arg(long)]
        endpoint: Option<String>,

        /// Schema descriptor to validate against (default: the inferred schema)
        #[arg(long, value_name = "FILE", conflicts_with = "no_schema")]
        schema: Option<PathBuf>,

        /// Validate structure only, without a schema
        #[arg(long)]
        no_schema: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive a resource name from a path or URL
    Name {
        /// File name, path, URL or proxy URL
        #[arg(value_name = "INPUT")]
        input: String,

        /// Names already taken; the result avoids them
        #[arg(long = "existing", value_name = "NAME")]
        existing: Vec<String>,

        /// Print a display title instead of a resource name
        #[arg(long)]
        title: bool,
    },

    /// List the fiscal concepts, optionally only those accepting given types
    Concepts {
        /// Type ids (integer, number, date, ...)
        #[arg(long, value_name = "TYPE", num_args = 1..)]
        types: Vec<String>,
    },

    /// Show a currency list and its default currency
    Currency {
        /// JSON list of currencies ({code, name, ...})
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_infer() {
        let cli = Cli::parse_from(["fdp", "-vv", "infer", "budget.csv", "--sample-limit", "10", "--json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Infer {
                source,
                sample_limit,
                json,
                ..
            } => {
                assert_eq!(source, "budget.csv");
                assert_eq!(sample_limit, Some(10));
                assert!(json);
            }
            _ => panic!("expected infer"),
        }
    }

    #[test]
    fn test_schema_conflicts_with_no_schema() {
        let result = Cli::try_parse_from(["fdp", "validate", "x.csv", "--schema", "s.json", "--no-schema"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_name_existing() {
        let cli = Cli::parse_from(["fdp", "name", "a.csv", "--existing", "a", "--existing", "a-1"]);
        match cli.command {
            Commands::Name { existing, .. } => assert_eq!(existing, vec!["a", "a-1"]),
            _ => panic!("expected name"),
        }
    }
}
