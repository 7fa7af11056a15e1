//! fdp - fiscal data package CLI.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use logging::{init_logging, LogConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Infer {
            source,
            sample_limit,
            raw_output,
            schema_output,
            json,
        } => commands::infer::run(source, sample_limit, raw_output, schema_output, json).await,

        Commands::Validate {
            source,
            endpoint,
            schema,
            no_schema,
            json,
        } => commands::validate::run(source, endpoint, schema, no_schema, json).await,

        Commands::Name {
            input,
            existing,
            title,
        } => commands::name::run(input, existing, title),

        Commands::Concepts { types } => commands::concepts::run(types),

        Commands::Currency { file } => commands::currency::run(file),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
