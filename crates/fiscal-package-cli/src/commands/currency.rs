//! Currency command - summarize a currency list.

use std::path::PathBuf;

use colored::Colorize;
use fiscal_package::currency::load_currencies;

use super::CommandResult;

pub fn run(file: PathBuf) -> CommandResult {
    let packager = super::packager(|_| {})?.with_currencies(load_currencies(&file)?);

    println!(
        "{} {}",
        packager.currencies().len().to_string().white().bold(),
        "currencies".cyan()
    );
    match packager.default_currency() {
        Some(currency) => println!(
            "Default: {} {}{}",
            currency.code.green().bold(),
            currency.name,
            currency
                .symbol
                .as_deref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default()
        ),
        None => println!("{}", "No default currency: the list is empty".yellow()),
    }

    Ok(())
}
