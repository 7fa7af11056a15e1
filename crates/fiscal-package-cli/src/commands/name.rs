//! Name command - derive resource names and titles.

use fiscal_package::naming::{name_from_path, name_from_url, to_title, unique_name};
use fiscal_package::DataSource;

use super::CommandResult;

pub fn run(input: String, existing: Vec<String>, title: bool) -> CommandResult {
    if title {
        println!("{}", to_title(&input));
        return Ok(());
    }

    let name = match DataSource::from_location(&input) {
        DataSource::Url(url) => name_from_url(&url),
        _ => name_from_path(&input),
    };
    println!("{}", unique_name(&name, &existing));
    Ok(())
}
