//! Concepts command - list fiscal concepts and the types they accept.

use colored::Colorize;
use fiscal_package::{PrimitiveType, TypeSelection};

use super::CommandResult;

pub fn run(types: Vec<String>) -> CommandResult {
    let packager = super::packager(|_| {})?;
    let catalog = packager.catalog();

    let concepts = if types.is_empty() {
        catalog.list_concepts().iter().collect::<Vec<_>>()
    } else {
        let selection = types
            .iter()
            .map(|t| t.parse::<PrimitiveType>())
            .collect::<Result<Vec<_>, _>>()?;
        packager
            .resolver()
            .compatible_concepts(TypeSelection::Many(selection))
    };

    for concept in concepts {
        if concept.is_unselected() {
            continue;
        }
        let allowed: Vec<&str> = concept.allowed_types.iter().map(|t| t.id()).collect();
        let required = if concept.required {
            "required".red().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:36} {:28} {} {}",
            concept.id.cyan(),
            concept.name,
            allowed.join(", ").dimmed(),
            required
        );
    }

    Ok(())
}
