use crate::OutputFormat;
use colored::Colorize;
use graphql_codemods::all_codemods;

/// Print the available codemods.
pub fn run(format: OutputFormat) {
    let mut codemods: Vec<_> = all_codemods().iter().collect();
    codemods.sort_by_key(|codemod| codemod.name());
    let width = codemods
        .iter()
        .map(|codemod| codemod.name().len())
        .max()
        .unwrap_or(0);

    for codemod in codemods {
        match format {
            OutputFormat::Human => {
                let schema = if codemod.requires_schema() {
                    " (needs schema)".dimmed()
                } else {
                    "".normal()
                };
                let name = format!("{:width$}", codemod.name());
                println!("{}  {}{}", name.bold(), codemod.description(), schema);
            }
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "name": codemod.name(),
                    "description": codemod.description(),
                    "requires_schema": codemod.requires_schema(),
                })
            ),
        }
    }
}
