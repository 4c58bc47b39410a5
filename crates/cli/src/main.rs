mod commands;
mod exit_code;
mod files;
mod report;

use clap::{Args, Parser, Subcommand};
use exit_code::ExitCode;
use report::Reporter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql-codemod")]
#[command(
    about = "Codemods for GraphQL schema definitions and client documents",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to codemod config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Only print failed files and the summary of a failed run
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every codemod subcommand
#[derive(Debug, Args)]
pub struct TransformArgs {
    /// Files or directories to transform (defaults to the current directory)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Skip files matching this glob (repeatable, added to the config's `ignore`)
    #[arg(long, value_name = "GLOB")]
    pub ignore_pattern: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Camelize field, argument and input field definitions, keeping
    /// resolvers working on the old names
    RenameDefinitions(TransformArgs),

    /// Camelize fields and arguments in GraphQL documents, aliasing fields to
    /// their old name
    RenameClientFields(TransformArgs),

    /// Remove deprecated fields and enum values from schema definitions
    PruneDeprecated(TransformArgs),

    /// Replace paginated list fields with their connection fields
    UnifyPagination(TransformArgs),

    /// Rewrite `__id`, `_id` and `id` selections to the new ID fields
    MigrateIds {
        #[command(flatten)]
        args: TransformArgs,

        /// Target schema SDL (overrides `SCHEMA_PATH` and the config)
        #[arg(long, value_name = "FILE")]
        schema: Option<PathBuf>,
    },

    /// Add `@raw_response_type` to relay test queries and type their fixtures
    RelayRawResponse(TransformArgs),

    /// List available codemods
    List,
}

impl Commands {
    /// Registry name of the codemod a subcommand runs
    const fn codemod_name(&self) -> Option<&'static str> {
        match self {
            Self::RenameDefinitions(_) => Some("rename-definitions"),
            Self::RenameClientFields(_) => Some("rename-client-fields"),
            Self::PruneDeprecated(_) => Some("prune-deprecated"),
            Self::UnifyPagination(_) => Some("unify-pagination"),
            Self::MigrateIds { .. } => Some("migrate-ids"),
            Self::RelayRawResponse(_) => Some("relay-raw-response"),
            Self::List => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// One JSON object per line for tooling
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let reporter = Reporter {
        format: cli.format,
        quiet: cli.quiet,
    };

    let Some(name) = cli.command.codemod_name() else {
        commands::list::run(cli.format);
        return Ok(());
    };
    let codemod = graphql_codemods::find_codemod(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown codemod '{name}'"))?;

    let (args, schema) = match cli.command {
        Commands::RenameDefinitions(args)
        | Commands::RenameClientFields(args)
        | Commands::PruneDeprecated(args)
        | Commands::UnifyPagination(args)
        | Commands::RelayRawResponse(args) => (args, None),
        Commands::MigrateIds { args, schema } => (args, schema),
        Commands::List => return Ok(()),
    };

    let code = commands::transform::run(
        codemod.as_ref(),
        args,
        schema,
        cli.config.as_deref(),
        reporter,
    )
    .await;
    if code != ExitCode::Success {
        code.exit();
    }
    Ok(())
}

/// Tracing goes to stderr and stays off unless `RUST_LOG` is set
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if std::env::var("CLICOLOR_FORCE").is_ok_and(|val| !val.is_empty() && val != "0") {
        control::set_override(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_codemod_subcommand() {
        let cli = Cli::parse_from([
            "graphql-codemod",
            "--format",
            "json",
            "migrate-ids",
            "src",
            "--schema",
            "data/schema.graphql",
            "--dry-run",
            "--ignore-pattern",
            "**/__generated__/**",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.command.codemod_name(), Some("migrate-ids"));
        let Commands::MigrateIds { args, schema } = cli.command else {
            panic!("expected migrate-ids");
        };
        assert_eq!(args.paths, vec![PathBuf::from("src")]);
        assert!(args.dry_run);
        assert_eq!(args.ignore_pattern, vec!["**/__generated__/**".to_string()]);
        assert_eq!(schema, Some(PathBuf::from("data/schema.graphql")));
    }

    #[test]
    fn test_every_subcommand_names_a_codemod() {
        for name in graphql_codemods::all_codemod_names() {
            let cli = Cli::try_parse_from(["graphql-codemod", name]).unwrap();
            assert_eq!(cli.command.codemod_name(), Some(name));
        }
        let cli = Cli::parse_from(["graphql-codemod", "list"]);
        assert_eq!(cli.command.codemod_name(), None);
    }
}
