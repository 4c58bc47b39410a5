use crate::commands::common::CommandContext;
use crate::files::collect_files;
use crate::report::{FileReport, Reporter, Summary};
use crate::{ExitCode, TransformArgs};
use anyhow::{Context, Result};
use apollo_compiler::Schema;
use graphql_codemod_config::SCHEMA_PATH_ENV;
use graphql_codemods::{Codemod, CodemodContext, SourceFile};
use std::path::{Path, PathBuf};

/// Run one codemod over every collected file.
///
/// Files are processed one at a time. A file whose transform fails is left
/// untouched and the run carries on; the exit code then reports the failure.
#[tracing::instrument(skip_all, fields(codemod = codemod.name()))]
pub async fn run(
    codemod: &dyn Codemod,
    args: TransformArgs,
    schema_override: Option<PathBuf>,
    config_path: Option<&Path>,
    reporter: Reporter,
) -> ExitCode {
    let mut ctx = match CommandContext::load(config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            reporter.fatal(&format!("{e:#}"));
            return ExitCode::ConfigError;
        }
    };
    if let Err(e) = ctx.add_ignore_patterns(&args.ignore_pattern) {
        reporter.fatal(&format!("{e:#}"));
        return ExitCode::ConfigError;
    }

    // The schema is loaded once, before any file is touched
    let schema = if codemod.requires_schema() {
        let env = std::env::var(SCHEMA_PATH_ENV).ok();
        let path = ctx
            .config
            .schema_path(&ctx.base_dir, env.as_deref(), schema_override.as_deref());
        match load_schema(&path).await {
            Ok(schema) => Some(schema),
            Err(e) => {
                reporter.fatal(&format!("{e:#}"));
                return ExitCode::SchemaError;
            }
        }
    } else {
        None
    };

    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };
    let files = match collect_files(&paths, &ctx.config) {
        Ok(files) => files,
        Err(e) => {
            reporter.fatal(&format!("{e:#}"));
            return ExitCode::IoError;
        }
    };

    let mut context = ctx.config.codemod_context();
    if let Some(schema) = &schema {
        context = context.with_schema(schema);
    }

    let mut summary = Summary {
        dry_run: args.dry_run,
        ..Summary::default()
    };
    for path in &files {
        let report = transform_file(codemod, path, &context, args.dry_run).await;
        summary.record(report.status);
        reporter.file(&report);
    }
    reporter.summary(&summary);

    tracing::info!(
        changed = summary.changed,
        unchanged = summary.unchanged,
        failed = summary.failed,
        "Codemod finished"
    );
    if summary.failed > 0 {
        ExitCode::TransformError
    } else {
        ExitCode::Success
    }
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
async fn load_schema(path: &Path) -> Result<Schema> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    let schema = Schema::parse(text, path)
        .map_err(|invalid| anyhow::anyhow!("{}", invalid.errors))
        .with_context(|| format!("Invalid schema {}", path.display()))?;
    tracing::info!(types = schema.types.len(), "Schema loaded");
    Ok(schema)
}

async fn transform_file(
    codemod: &dyn Codemod,
    path: &Path,
    context: &CodemodContext<'_>,
    dry_run: bool,
) -> FileReport {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => return FileReport::failed(path, "", format!("Failed to read file: {e}"), None),
    };
    let Some(file) = SourceFile::from_path(path, text.as_str()) else {
        return FileReport::failed(path, &text, "Unsupported file type".to_string(), None);
    };

    let output = match codemod.transform(&file, context) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!(error = %e, "Transform failed, leaving file untouched");
            return FileReport::failed(path, &text, e.to_string(), e.offset());
        }
    };

    if output.changed && !dry_run {
        if let Err(e) = tokio::fs::write(path, &output.source).await {
            return FileReport::failed(path, &text, format!("Failed to write file: {e}"), None);
        }
        tracing::info!("File written");
    }
    FileReport::transformed(path, &text, output.changed, &output.diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FileStatus;
    use graphql_codemods::find_codemod;
    use std::fs;

    const SCHEMA_SOURCE: &str = r#"export const Artist = new GraphQLObjectType({
  name: "Artist",
  fields: {
    image_url: { type: GraphQLString },
  },
})
"#;

    fn rename_definitions() -> &'static dyn Codemod {
        find_codemod("rename-definitions").unwrap().as_ref()
    }

    #[tokio::test]
    async fn test_transform_writes_changes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("artist.ts");
        fs::write(&path, SCHEMA_SOURCE).unwrap();

        let report =
            transform_file(rename_definitions(), &path, &CodemodContext::default(), false).await;
        assert_eq!(report.status, FileStatus::Changed);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("imageURL: {"));
        assert!(written.contains("resolve: ({ image_url }) => image_url"));
    }

    #[tokio::test]
    async fn test_dry_run_leaves_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("artist.ts");
        fs::write(&path, SCHEMA_SOURCE).unwrap();

        let report =
            transform_file(rename_definitions(), &path, &CodemodContext::default(), true).await;
        assert_eq!(report.status, FileStatus::Changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), SCHEMA_SOURCE);
    }

    #[tokio::test]
    async fn test_failure_leaves_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("artist.ts");
        fs::write(&path, "const = ;").unwrap();

        let report =
            transform_file(rename_definitions(), &path, &CodemodContext::default(), false).await;
        assert_eq!(report.status, FileStatus::Failed);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "const = ;");
    }

    #[tokio::test]
    async fn test_load_schema() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("schema.graphql");
        fs::write(&path, "type Query { artist: Artist }\ntype Artist { slug: ID! }\n").unwrap();
        let schema = load_schema(&path).await.unwrap();
        assert!(schema.types.contains_key("Artist"));

        assert!(load_schema(&temp_dir.path().join("missing.graphql")).await.is_err());

        fs::write(&path, "type Query {").unwrap();
        assert!(load_schema(&path).await.is_err());
    }
}
