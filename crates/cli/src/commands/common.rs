use anyhow::{Context, Result};
use graphql_codemod_config::{find_config, load_config, CodemodConfig};
use std::path::{Path, PathBuf};

/// Configuration shared by every codemod command.
#[derive(Debug)]
pub struct CommandContext {
    pub config: CodemodConfig,
    /// Directory relative config paths are resolved against
    pub base_dir: PathBuf,
}

impl CommandContext {
    /// Load the config named on the command line, or the nearest one found
    /// by walking up from the working directory. Without either, defaults
    /// apply relative to the working directory.
    #[tracing::instrument(skip_all)]
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        let path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => find_config(&cwd)?,
        };

        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self {
                config: CodemodConfig::default(),
                base_dir: cwd,
            });
        };

        let config = load_config(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => cwd,
        };
        Ok(Self { config, base_dir })
    }

    /// Add ignore patterns given on the command line, rejecting invalid ones.
    pub fn add_ignore_patterns(&mut self, patterns: &[String]) -> Result<()> {
        for pattern in patterns {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid ignore pattern '{pattern}'"))?;
            self.config.ignore.push(pattern.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(".graphql-codemodrc.yml");
        fs::write(&path, "schema: _schemaV2.graphql\n").unwrap();

        let context = CommandContext::load(Some(&path)).unwrap();
        assert_eq!(context.base_dir, temp_dir.path());
        assert_eq!(
            context.config.schema_path(&context.base_dir, None, None),
            temp_dir.path().join("_schemaV2.graphql")
        );
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("codemod.json");
        fs::write(&path, "{ \"tags\": [] }").unwrap();
        assert!(CommandContext::load(Some(&path)).is_err());
    }

    #[test]
    fn test_add_ignore_patterns() {
        let mut context = CommandContext {
            config: CodemodConfig::default(),
            base_dir: PathBuf::from("."),
        };
        context
            .add_ignore_patterns(&["**/*.test.ts".to_string()])
            .unwrap();
        assert!(context.config.is_ignored(Path::new("src/a.test.ts")));
        assert!(context.add_ignore_patterns(&["[".to_string()]).is_err());
    }
}
