use crate::{CodemodConfig, ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    ".graphql-codemodrc.yml",
    ".graphql-codemodrc.yaml",
    ".graphql-codemodrc.json",
    "graphql-codemod.config.yml",
];

/// Find a codemod config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a codemod config from the specified path.
/// The format is chosen by file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<CodemodConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        tags = config.tags.len(),
        ignore = config.ignore.len(),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a codemod config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<CodemodConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    tracing::debug!(extension, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<CodemodConfig> {
    // An empty YAML document is an empty config
    if contents.trim().is_empty() {
        return Ok(CodemodConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<CodemodConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

#[tracing::instrument(skip_all, fields(path = %path.display()))]
fn validate_config(config: &CodemodConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if config.tags.is_empty() {
        return Err(invalid("`tags` must name at least one template tag".to_string()));
    }
    if let Some(tag) = config.tags.iter().find(|tag| !is_identifier(tag)) {
        return Err(invalid(format!("Tag '{tag}' is not a valid identifier")));
    }

    if config.extensions.is_empty() {
        return Err(invalid("`extensions` must not be empty".to_string()));
    }
    if let Some(extension) = config
        .extensions
        .iter()
        .find(|extension| extension.is_empty() || extension.starts_with('.'))
    {
        return Err(invalid(format!(
            "Extension '{extension}' must be given without the leading dot"
        )));
    }

    for pattern in &config.ignore {
        glob::Pattern::new(pattern)
            .map_err(|e| invalid(format!("Invalid ignore pattern '{pattern}': {e}")))?;
    }

    if config.schema.as_ref().is_some_and(|schema| schema.as_os_str().is_empty()) {
        return Err(invalid("`schema` must not be empty".to_string()));
    }

    if config.ids.placeholder.trim().is_empty() {
        return Err(invalid("`ids.placeholder` must not be empty".to_string()));
    }
    for rule in &config.ids.rules {
        if rule.rename.trim().is_empty() {
            return Err(invalid("Every `ids.rules` entry needs a `rename` field".to_string()));
        }
        if rule.requires.is_empty() {
            tracing::warn!(rename = %rule.rename, "ID rule without requirements always applies");
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_codemods::IdRule;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r"
schema: _schemaV2.graphql
tags: [graphql, gql]
vocabulary:
  argumentDecorators: [pageable, paginated]
ignore:
  - '**/__generated__/**'
";
        let file = write_config(".yml", yaml);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.schema, Some(PathBuf::from("_schemaV2.graphql")));
        assert_eq!(config.tags, vec!["graphql".to_string(), "gql".to_string()]);
        assert!(config.vocabulary.argument_decorators.contains(&"paginated".to_string()));
        assert!(config.vocabulary.is_object_type("GraphQLObjectType"));
        assert_eq!(config.extensions.len(), 4);
        assert_eq!(config.ignore, vec!["**/__generated__/**".to_string()]);
    }

    #[test]
    fn test_load_json_id_policy() {
        let json = r#"
{
  "ids": {
    "rules": [{ "rename": "gravityID", "requires": ["gravityID"] }],
    "placeholder": "TODO_id"
  }
}
"#;
        let file = write_config(".json", json);
        let config = load_config(file.path()).unwrap();

        assert_eq!(
            config.ids.rules,
            vec![IdRule {
                rename: "gravityID".to_string(),
                requires: vec!["gravityID".to_string()],
            }]
        );
        assert_eq!(config.ids.placeholder, "TODO_id");
        assert_eq!(config.tags, vec!["graphql".to_string()]);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let file = write_config(".yaml", "");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, CodemodConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let file = write_config(".yml", "schemas: schema.graphql\n");
        let error = load_config(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_unsupported_format() {
        let error = load_config_from_str("schema = 'x'", Path::new("codemod.toml")).unwrap_err();
        assert!(matches!(error, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_validation() {
        let cases = [
            "tags: []\n",
            "tags: ['graphql`']\n",
            "extensions: ['.ts']\n",
            "ignore: ['src/[']\n",
            "ids:\n  placeholder: ''\n",
        ];
        for yaml in cases {
            let result = load_config_from_str(yaml, Path::new(".graphql-codemodrc.yml"));
            assert!(
                matches!(result, Err(ConfigError::Invalid { .. })),
                "expected {yaml:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(".graphql-codemodrc.yml");
        fs::write(&config_path, "schema: schema.graphql").unwrap();

        let sub_dir = temp_dir.path().join("src").join("schema");
        fs::create_dir_all(&sub_dir).unwrap();

        let found = find_config(&sub_dir).unwrap();
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let found = find_config(temp_dir.path()).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_config_file_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".graphql-codemodrc.json"), "{}").unwrap();
        fs::write(
            temp_dir.path().join("graphql-codemod.config.yml"),
            "tags: [gql]",
        )
        .unwrap();
        fs::write(temp_dir.path().join(".graphql-codemodrc.yml"), "").unwrap();

        let found = find_config(temp_dir.path()).unwrap().unwrap();
        assert_eq!(found.file_name().unwrap(), ".graphql-codemodrc.yml");
    }
}
