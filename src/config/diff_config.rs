use std::path::Path;
use std::string::FromUtf8Error;

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::BestEffortPathExt;

/// Settings read from an optional YAML file.
///
/// ```yaml
/// follow_links: false
/// list: true
/// exclude:
///   - .git
///   - target
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffConfig {
    pub follow_links: bool,
    pub list: bool,
    pub exclude: Vec<String>,
}

impl DiffConfig {
    pub async fn from_path(path: &Path) -> Result<Self, DiffConfigError> {
        debug!("Reading config file: {}", path.best_effort_path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn apply_entries(&mut self, top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<(), DiffConfigError> {
        for (key, value) in top_level {
            let Some(key) = key.as_str() else {
                debug!("Skipping non-string config key: {:?}", key);
                continue;
            };

            match key {
                "follow_links" => self.follow_links = Self::parse_bool(key, value)?,
                "list" => self.list = Self::parse_bool(key, value)?,
                "exclude" => self.exclude = Self::parse_names(key, value)?,
                other => debug!("Ignoring unknown config key '{}'", other),
            }
        }

        Ok(())
    }

    fn parse_bool(key: &str, value: &Yaml) -> Result<bool, DiffConfigError> {
        match value {
            Yaml::Value(Scalar::Boolean(flag)) => Ok(*flag),
            _ => InvalidValueSnafu { key }.fail(),
        }
    }

    fn parse_names(key: &str, value: &Yaml) -> Result<Vec<String>, DiffConfigError> {
        match value {
            Yaml::Value(Scalar::Null) => Ok(Vec::new()),
            Yaml::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Yaml::Value(Scalar::String(name)) => Ok(name.to_string()),
                    _ => InvalidValueSnafu { key }.fail(),
                })
                .collect(),
            _ => InvalidValueSnafu { key }.fail(),
        }
    }
}

impl TryFrom<&str> for DiffConfig {
    type Error = DiffConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents
            .first()
            .ok_or(DiffConfigError::MalformedConfig)?;

        let top_level = document
            .as_mapping()
            .ok_or(DiffConfigError::TopLevelNotMap)?;

        let mut config = DiffConfig::default();
        config.apply_entries(top_level)?;
        Ok(config)
    }
}

#[derive(Debug, Snafu)]
pub enum DiffConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' has a value of the wrong type", key))]
    InvalidValue { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[compio::test]
    async fn config_returns_error_on_nonexistent_file() {
        let result = DiffConfig::from_path(Path::new("nonexistent.yaml")).await;
        assert!(matches!(result, Err(DiffConfigError::ReadError { .. })));
    }

    #[compio::test]
    async fn config_is_read_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "list: true\nexclude: [.git, target]").unwrap();

        let config = DiffConfig::from_path(file.path())
            .await
            .expect("Failed to read config");

        assert!(config.list);
        assert!(!config.follow_links);
        assert_eq!(config.exclude, vec![".git", "target"]);
    }

    #[compio::test]
    async fn config_rejects_invalid_utf8() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let result = DiffConfig::from_path(file.path()).await;

        assert!(matches!(result, Err(DiffConfigError::EncodingError { .. })));
    }

    #[test]
    fn config_returns_error_on_invalid_yaml() {
        let result: Result<DiffConfig, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(DiffConfigError::ParseError { .. })));
    }

    #[test]
    fn config_returns_error_on_empty_file() {
        let result: Result<DiffConfig, _> = "".try_into();
        assert!(matches!(result, Err(DiffConfigError::MalformedConfig)));
    }

    #[rstest]
    #[case("- item1\n- item2")]
    #[case("just a string")]
    fn config_returns_error_when_top_level_is_not_map(#[case] contents: &str) {
        let result: Result<DiffConfig, _> = contents.try_into();
        assert!(matches!(result, Err(DiffConfigError::TopLevelNotMap)));
    }

    #[rstest]
    #[case("follow_links: yes please", "follow_links")]
    #[case("list: 3", "list")]
    #[case("exclude: .git", "exclude")]
    #[case("exclude:\n  - ok\n  - [nested]", "exclude")]
    fn config_rejects_wrongly_typed_values(#[case] contents: &str, #[case] expected_key: &str) {
        let result: Result<DiffConfig, _> = contents.try_into();
        match result {
            Err(DiffConfigError::InvalidValue { key }) => assert_eq!(key, expected_key),
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn config_ignores_unknown_keys() {
        let result: Result<DiffConfig, _> = "other_setting: value\nlist: false".try_into();
        assert_eq!(result.unwrap(), DiffConfig::default());
    }

    #[test]
    fn config_accepts_all_keys() {
        let contents = r#"
follow_links: true
list: true
exclude:
  - .git
  - "node_modules"
"#;
        let config: DiffConfig = contents.try_into().unwrap();

        assert_eq!(
            config,
            DiffConfig {
                follow_links: true,
                list: true,
                exclude: vec![".git".to_string(), "node_modules".to_string()],
            }
        );
    }

    #[test]
    fn config_treats_null_exclude_as_empty() {
        let config: DiffConfig = "exclude:".try_into().unwrap();
        assert!(config.exclude.is_empty());
    }
}
