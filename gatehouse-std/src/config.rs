//! Configuration bootstrap.
//!
//! Builds the [`Parameters`] an application reads before its first dispatch:
//!
//! 1. The basic parameters ([`VENDOR_DIR`], [`CONFIG_FILE`], [`IS_PROD_ENV`])
//!    are set from the builder.
//! 2. The configuration file is read and imported on top of them, so it may
//!    override any basic parameter.
//!
//! Configuration files are TOML (`.toml`) or JSON (`.json`) and must contain a
//! mapping at the root. Nested mappings are flattened into dotted keys:
//!
//! ```toml
//! [gatehouse]
//! is_production_environment = true
//!
//! [blog]
//! per_page = 20
//! ```
//!
//! yields `gatehouse.is_production_environment` and `blog.per_page`.
//!
//! TOML datetimes are stored as strings in their RFC 3339 form. An empty
//! mapping has no leaves to flatten and is stored as an empty mapping under
//! its own key. Paths have to be valid UTF-8.

use gatehouse_core::ConfigError;
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Installation root of the application. Set by the bootstrap.
pub const VENDOR_DIR: &str = "gatehouse.vendor_directory";
/// Path of the configuration file. Defaults to [`DEFAULT_CONFIG_FILE_NAME`]
/// one directory above [`VENDOR_DIR`].
pub const CONFIG_FILE: &str = "gatehouse.configuration_file";
/// Whether the application runs in production. Defaults to `false`.
pub const IS_PROD_ENV: &str = "gatehouse.is_production_environment";

/// File name of the default configuration file.
pub const DEFAULT_CONFIG_FILE_NAME: &str = ".gatehouse-config.toml";

/// A flat store of configuration parameters keyed by dotted names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: BTreeMap<String, Value>,
}

impl Parameters {
    /// Create an empty parameter store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a mapping, flattening nested mappings into dotted keys.
    ///
    /// Keys already present are overwritten.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `value` is not a mapping.
    pub fn import(&mut self, value: Value) -> Result<(), ConfigError> {
        match value {
            Value::Object(map) => {
                self.import_map(None, map);
                Ok(())
            }
            other => Err(ConfigError::invalid(format!(
                "expected a mapping of parameters, found {}",
                kind(&other)
            ))),
        }
    }

    fn import_map(&mut self, prefix: Option<&str>, map: Map<String, Value>) {
        for (key, value) in map {
            let key = match prefix {
                Some(prefix) => format!("{prefix}.{key}"),
                None => key,
            };
            match value {
                Value::Object(nested) if !nested.is_empty() => {
                    self.import_map(Some(key.as_str()), nested)
                }
                leaf => {
                    self.values.insert(key, leaf);
                }
            }
        }
    }

    /// Set a single parameter.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a string parameter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Get a boolean parameter.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Check if a parameter is set.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get the number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The [`VENDOR_DIR`] parameter.
    pub fn vendor_directory(&self) -> Option<&Path> {
        self.get_str(VENDOR_DIR).map(Path::new)
    }

    /// The [`CONFIG_FILE`] parameter.
    pub fn configuration_file(&self) -> Option<&Path> {
        self.get_str(CONFIG_FILE).map(Path::new)
    }

    /// The [`IS_PROD_ENV`] parameter; `false` unless set to `true`.
    pub fn is_production_environment(&self) -> bool {
        self.get_bool(IS_PROD_ENV).unwrap_or(false)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

/// Entry point of the configuration bootstrap.
pub struct Configuration;

impl Configuration {
    /// Start building the configuration.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }
}

/// Builder for the application [`Parameters`].
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    vendor_directory: Option<PathBuf>,
    configuration_file: Option<PathBuf>,
}

impl ConfigurationBuilder {
    /// Set the installation root. Required.
    pub fn vendor_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.vendor_directory = Some(path.into());
        self
    }

    /// Use `path` instead of the default configuration file.
    pub fn configuration_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.configuration_file = Some(path.into());
        self
    }

    /// Set the basic parameters, then import the configuration file.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if no vendor directory was set, or if the
    /// configuration file is missing, unreadable, malformed, or does not
    /// contain a mapping.
    pub fn build(self) -> Result<Parameters, ConfigError> {
        let vendor_directory = self.vendor_directory.ok_or_else(|| {
            ConfigError::invalid(
                "the parameter store is not bootstrapped: set a vendor directory before building the configuration",
            )
        })?;

        let configuration_file = self.configuration_file.unwrap_or_else(|| {
            vendor_directory
                .parent()
                .unwrap_or(&vendor_directory)
                .join(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut parameters = Parameters::new();
        parameters.set(VENDOR_DIR, utf8_path(&vendor_directory)?);
        parameters.set(CONFIG_FILE, utf8_path(&configuration_file)?);
        parameters.set(IS_PROD_ENV, false);

        tracing::debug!(
            vendor_directory = %vendor_directory.display(),
            configuration_file = %configuration_file.display(),
            "basic parameters set"
        );

        parameters.import(read_configuration_file(&configuration_file)?)?;

        tracing::info!(
            configuration_file = %configuration_file.display(),
            parameters = parameters.len(),
            production = parameters.is_production_environment(),
            "configuration imported"
        );

        Ok(parameters)
    }
}

fn utf8_path(path: &Path) -> Result<&str, ConfigError> {
    path.to_str().ok_or_else(|| {
        ConfigError::invalid(format!("path `{}` is not valid UTF-8", path.display()))
    })
}

fn read_configuration_file(path: &Path) -> Result<Value, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::invalid(format!(
            "configuration file `{}` not found",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::invalid_with(format!("cannot read `{}`", path.display()), e)
    })?;

    let value = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => {
            let table: toml::Table = toml::from_str(&content).map_err(|e| {
                ConfigError::invalid_with(format!("`{}` is not valid TOML", path.display()), e)
            })?;
            toml_to_json(toml::Value::Table(table)).map_err(|reason| {
                ConfigError::invalid(format!("`{}` {reason}", path.display()))
            })?
        }
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            ConfigError::invalid_with(format!("`{}` is not valid JSON", path.display()), e)
        })?,
        _ => {
            return Err(ConfigError::invalid(format!(
                "`{}` has an unsupported extension, expected `.toml` or `.json`",
                path.display()
            )));
        }
    };

    if !value.is_object() {
        return Err(ConfigError::invalid(format!(
            "`{}` has to contain a mapping",
            path.display()
        )));
    }

    Ok(value)
}

fn toml_to_json(value: toml::Value) -> Result<Value, String> {
    Ok(match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("holds the non-finite float `{f}`"))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<_, String>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| Ok((key, toml_to_json(value)?)))
                .collect::<Result<_, String>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_import_flattens_nested_mappings() {
        let mut parameters = Parameters::new();
        parameters
            .import(json!({ "blog": { "per_page": 20, "feed": { "enabled": true } } }))
            .unwrap();

        assert_eq!(parameters.get("blog.per_page"), Some(&json!(20)));
        assert_eq!(parameters.get_bool("blog.feed.enabled"), Some(true));
        assert!(!parameters.contains("blog"));
    }

    #[test]
    fn test_import_rejects_non_mapping() {
        let mut parameters = Parameters::new();
        let err = parameters.import(json!([1, 2, 3])).unwrap_err();
        assert!(err.to_string().contains("found an array"));
    }

    #[test]
    fn test_missing_vendor_directory_is_invalid() {
        let err = Configuration::builder().build().unwrap_err();
        assert!(err.to_string().contains("not bootstrapped"));
    }

    #[test]
    fn test_default_configuration_file_above_vendor() {
        let root = TempDir::new().unwrap();
        let vendor = root.path().join("vendor");
        fs::create_dir(&vendor).unwrap();
        write(&root, DEFAULT_CONFIG_FILE_NAME, "[app]\nname = \"blog\"\n");

        let parameters = Configuration::builder()
            .vendor_directory(&vendor)
            .build()
            .unwrap();

        assert_eq!(parameters.vendor_directory(), Some(vendor.as_path()));
        assert_eq!(
            parameters.configuration_file(),
            Some(root.path().join(DEFAULT_CONFIG_FILE_NAME).as_path())
        );
        assert!(!parameters.is_production_environment());
        assert_eq!(parameters.get_str("app.name"), Some("blog"));
    }

    #[test]
    fn test_toml_datetimes_and_empty_tables() {
        let root = TempDir::new().unwrap();
        let file = write(
            &root,
            "app.toml",
            "[app]\nreleased = 1979-05-27T07:32:00Z\nempty = {}\nstamps = [1979-05-27]\n",
        );

        let parameters = Configuration::builder()
            .vendor_directory(root.path())
            .configuration_file(&file)
            .build()
            .unwrap();

        assert_eq!(
            parameters.get_str("app.released"),
            Some("1979-05-27T07:32:00Z")
        );
        assert_eq!(parameters.get("app.empty"), Some(&json!({})));
        assert_eq!(parameters.get("app.stamps"), Some(&json!(["1979-05-27"])));
        assert!(!parameters.contains("app.released.$__toml_private_datetime"));
        assert!(parameters.contains(VENDOR_DIR));
        assert_eq!(parameters.len(), 6);
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let root = TempDir::new().unwrap();
        let file = write(&root, "nan.toml", "ratio = nan\n");

        let err = Configuration::builder()
            .vendor_directory(root.path())
            .configuration_file(&file)
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("non-finite float"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_vendor_directory_is_rejected() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let err = Configuration::builder()
            .vendor_directory(OsStr::from_bytes(b"/srv/\xffvendor"))
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_configuration_file_overrides_basic_parameters() {
        let root = TempDir::new().unwrap();
        let file = write(
            &root,
            "prod.json",
            r#"{ "gatehouse": { "is_production_environment": true } }"#,
        );

        let parameters = Configuration::builder()
            .vendor_directory(root.path())
            .configuration_file(&file)
            .build()
            .unwrap();

        assert!(parameters.is_production_environment());
    }

    #[test]
    fn test_missing_configuration_file() {
        let root = TempDir::new().unwrap();
        let err = Configuration::builder()
            .vendor_directory(root.path())
            .configuration_file(root.path().join("absent.toml"))
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_json_root_must_be_mapping() {
        let root = TempDir::new().unwrap();
        let file = write(&root, "list.json", "[\"a\", \"b\"]");

        let err = Configuration::builder()
            .vendor_directory(root.path())
            .configuration_file(&file)
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("has to contain a mapping"));
    }

    #[test]
    fn test_malformed_toml() {
        let root = TempDir::new().unwrap();
        let file = write(&root, "broken.toml", "[app\nname = ");

        let err = Configuration::builder()
            .vendor_directory(root.path())
            .configuration_file(&file)
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidConfiguration {
                source: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let root = TempDir::new().unwrap();
        let file = write(&root, "config.ini", "a=1");

        let err = Configuration::builder()
            .vendor_directory(root.path())
            .configuration_file(&file)
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("unsupported extension"));
    }
}
