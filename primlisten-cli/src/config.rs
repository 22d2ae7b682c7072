//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `primlisten.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use primlisten_gen::generator::{GeneratorConfig, IndentStyle, LineEnding, NullCheck};
use primlisten_gen::{PrimitiveType, TypeRegistry};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "primlisten.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Java target options.
    pub java: JavaConfig,

    /// Rust target options.
    pub rust: RustConfig,

    /// Primitive types to specialize. Empty means the standard set.
    pub types: Vec<PrimitiveType>,
}

/// Language the contracts are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// One Java interface per contract.
    #[default]
    Java,

    /// One Rust module holding every contract.
    Rust,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Target language.
    pub target: Target,

    /// Output filename for single-file targets.
    pub file: Option<String>,

    /// Whether to generate documentation comments.
    pub generate_docs: bool,

    /// Indentation (`spaces2`, `spaces4` or `tabs`).
    pub indent: String,

    /// Line endings (`lf` or `crlf`).
    pub line_ending: String,

    /// Comment placed at the top of every generated file.
    pub header: Option<String>,
}

/// Java target configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JavaConfig {
    /// Package of the generated interfaces.
    pub package: Option<String>,

    /// Observable parameter type pattern.
    pub observable_type: String,

    /// `wrap` policy for a null listener (`pass-through` or `reject`).
    pub null_check: String,

    /// Authors credited with `@author` on every interface.
    pub authors: Vec<String>,
}

/// Rust target configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RustConfig {
    /// Crate path the generated module imports the runtime from.
    pub runtime_crate: String,

    /// Module documentation of the generated file.
    pub module_doc: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            target: Target::Java,
            file: None,
            generate_docs: true,
            indent: "spaces4".to_string(),
            line_ending: "lf".to_string(),
            header: None,
        }
    }
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            package: None,
            observable_type: GeneratorConfig::default().observable_type,
            null_check: NullCheck::default().as_str().to_string(),
            authors: Vec::new(),
        }
    }
}

impl Default for RustConfig {
    fn default() -> Self {
        Self {
            runtime_crate: GeneratorConfig::default().runtime_crate,
            module_doc: None,
        }
    }
}

impl Config {
    /// Build the type registry from `[[types]]`.
    ///
    /// Without any `[[types]]` entries the standard registry is used.
    pub fn registry(&self) -> CliResult<TypeRegistry> {
        if self.types.is_empty() {
            return Ok(TypeRegistry::standard());
        }

        let registry = TypeRegistry::from_descriptors(self.types.iter().cloned())
            .map_err(|e| ConfigError::invalid_value("types", e.to_string()))?;
        Ok(registry)
    }

    /// Translate the configuration into generator options.
    pub fn generator_config(&self) -> CliResult<GeneratorConfig> {
        let indent = match self.output.indent.as_str() {
            "spaces2" => IndentStyle::Spaces2,
            "spaces4" => IndentStyle::Spaces4,
            "tabs" => IndentStyle::Tabs,
            other => {
                return Err(ConfigError::invalid_value(
                    "output.indent",
                    format!("'{}' is not one of spaces2, spaces4, tabs", other),
                )
                .into())
            }
        };

        let line_ending = match self.output.line_ending.as_str() {
            "lf" => LineEnding::Lf,
            "crlf" => LineEnding::CrLf,
            other => {
                return Err(ConfigError::invalid_value(
                    "output.line_ending",
                    format!("'{}' is not one of lf, crlf", other),
                )
                .into())
            }
        };

        let null_check = NullCheck::parse(&self.java.null_check).ok_or_else(|| {
            ConfigError::invalid_value(
                "java.null_check",
                format!(
                    "'{}' is not one of pass-through, reject",
                    self.java.null_check
                ),
            )
        })?;

        let mut config = GeneratorConfig::new()
            .with_generate_docs(self.output.generate_docs)
            .with_indent(indent)
            .with_line_ending(line_ending)
            .with_observable_type(&self.java.observable_type)
            .with_null_check(null_check)
            .with_runtime_crate(&self.rust.runtime_crate);

        if let Some(header) = &self.output.header {
            config = config.with_header(header);
        }
        if let Some(package) = &self.java.package {
            config = config.with_package(package);
        }
        if let Some(doc) = &self.rust.module_doc {
            config = config.with_module_doc(doc);
        }
        for author in &self.java.authors {
            config = config.with_author(author);
        }

        Ok(config)
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location.
    /// If no config file exists at the default location, returns default
    /// configuration. An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = Self::resolve_path(path);

        if !config_path.exists() {
            if path.is_some() {
                return Err(ConfigError::not_found(config_path).into());
            }
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&config_path, &content)
    }

    /// Parse configuration text read from `path`.
    pub fn parse(path: &Path, content: &str) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    /// Path a configuration is loaded from.
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(target) = args.target {
            config.output.target = target;
        }

        if let Some(ref file) = args.output_file {
            config.output.file = Some(file.clone());
        }

        if let Some(generate_docs) = args.generate_docs {
            config.output.generate_docs = generate_docs;
        }

        if let Some(ref package) = args.package {
            config.java.package = Some(package.clone());
        }

        config
    }

    /// Get default configuration.
    pub fn default_config() -> Config {
        Config::default()
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# primlisten configuration file

[output]
# Output directory for generated files
dir = "./generated"

# Target language (java, rust)
target = "java"

# Output file name for the rust target (defaults to change_listeners.rs)
# file = "change_listeners.rs"

# Whether to generate Javadoc / rustdoc comments
generate_docs = true

# Indentation (spaces2, spaces4, tabs)
indent = "spaces4"

# Line endings (lf, crlf)
line_ending = "lf"

# Comment placed at the top of every generated file
# header = "Copyright (c) Example"

[java]
# Package of the generated interfaces; files are placed under its path
# package = "com.example.change"

# Type of the observable parameter; {boxed}, {abbrev} and {name} are replaced
observable_type = "ObservableValue<{boxed}>"

# How wrap treats a null listener (pass-through, reject)
null_check = "pass-through"

# Authors credited with @author on every interface
# authors = ["Jane Doe"]

[rust]
# Crate the generated module imports the listener runtime from
runtime_crate = "primlisten"

# Primitive types to specialize. Without any entries the standard eight
# (boolean, byte, char, double, float, int, long, short) are generated.
#
# [[types]]
# name = "int"
# abbreviation = "Int"
# boxed = "Integer"
# rust_type = "i32"    # required for target "rust" unless name is a Rust primitive
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Target language override.
    pub target: Option<Target>,

    /// Output filename override.
    pub output_file: Option<String>,

    /// Generate docs override.
    pub generate_docs: Option<bool>,

    /// Java package override.
    pub package: Option<String>,
}
