//! Code generator trait definition.
//!
//! This module defines the `CodeGenerator` trait that all renderers implement.
//! The trait provides a standard interface for rendering listener contracts
//! from IR, enabling support for multiple target languages (Java, Rust).

use crate::error::GeneratorError;
use crate::ir::ListenerContractSpec;

/// Trait for listener contract renderers.
///
/// Implement this trait to add support for a new target language.
/// Each generator turns one [`ListenerContractSpec`] into target source.
///
/// # Example
///
/// ```rust
/// use primlisten_gen::generator::{
///     CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature, OutputLayout,
/// };
/// use primlisten_gen::{GeneratorError, ListenerContractSpec};
///
/// struct NamesOnly;
///
/// impl CodeGenerator for NamesOnly {
///     fn id(&self) -> &'static str { "names" }
///     fn name(&self) -> &'static str { "Contract Name Lister" }
///     fn file_extension(&self) -> &'static str { "txt" }
///     fn layout(&self) -> OutputLayout { OutputLayout::SingleFile }
///
///     fn generate(
///         &self,
///         contract: &ListenerContractSpec,
///         _config: &GeneratorConfig,
///     ) -> Result<GeneratedCode, GeneratorError> {
///         Ok(GeneratedCode::new(format!("{}\n", contract.contract_name), &contract.contract_name))
///     }
///
///     fn generate_preamble(
///         &self,
///         _contracts: &[&ListenerContractSpec],
///         _config: &GeneratorConfig,
///     ) -> Result<String, GeneratorError> {
///         Ok(String::new())
///     }
///
///     fn generate_postamble(
///         &self,
///         _contracts: &[&ListenerContractSpec],
///         _config: &GeneratorConfig,
///     ) -> Result<String, GeneratorError> {
///         Ok(String::new())
///     }
///
///     fn supports_feature(&self, _feature: GeneratorFeature) -> bool {
///         false
///     }
/// }
/// ```
pub trait CodeGenerator: Send + Sync {
    /// Returns the unique identifier for this generator.
    ///
    /// This is used to select the generator and should be a short,
    /// lowercase string (e.g., "java", "rust").
    fn id(&self) -> &'static str;

    /// Returns the human-readable name of this generator.
    fn name(&self) -> &'static str;

    /// Returns the file extension for generated files.
    fn file_extension(&self) -> &'static str;

    /// Returns how contracts are distributed over output files.
    fn layout(&self) -> OutputLayout;

    /// Render one contract.
    ///
    /// # Arguments
    ///
    /// * `contract` - The contract IR to render
    /// * `config` - Generator configuration options
    fn generate(
        &self,
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) -> Result<GeneratedCode, GeneratorError>;

    /// Generate the preamble of an output file.
    ///
    /// Called once per file, before its contracts, with every contract that
    /// file will hold.
    fn generate_preamble(
        &self,
        contracts: &[&ListenerContractSpec],
        config: &GeneratorConfig,
    ) -> Result<String, GeneratorError>;

    /// Generate the postamble of an output file.
    fn generate_postamble(
        &self,
        contracts: &[&ListenerContractSpec],
        config: &GeneratorConfig,
    ) -> Result<String, GeneratorError>;

    /// Check if this generator supports a specific feature.
    fn supports_feature(&self, feature: GeneratorFeature) -> bool;
}

/// Generator configuration options.
///
/// Controls the formatting of generated code and the target-specific names
/// it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Whether to generate documentation comments
    pub generate_docs: bool,

    /// Indentation style
    pub indent: IndentStyle,

    /// Line ending style
    pub line_ending: LineEnding,

    /// Java package of the generated interfaces
    pub package: Option<String>,

    /// Text placed in a comment at the top of every file
    pub header: Option<String>,

    /// Observable parameter type; `{boxed}`, `{abbrev}` and `{name}` are
    /// replaced with the descriptor's fields
    pub observable_type: String,

    /// How `wrap` treats an absent listener
    pub null_check: NullCheck,

    /// Crate path generated Rust code imports the runtime contracts from
    pub runtime_crate: String,

    /// Module documentation of the generated Rust file
    pub module_doc: Option<String>,

    /// Authors credited on every generated contract
    pub authors: Vec<String>,
}

/// Default observable parameter type pattern.
pub const DEFAULT_OBSERVABLE_TYPE: &str = "ObservableValue<{boxed}>";

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            package: None,
            header: None,
            observable_type: DEFAULT_OBSERVABLE_TYPE.to_string(),
            null_check: NullCheck::default(),
            runtime_crate: "primlisten".to_string(),
            module_doc: None,
            authors: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to generate documentation comments.
    pub fn with_generate_docs(mut self, generate: bool) -> Self {
        self.generate_docs = generate;
        self
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Set the line ending style.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set the Java package.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Set the file header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set the observable parameter type pattern.
    pub fn with_observable_type(mut self, pattern: impl Into<String>) -> Self {
        self.observable_type = pattern.into();
        self
    }

    /// Set the absent listener policy.
    pub fn with_null_check(mut self, null_check: NullCheck) -> Self {
        self.null_check = null_check;
        self
    }

    /// Set the runtime crate path.
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Set the module documentation.
    pub fn with_module_doc(mut self, doc: impl Into<String>) -> Self {
        self.module_doc = Some(doc.into());
        self
    }

    /// Add an author credited on every contract.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Get the indentation string based on current settings.
    pub fn indent_str(&self) -> &str {
        self.indent.as_str()
    }

    /// Get the line ending string based on current settings.
    pub fn line_ending_str(&self) -> &str {
        self.line_ending.as_str()
    }

    /// Returns the package path as directories, e.g. `com/example/change`.
    pub fn package_path(&self) -> Option<String> {
        self.package.as_ref().map(|p| p.replace('.', "/"))
    }

    /// Check that the configuration can be rendered.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if let Some(package) = &self.package {
            let valid = package.split('.').all(|segment| {
                let mut chars = segment.chars();
                chars
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
            if !valid {
                return Err(GeneratorError::invalid_config(
                    "package",
                    format!("'{}' is not a valid package name", package),
                ));
            }
        }

        if self.observable_type.trim().is_empty() {
            return Err(GeneratorError::invalid_config(
                "observable_type",
                "must not be empty",
            ));
        }

        if self.runtime_crate.trim().is_empty() {
            return Err(GeneratorError::invalid_config(
                "runtime_crate",
                "must not be empty",
            ));
        }

        Ok(())
    }
}

/// Policy for a `wrap` call with an absent listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullCheck {
    /// No guard; behavior is whatever the target does with an absent value
    #[default]
    PassThrough,

    /// Reject an absent listener before the type test
    Reject,
}

impl NullCheck {
    /// Parse a policy from its configuration spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pass-through" => Some(NullCheck::PassThrough),
            "reject" => Some(NullCheck::Reject),
            _ => None,
        }
    }

    /// Returns the configuration spelling of this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            NullCheck::PassThrough => "pass-through",
            NullCheck::Reject => "reject",
        }
    }
}

/// How contracts are distributed over output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLayout {
    /// One file per contract, named after the contract
    FilePerContract,

    /// All contracts in one file
    SingleFile,
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Use 2 spaces for indentation
    Spaces2,

    /// Use 4 spaces for indentation
    #[default]
    Spaces4,

    /// Use tabs for indentation
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Create an indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,

    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Generated code output.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCode {
    /// The generated code string
    pub code: String,

    /// Contract this code declares (e.g., "IntChangeListener")
    pub contract_name: String,
}

impl GeneratedCode {
    /// Create a new GeneratedCode instance.
    pub fn new(code: impl Into<String>, contract_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            contract_name: contract_name.into(),
        }
    }
}

/// Generator features for capability checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorFeature {
    /// Documentation comments from the contract docs
    Documentation,

    /// A configurable header comment
    Headers,

    /// Package declarations
    Packages,

    /// A configurable absent-listener guard in `wrap`
    NullCheck,

    /// `wrap` accepting listeners over a supertype of the boxed type
    ContravariantListeners,
}

impl GeneratorFeature {
    /// Get a human-readable name for this feature.
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorFeature::Documentation => "Documentation",
            GeneratorFeature::Headers => "Headers",
            GeneratorFeature::Packages => "Packages",
            GeneratorFeature::NullCheck => "Null Check",
            GeneratorFeature::ContravariantListeners => "Contravariant Listeners",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert!(config.generate_docs);
        assert!(matches!(config.indent, IndentStyle::Spaces4));
        assert!(matches!(config.line_ending, LineEnding::Lf));
        assert_eq!(config.observable_type, "ObservableValue<{boxed}>");
        assert_eq!(config.null_check, NullCheck::PassThrough);
        assert_eq!(config.runtime_crate, "primlisten");
        assert!(config.package.is_none());
        assert!(config.authors.is_empty());
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_generate_docs(false)
            .with_indent(IndentStyle::Tabs)
            .with_package("com.example.change")
            .with_null_check(NullCheck::Reject)
            .with_author("Jane Doe")
            .with_author("John Roe");

        assert!(!config.generate_docs);
        assert_eq!(config.authors, vec!["Jane Doe", "John Roe"]);
        assert_eq!(config.indent_str(), "\t");
        assert_eq!(config.package_path().as_deref(), Some("com/example/change"));
        assert_eq!(config.null_check, NullCheck::Reject);
    }

    #[test]
    fn test_validate_package() {
        assert!(GeneratorConfig::new().with_package("com.example").validate().is_ok());
        assert!(GeneratorConfig::new().with_package("com..example").validate().is_err());
        assert!(GeneratorConfig::new().with_package("com.1example").validate().is_err());
        assert!(GeneratorConfig::new().with_observable_type(" ").validate().is_err());
    }

    #[test]
    fn test_null_check_parse() {
        assert_eq!(NullCheck::parse("reject"), Some(NullCheck::Reject));
        assert_eq!(NullCheck::parse("pass-through"), Some(NullCheck::PassThrough));
        assert_eq!(NullCheck::parse("panic"), None);
        assert_eq!(NullCheck::Reject.as_str(), "reject");
    }

    #[test]
    fn test_indent_style() {
        assert_eq!(IndentStyle::Spaces2.as_str(), "  ");
        assert_eq!(IndentStyle::Spaces4.as_str(), "    ");
        assert_eq!(IndentStyle::Tabs.as_str(), "\t");
        assert_eq!(IndentStyle::Spaces4.indent(2), "        ");
    }

    #[test]
    fn test_line_ending() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
    }

    #[test]
    fn test_generator_feature_name() {
        assert_eq!(GeneratorFeature::NullCheck.name(), "Null Check");
        assert_eq!(
            GeneratorFeature::ContravariantListeners.name(),
            "Contravariant Listeners"
        );
    }
}
