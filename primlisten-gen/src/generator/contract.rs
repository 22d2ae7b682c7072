//! Emission driver.
//!
//! The ContractGenerator walks a type registry in order, builds the contract
//! of each type and renders it through a code generator, producing the
//! output artifacts in the generator's layout.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::GeneratorResult;
use crate::generator::traits::{CodeGenerator, GeneratedCode, GeneratorConfig, OutputLayout};
use crate::ir::ListenerContractSpec;
use crate::registry::TypeRegistry;
use crate::template::{generate_contract, generate_contracts};

/// Stem of the output file for single-file layouts.
pub const DEFAULT_FILE_STEM: &str = "change_listeners";

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path relative to the output directory
    pub path: PathBuf,

    /// File contents
    pub contents: String,

    /// Contracts declared in this file, in order
    pub contracts: Vec<String>,
}

/// Generates listener contract artifacts from a registry.
///
/// The ContractGenerator takes a code generator (like [`JavaEmitter`]) and
/// configuration, then produces complete files from a type registry.
///
/// [`JavaEmitter`]: crate::generator::JavaEmitter
pub struct ContractGenerator<G: CodeGenerator> {
    /// The code generator rendering each contract.
    generator: G,
    /// Configuration for code generation.
    config: GeneratorConfig,
    /// File name for single-file layouts.
    file_name: Option<String>,
}

impl<G: CodeGenerator> ContractGenerator<G> {
    /// Create a new ContractGenerator with the given generator and config.
    pub fn new(generator: G, config: GeneratorConfig) -> Self {
        Self {
            generator,
            config,
            file_name: None,
        }
    }

    /// Set the output file name used by single-file layouts.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Get a reference to the underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the output file name used by single-file layouts.
    pub fn file_name(&self) -> String {
        self.file_name.clone().unwrap_or_else(|| {
            format!("{}.{}", DEFAULT_FILE_STEM, self.generator.file_extension())
        })
    }

    /// Generate every artifact for a registry.
    ///
    /// Contracts are emitted in registry order. With a per-contract layout
    /// each file is named after its contract and placed under the package
    /// path; otherwise all contracts go into one file.
    pub fn generate(&self, registry: &TypeRegistry) -> GeneratorResult<Vec<Artifact>> {
        self.config.validate()?;

        let contracts = self.contracts(registry);
        info!(
            generator = self.generator.id(),
            contracts = contracts.len(),
            "generating listener contracts"
        );

        let artifacts = match self.generator.layout() {
            OutputLayout::FilePerContract => contracts
                .iter()
                .map(|contract| -> GeneratorResult<Artifact> {
                    let mut path = self
                        .config
                        .package_path()
                        .map(PathBuf::from)
                        .unwrap_or_default();
                    path.push(format!(
                        "{}.{}",
                        contract.contract_name,
                        self.generator.file_extension()
                    ));
                    Ok(Artifact {
                        path,
                        contents: self.render_file(&[contract])?,
                        contracts: vec![contract.contract_name.clone()],
                    })
                })
                .collect::<GeneratorResult<Vec<_>>>()?,
            OutputLayout::SingleFile => {
                let refs: Vec<&ListenerContractSpec> = contracts.iter().collect();
                vec![Artifact {
                    path: PathBuf::from(self.file_name()),
                    contents: self.render_file(&refs)?,
                    contracts: contracts.iter().map(|c| c.contract_name.clone()).collect(),
                }]
            }
        };

        Ok(artifacts)
    }

    /// Generate every contract into a single text, in registry order.
    ///
    /// Layout is ignored: the preamble is emitted once, followed by all
    /// contracts and the postamble.
    pub fn generate_single(&self, registry: &TypeRegistry) -> GeneratorResult<String> {
        self.config.validate()?;

        let contracts = self.contracts(registry);
        let refs: Vec<&ListenerContractSpec> = contracts.iter().collect();
        self.render_file(&refs)
    }

    /// Render the contract of one registered type, by abbreviation.
    ///
    /// Fails with `UnknownType` if the abbreviation is not registered.
    pub fn generate_contract(
        &self,
        registry: &TypeRegistry,
        abbreviation: &str,
    ) -> GeneratorResult<GeneratedCode> {
        self.config.validate()?;

        let descriptor = registry.resolve(abbreviation)?;
        let mut contract = generate_contract(descriptor);
        contract.docs.authors.extend(self.config.authors.iter().cloned());
        self.generator.generate(&contract, &self.config)
    }

    fn contracts(&self, registry: &TypeRegistry) -> Vec<ListenerContractSpec> {
        let mut contracts = generate_contracts(registry);
        for contract in &mut contracts {
            contract.docs.authors.extend(self.config.authors.iter().cloned());
        }
        contracts
    }

    fn render_file(&self, contracts: &[&ListenerContractSpec]) -> GeneratorResult<String> {
        let mut output = self.generator.generate_preamble(contracts, &self.config)?;

        for (i, contract) in contracts.iter().enumerate() {
            if i > 0 {
                output.push_str(self.config.line_ending_str());
            }
            let generated = self.generator.generate(contract, &self.config)?;
            debug!(contract = %generated.contract_name, "rendered contract");
            output.push_str(&generated.code);
        }

        output.push_str(&self.generator.generate_postamble(contracts, &self.config)?);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GeneratorError, RegistryError};
    use crate::generator::traits::GeneratorFeature;
    use crate::generator::{JavaEmitter, RustEmitter};
    use crate::registry::PrimitiveType;

    /// A simple mock generator for testing.
    struct MockGenerator(OutputLayout);

    impl CodeGenerator for MockGenerator {
        fn id(&self) -> &'static str {
            "mock"
        }

        fn name(&self) -> &'static str {
            "Mock Generator"
        }

        fn file_extension(&self) -> &'static str {
            "txt"
        }

        fn layout(&self) -> OutputLayout {
            self.0
        }

        fn generate(
            &self,
            contract: &ListenerContractSpec,
            _config: &GeneratorConfig,
        ) -> Result<GeneratedCode, GeneratorError> {
            Ok(GeneratedCode::new(
                format!("contract {};\n", contract.contract_name),
                contract.contract_name.clone(),
            ))
        }

        fn generate_preamble(
            &self,
            contracts: &[&ListenerContractSpec],
            _config: &GeneratorConfig,
        ) -> Result<String, GeneratorError> {
            Ok(format!("// {} contracts\n", contracts.len()))
        }

        fn generate_postamble(
            &self,
            _contracts: &[&ListenerContractSpec],
            _config: &GeneratorConfig,
        ) -> Result<String, GeneratorError> {
            Ok("// end\n".to_string())
        }

        fn supports_feature(&self, _feature: GeneratorFeature) -> bool {
            true
        }
    }

    fn int_double() -> TypeRegistry {
        TypeRegistry::from_descriptors([
            PrimitiveType::new("int", "I", "Integer"),
            PrimitiveType::new("double", "D", "Double"),
        ])
        .unwrap()
    }

    #[test]
    fn test_generate_empty_registry() {
        let contract = ContractGenerator::new(
            MockGenerator(OutputLayout::SingleFile),
            GeneratorConfig::default(),
        );

        let artifacts = contract.generate(&TypeRegistry::new()).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].contents, "// 0 contracts\n// end\n");
        assert!(artifacts[0].contracts.is_empty());
    }

    #[test]
    fn test_single_file_layout_keeps_registry_order() {
        let contract = ContractGenerator::new(
            MockGenerator(OutputLayout::SingleFile),
            GeneratorConfig::default(),
        );

        let artifacts = contract.generate(&int_double()).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path, PathBuf::from("change_listeners.txt"));
        assert_eq!(
            artifacts[0].contents,
            "// 2 contracts\ncontract IChangeListener;\n\ncontract DChangeListener;\n// end\n"
        );
        assert_eq!(artifacts[0].contracts, vec!["IChangeListener", "DChangeListener"]);
    }

    #[test]
    fn test_file_per_contract_layout() {
        let contract = ContractGenerator::new(
            MockGenerator(OutputLayout::FilePerContract),
            GeneratorConfig::default().with_package("com.example"),
        );

        let artifacts = contract.generate(&int_double()).unwrap();
        let paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("com/example/IChangeListener.txt"),
                PathBuf::from("com/example/DChangeListener.txt"),
            ]
        );
        assert_eq!(
            artifacts[1].contents,
            "// 1 contracts\ncontract DChangeListener;\n// end\n"
        );
    }

    #[test]
    fn test_custom_file_name() {
        let contract = ContractGenerator::new(RustEmitter::new(), GeneratorConfig::default())
            .with_file_name("listeners.rs");
        let artifacts = contract.generate(&int_double()).unwrap();
        assert_eq!(artifacts[0].path, PathBuf::from("listeners.rs"));
    }

    #[test]
    fn test_generate_single_ignores_layout() {
        let contract = ContractGenerator::new(JavaEmitter::new(), GeneratorConfig::default());
        let text = contract.generate_single(&int_double()).unwrap();

        let i = text.find("public interface IChangeListener").unwrap();
        let d = text.find("public interface DChangeListener").unwrap();
        assert!(i < d);
    }

    #[test]
    fn test_generate_contract_unknown_type() {
        let contract = ContractGenerator::new(JavaEmitter::new(), GeneratorConfig::default());

        let err = contract.generate_contract(&int_double(), "F").unwrap_err();
        assert_eq!(err, GeneratorError::Registry(RegistryError::unknown_type("F")));

        let code = contract.generate_contract(&int_double(), "D").unwrap();
        assert_eq!(code.contract_name, "DChangeListener");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let contract = ContractGenerator::new(
            JavaEmitter::new(),
            GeneratorConfig::default().with_package("com..example"),
        );
        assert!(matches!(
            contract.generate(&int_double()),
            Err(GeneratorError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_configured_authors_reach_every_contract() {
        let contract = ContractGenerator::new(
            JavaEmitter::new(),
            GeneratorConfig::default().with_author("Jane Doe"),
        );

        let artifacts = contract.generate(&int_double()).unwrap();
        assert!(artifacts
            .iter()
            .all(|a| a.contents.contains(" * @author Jane Doe\n * @since 1.0.0\n")));

        let code = contract.generate_contract(&int_double(), "D").unwrap();
        assert!(code.code.contains(" * @author Jane Doe\n"));
    }

    #[test]
    fn test_generate_contract_rejects_invalid_config() {
        let contract = ContractGenerator::new(
            JavaEmitter::new(),
            GeneratorConfig::default().with_package("com.1x"),
        );
        assert!(matches!(
            contract.generate_contract(&int_double(), "I"),
            Err(GeneratorError::InvalidConfig { .. })
        ));
    }
}
