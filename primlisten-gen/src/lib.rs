//! # primlisten-gen
//!
//! Generator for specialized primitive change-listener contracts.
//!
//! For every primitive type in a [`TypeRegistry`] the generator builds a
//! contract named `<Abbreviation>ChangeListener` with a single `onChanged`
//! callback and a static `wrap` factory adapting generic listeners, then
//! renders it as Java interfaces or as a Rust module on top of the
//! `primlisten` runtime.
//!
//! ## Pipeline
//!
//! | Stage | Item |
//! |-------|------|
//! | Type Registry | [`TypeRegistry`] |
//! | Contract Template | [`generate_contract`] |
//! | Wrap-Adapter Synthesizer | [`synthesize_wrap`] |
//! | Emission Driver | [`ContractGenerator`] |
//!
//! ## Usage
//!
//! ```rust
//! use primlisten_gen::generator::{ContractGenerator, GeneratorConfig, JavaEmitter};
//! use primlisten_gen::{PrimitiveType, TypeRegistry};
//!
//! let registry = TypeRegistry::from_descriptors([
//!     PrimitiveType::new("int", "I", "Integer"),
//!     PrimitiveType::new("double", "D", "Double"),
//! ])?;
//! assert_eq!(registry.contract_type("I")?, "IChangeListener");
//! assert!(registry.contract_type("F").is_err());
//!
//! let generator = ContractGenerator::new(
//!     JavaEmitter::new(),
//!     GeneratorConfig::default().with_package("com.example.change"),
//! );
//! let artifacts = generator.generate(&registry)?;
//! assert_eq!(artifacts.len(), 2);
//! assert!(artifacts[0].contents.contains("public interface IChangeListener"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod generator;
pub mod ir;
pub mod registry;
pub mod synth;
pub mod template;

pub use error::{GeneratorError, GeneratorResult, RegistryError};
pub use generator::{Artifact, CodeGenerator, ContractGenerator, GeneratorConfig};
pub use ir::{ListenerContractSpec, WrapAdapterSpec};
pub use registry::{PrimitiveType, TypeRegistry, CONTRACT_SUFFIX};
pub use synth::synthesize_wrap;
pub use template::{generate_contract, generate_contracts};
