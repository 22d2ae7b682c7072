//! Code generator module.
//!
//! This module defines the code generator trait, the emission driver and
//! the renderers for each target language.

pub mod code;
pub mod contract;
pub mod java;
pub mod rust;
pub mod traits;

pub use code::CodeBuffer;
pub use contract::{Artifact, ContractGenerator};
pub use java::JavaEmitter;
pub use rust::RustEmitter;
pub use traits::{
    CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature, IndentStyle, LineEnding,
    NullCheck, OutputLayout, DEFAULT_OBSERVABLE_TYPE,
};
