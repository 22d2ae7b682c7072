//! Java interface generator.
//!
//! Renders each contract as a Java `@FunctionalInterface` in its own file,
//! in the shape of the hand-maintained listener library it replaces.
//!
//! # Components
//!
//! - [`JavaEmitter`] - The code generator implementing [`CodeGenerator`](crate::generator::CodeGenerator)
//! - [`JavaTypeMapper`] - Maps contract parameter types to Java types

pub mod emitter;
pub mod type_mapper;

pub use emitter::JavaEmitter;
pub use type_mapper::JavaTypeMapper;
