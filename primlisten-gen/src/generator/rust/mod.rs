//! Rust module generator.
//!
//! Renders all contracts into a single module that depends on the
//! `primlisten` runtime crate.

pub mod emitter;
pub mod type_mapper;

pub use emitter::RustEmitter;
pub use type_mapper::RustTypeMapper;
