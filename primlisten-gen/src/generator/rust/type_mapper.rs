//! Descriptor to Rust type mappings.
//!
//! Generated Rust code builds on the runtime contracts, so parameter types
//! are spelled in terms of `ObservableValue<T>` and `Listener<T>` where `T`
//! is the descriptor's `rust_type`. Identifiers are converted to snake case.

use convert_case::{Case, Casing};

use crate::ir::{render_doc, ParamType};
use crate::registry::PrimitiveType;

/// Maps contract parameter types to Rust source types.
#[derive(Debug, Clone, Default)]
pub struct RustTypeMapper;

impl RustTypeMapper {
    /// Create a new RustTypeMapper.
    pub fn new() -> Self {
        Self
    }

    /// Map a parameter type to its Rust spelling.
    pub fn map_param(&self, ty: ParamType, primitive: &PrimitiveType) -> String {
        let value = primitive.rust_type();
        match ty {
            ParamType::Observable => format!("&dyn ObservableValue<{}>", value),
            ParamType::Value => value.to_string(),
            // Every `ChangeListener<T>` implementor converts into a handle,
            // including listeners generic over all value types.
            ParamType::GenericListener(_) => format!("impl Into<Listener<{}>>", value),
        }
    }

    /// Returns the shared handle type of the contract's listeners.
    pub fn handle_type(&self, primitive: &PrimitiveType) -> String {
        format!("Listener<{}>", primitive.rust_type())
    }

    /// Convert an identifier to a Rust function or variable name.
    pub fn ident(&self, name: &str) -> String {
        name.to_case(Case::Snake)
    }

    /// Convert documentation markup to rustdoc.
    pub fn rustdoc(&self, text: &str) -> String {
        render_doc(text, |code| format!("`{}`", code), |link| format!("[`{}`]", link))
    }
}
