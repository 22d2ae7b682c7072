//! Contract IR definitions.
//!
//! This module defines the intermediate representation of one specialized
//! listener contract: its callback signature, its `wrap` factory and the
//! documentation attached to both. Renderers turn it into target source.
//!
//! Documentation text uses a small markup shared by every renderer:
//! `` `code` `` for code spans and `[Name]` for links to another type.

use serde::{Deserialize, Serialize};

use crate::registry::PrimitiveType;

/// Name of the single callback method of every contract.
pub const CALLBACK_NAME: &str = "onChanged";

/// Name of the static factory attached to every contract.
pub const FACTORY_NAME: &str = "wrap";

/// Name of the generic (unspecialized) listener contract.
pub const GENERIC_CONTRACT: &str = "ChangeListener";

/// One specialized listener contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerContractSpec {
    /// Contract name, `<Abbreviation>ChangeListener`
    pub contract_name: String,

    /// Primitive type the contract is bound to
    pub primitive: PrimitiveType,

    /// The single abstract callback
    pub callback: CallbackSignature,

    /// The static factory adapting generic listeners
    pub wrap: WrapAdapterSpec,

    /// Contract-level documentation
    pub docs: ContractDocs,
}

impl ListenerContractSpec {
    /// Returns the name of the adapter type a renderer declares for `wrap`.
    pub fn adapter_name(&self) -> String {
        format!("{}Adapter", self.contract_name)
    }
}

/// Signature of the `onChanged` callback.
///
/// The shape is fixed: `(observable, oldValue, newValue) -> void`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackSignature {
    /// Method name
    pub name: String,

    /// Parameters in declaration order
    pub params: Vec<Parameter>,

    /// Method documentation
    pub doc: String,

    /// Version the callback first appeared in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

impl CallbackSignature {
    /// Returns the parameter names in declaration order.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name in the target source
    pub name: String,

    /// Parameter type
    pub ty: ParamType,

    /// Parameter documentation
    pub doc: String,
}

impl Parameter {
    /// Create a new parameter.
    pub fn new(name: impl Into<String>, ty: ParamType, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            doc: doc.into(),
        }
    }
}

/// Type of a contract parameter, relative to the contract's primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// The observable whose value changed
    Observable,

    /// A value of the primitive type
    Value,

    /// A generic listener over the boxed type, with the given bound
    GenericListener(ListenerBound),
}

/// How a generic listener parameter relates to the boxed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerBound {
    /// Listeners bound to exactly the boxed type
    Exact,

    /// Listeners bound to the boxed type or any supertype of it
    Super,
}

/// The `wrap` factory attached to a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapAdapterSpec {
    /// Factory name
    pub factory_name: String,

    /// The listener to adapt
    pub param: Parameter,

    /// Contract name the factory returns
    pub returns: String,

    /// Body of the factory, executed in order
    pub steps: Vec<WrapStep>,

    /// Factory documentation
    pub doc: String,

    /// Documentation of the returned value
    pub return_doc: String,

    /// Version the factory first appeared in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

impl WrapAdapterSpec {
    /// Returns the members of the adapter this factory constructs.
    pub fn adapter_members(&self) -> &[AdapterMember] {
        self.steps
            .iter()
            .find_map(|step| match step {
                WrapStep::ConstructAdapter { members } => Some(members.as_slice()),
                WrapStep::ReturnIfSpecialized => None,
            })
            .unwrap_or(&[])
    }

    /// Check if the factory returns already specialized listeners unchanged.
    pub fn short_circuits(&self) -> bool {
        self.steps
            .first()
            .is_some_and(|step| *step == WrapStep::ReturnIfSpecialized)
    }
}

/// One step of the `wrap` algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum WrapStep {
    /// Return the input unchanged if it already conforms to this contract
    ReturnIfSpecialized,

    /// Build and return an adapter with the given members
    ConstructAdapter { members: Vec<AdapterMember> },
}

/// A member the adapter overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterMember {
    /// Forward `onChanged` verbatim to the source
    ForwardCallback,

    /// Equal iff the other value is the source or the adapter itself
    EqualsSourceOrSelf,

    /// Hash code of the source
    HashOfSource,
}

/// Contract-level documentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractDocs {
    /// One-line summary of the contract
    pub summary: String,

    /// Version the contract first appeared in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,

    /// Authors credited on the contract
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

/// A span of documentation markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocSpan<'a> {
    /// Plain text
    Text(&'a str),

    /// A code span, written `` `code` ``
    Code(&'a str),

    /// A link to a type, written `[Name]`
    Link(&'a str),
}

/// Split documentation markup into spans.
///
/// Unterminated markers are kept as plain text.
pub fn doc_spans(text: &str) -> Vec<DocSpan<'_>> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(['`', '[']) {
        let close = if rest[start..].starts_with('`') { '`' } else { ']' };
        let Some(len) = rest[start + 1..].find(close) else {
            break;
        };

        if start > 0 {
            spans.push(DocSpan::Text(&rest[..start]));
        }
        let inner = &rest[start + 1..start + 1 + len];
        spans.push(if close == '`' {
            DocSpan::Code(inner)
        } else {
            DocSpan::Link(inner)
        });
        rest = &rest[start + len + 2..];
    }

    if !rest.is_empty() {
        spans.push(DocSpan::Text(rest));
    }
    spans
}

/// Render documentation markup with one function per span kind.
pub fn render_doc(
    text: &str,
    code: impl Fn(&str) -> String,
    link: impl Fn(&str) -> String,
) -> String {
    doc_spans(text)
        .into_iter()
        .map(|span| match span {
            DocSpan::Text(t) => t.to_string(),
            DocSpan::Code(c) => code(c),
            DocSpan::Link(l) => link(l),
        })
        .collect()
}
