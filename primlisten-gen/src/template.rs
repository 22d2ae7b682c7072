//! Contract Template.
//!
//! Builds the [`ListenerContractSpec`] of one primitive type: its name, the
//! single `onChanged` callback and the `wrap` factory.

use crate::ir::{
    CallbackSignature, ContractDocs, ListenerContractSpec, ParamType, Parameter, CALLBACK_NAME,
    GENERIC_CONTRACT,
};
use crate::registry::{contract_name_of, PrimitiveType, TypeRegistry};
use crate::synth::synthesize_wrap;

/// Version the contracts first shipped in.
pub const SINCE: &str = "1.0.0";

/// Generate the contract of one primitive type.
pub fn generate_contract(descriptor: &PrimitiveType) -> ListenerContractSpec {
    ListenerContractSpec {
        contract_name: contract_name_of(descriptor),
        primitive: descriptor.clone(),
        callback: callback_signature(),
        wrap: synthesize_wrap(descriptor),
        docs: ContractDocs {
            summary: format!(
                "A specialized `{}` [{}].",
                descriptor.name, GENERIC_CONTRACT
            ),
            since: Some(SINCE.to_string()),
            authors: Vec::new(),
        },
    }
}

/// Generate the contracts of every registered type, in registry order.
pub fn generate_contracts(registry: &TypeRegistry) -> Vec<ListenerContractSpec> {
    registry.iter().map(generate_contract).collect()
}

fn callback_signature() -> CallbackSignature {
    CallbackSignature {
        name: CALLBACK_NAME.to_string(),
        params: vec![
            Parameter::new(
                "observable",
                ParamType::Observable,
                "the observable whose value has changed",
            ),
            Parameter::new("oldValue", ParamType::Value, "the old value"),
            Parameter::new("newValue", ParamType::Value, "the new value"),
        ],
        doc: "Processes a value change of an ObservableValue this listener is attached to."
            .to_string(),
        since: Some(SINCE.to_string()),
    }
}
