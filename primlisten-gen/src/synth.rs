//! Wrap-Adapter Synthesizer.
//!
//! Describes the body of the `wrap` factory for one primitive type. The
//! algorithm is the same for every type:
//!
//! 1. If the input already conforms to the specialized contract, return it.
//! 2. Otherwise construct an adapter that forwards `onChanged` verbatim, is
//!    equal exactly to its source or to itself, and hashes like its source.
//!
//! Renderers emit this description as code; nothing here runs an adapter.
//! The runtime counterpart is `primlisten::PrimitiveListener::wrap`.

use crate::ir::{
    AdapterMember, ListenerBound, ParamType, Parameter, WrapAdapterSpec, WrapStep,
    FACTORY_NAME, GENERIC_CONTRACT,
};
use crate::registry::{contract_name_of, PrimitiveType};
use crate::template::SINCE;

/// The members every adapter overrides, in emission order.
pub const ADAPTER_MEMBERS: [AdapterMember; 3] = [
    AdapterMember::ForwardCallback,
    AdapterMember::EqualsSourceOrSelf,
    AdapterMember::HashOfSource,
];

/// Synthesize the `wrap` factory for one primitive type.
pub fn synthesize_wrap(descriptor: &PrimitiveType) -> WrapAdapterSpec {
    let contract = contract_name_of(descriptor);

    WrapAdapterSpec {
        factory_name: FACTORY_NAME.to_string(),
        param: Parameter::new(
            "listener",
            ParamType::GenericListener(ListenerBound::Super),
            "the listener to be wrapped",
        ),
        returns: contract,
        steps: vec![
            WrapStep::ReturnIfSpecialized,
            WrapStep::ConstructAdapter {
                members: ADAPTER_MEMBERS.to_vec(),
            },
        ],
        doc: format!(
            "Returns a specialized [{generic}] wrapping around the given one. However, if the \
             given `listener` already is a specialized listener of the same type, it is simply \
             returned.\n\n\
             The wrapper's hashcode is the same as the hashcode of the wrapped listener. The \
             wrapper's `equals()` method only returns true if the wrapped listener is passed as \
             argument.",
            generic = GENERIC_CONTRACT,
        ),
        return_doc: format!(
            "a specialized {} wrapping around the given one",
            GENERIC_CONTRACT
        ),
        since: Some(SINCE.to_string()),
    }
}
