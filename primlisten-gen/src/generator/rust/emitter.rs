//! Rust code emitter.
//!
//! Renders every contract into one Rust module built on the `primlisten`
//! runtime: a newtype over `Listener<T>` with a `wrap` constructor, and a
//! private adapter implementing the registry hooks of `ChangeListener`.
//!
//! The type test is `specialization() == Some(TypeId::of::<Contract>())`.
//! Hand-written listeners opt into a contract by returning that id from
//! `ChangeListener::specialization`.

use crate::error::GeneratorError;
use crate::generator::code::CodeBuffer;
use crate::generator::rust::type_mapper::RustTypeMapper;
use crate::generator::traits::{
    CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature, OutputLayout,
};
use crate::ir::{AdapterMember, ListenerContractSpec, WrapStep};

/// Module documentation used when none is configured.
pub const DEFAULT_MODULE_DOC: &str = "Specialized primitive change listeners.";

/// Rust module generator.
#[derive(Debug, Clone, Default)]
pub struct RustEmitter {
    type_mapper: RustTypeMapper,
}

impl RustEmitter {
    /// Create a new RustEmitter.
    pub fn new() -> Self {
        Self {
            type_mapper: RustTypeMapper::new(),
        }
    }

    fn doc(&self, buf: &mut CodeBuffer<'_>, text: &str, config: &GeneratorConfig) {
        if !config.generate_docs {
            return;
        }
        for (i, paragraph) in text.split("\n\n").enumerate() {
            if i > 0 {
                buf.line("///");
            }
            for line in paragraph.lines() {
                buf.line(format!("/// {}", self.type_mapper.rustdoc(line.trim())));
            }
        }
    }

    /// Returns the `on_changed` signature, `fn on_changed(&self, ...)`.
    fn callback_signature(&self, contract: &ListenerContractSpec) -> String {
        let params: Vec<String> = contract
            .callback
            .params
            .iter()
            .map(|p| {
                format!(
                    "{}: {}",
                    self.type_mapper.ident(&p.name),
                    self.type_mapper.map_param(p.ty, &contract.primitive)
                )
            })
            .collect();
        format!(
            "fn {}(&self, {})",
            self.type_mapper.ident(&contract.callback.name),
            params.join(", ")
        )
    }

    /// Returns the forwarding call arguments, `observable, old_value, new_value`.
    fn callback_args(&self, contract: &ListenerContractSpec) -> String {
        contract
            .callback
            .param_names()
            .into_iter()
            .map(|name| self.type_mapper.ident(name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn write_contract_type(
        &self,
        buf: &mut CodeBuffer<'_>,
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) {
        let name = &contract.contract_name;
        let handle = self.type_mapper.handle_type(&contract.primitive);
        let wrap = &contract.wrap;
        let listener = self.type_mapper.ident(&wrap.param.name);
        let callback = self.type_mapper.ident(&contract.callback.name);

        self.doc(buf, &contract.docs.summary, config);
        buf.line("#[derive(Clone, PartialEq, Eq, Hash, Debug)]");
        buf.line(format!("pub struct {}({});", name, handle));
        buf.blank();

        buf.block(&format!("impl {} {{", name), "}", |buf| {
            self.doc(buf, &wrap.doc, config);
            let open = format!(
                "pub fn {}({}: {}) -> Self {{",
                self.type_mapper.ident(&wrap.factory_name),
                listener,
                self.type_mapper.map_param(wrap.param.ty, &contract.primitive)
            );
            buf.block(&open, "}", |buf| {
                buf.line(format!("let {0} = {0}.into();", listener));
                for step in &wrap.steps {
                    match step {
                        WrapStep::ReturnIfSpecialized => {
                            let test = format!(
                                "if {}.specialization() == Some(TypeId::of::<Self>()) {{",
                                listener
                            );
                            buf.block(&test, "}", |buf| {
                                buf.line(format!("return Self({});", listener));
                            });
                        }
                        WrapStep::ConstructAdapter { .. } => {
                            buf.line(format!(
                                "Self(Listener::new({} {{ source: {} }}))",
                                contract.adapter_name(),
                                listener
                            ));
                        }
                    }
                }
            });
            buf.blank();

            self.doc(buf, &contract.callback.doc, config);
            buf.block(
                &format!("pub {} {{", self.callback_signature(contract)),
                "}",
                |buf| {
                    buf.line(format!(
                        "self.0.{}({});",
                        callback,
                        self.callback_args(contract)
                    ));
                },
            );
            buf.blank();

            self.doc(buf, "Borrow the listener as a generic handle.", config);
            buf.block(
                &format!("pub fn as_listener(&self) -> &{} {{", handle),
                "}",
                |buf| {
                    buf.line("&self.0");
                },
            );
        });
        buf.blank();

        buf.block(&format!("impl From<{}> for {} {{", name, handle), "}", |buf| {
            buf.block(
                &format!("fn from({}: {}) -> Self {{", listener, name),
                "}",
                |buf| {
                    buf.line(format!("{}.0", listener));
                },
            );
        });
    }

    fn write_adapter(&self, buf: &mut CodeBuffer<'_>, contract: &ListenerContractSpec) {
        let adapter = contract.adapter_name();
        let value = contract.primitive.rust_type();
        let members = contract.wrap.adapter_members();

        buf.block(&format!("struct {} {{", adapter), "}", |buf| {
            buf.line(format!(
                "source: {},",
                self.type_mapper.handle_type(&contract.primitive)
            ));
        });
        buf.blank();

        let open = format!("impl ChangeListener<{}> for {} {{", value, adapter);
        buf.block(&open, "}", |buf| {
            for member in members {
                self.write_member(buf, *member, contract);
                buf.blank();
            }
            buf.block(
                "fn specialization(&self) -> Option<TypeId> {",
                "}",
                |buf| {
                    buf.line(format!("Some(TypeId::of::<{}>())", contract.contract_name));
                },
            );
        });
    }

    fn write_member(
        &self,
        buf: &mut CodeBuffer<'_>,
        member: AdapterMember,
        contract: &ListenerContractSpec,
    ) {
        match member {
            AdapterMember::ForwardCallback => {
                buf.block(
                    &format!("{} {{", self.callback_signature(contract)),
                    "}",
                    |buf| {
                        buf.line(format!(
                            "self.source.{}({});",
                            self.type_mapper.ident(&contract.callback.name),
                            self.callback_args(contract)
                        ));
                    },
                );
            }
            AdapterMember::EqualsSourceOrSelf => {
                buf.block("fn listener_eq(&self, other: ListenerId) -> bool {", "}", |buf| {
                    buf.line("other == self.source.id() || other == ListenerId::of(self)");
                });
                buf.blank();
                buf.block("fn origin(&self) -> ListenerId {", "}", |buf| {
                    buf.line("self.source.origin()");
                });
            }
            AdapterMember::HashOfSource => {
                buf.block("fn listener_hash(&self) -> u64 {", "}", |buf| {
                    buf.line("self.source.listener_hash()");
                });
            }
        }
    }
}

impl CodeGenerator for RustEmitter {
    fn id(&self) -> &'static str {
        "rust"
    }

    fn name(&self) -> &'static str {
        "Rust Module Generator"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn layout(&self) -> OutputLayout {
        OutputLayout::SingleFile
    }

    fn generate(
        &self,
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) -> Result<GeneratedCode, GeneratorError> {
        let mut buf = CodeBuffer::new(config);
        self.write_contract_type(&mut buf, contract, config);
        buf.blank();
        self.write_adapter(&mut buf, contract);
        Ok(GeneratedCode::new(buf.finish(), &contract.contract_name))
    }

    fn generate_preamble(
        &self,
        _contracts: &[&ListenerContractSpec],
        config: &GeneratorConfig,
    ) -> Result<String, GeneratorError> {
        let mut buf = CodeBuffer::new(config);

        if let Some(header) = &config.header {
            for line in header.lines() {
                buf.line(format!("// {}", line).trim_end());
            }
            buf.blank();
        }

        if config.generate_docs {
            let doc = config.module_doc.as_deref().unwrap_or(DEFAULT_MODULE_DOC);
            for line in doc.lines() {
                buf.line(format!("//! {}", line).trim_end());
            }
            buf.blank();
        }

        buf.line("use std::any::TypeId;");
        buf.blank();
        buf.line(format!(
            "use {}::{{ChangeListener, Listener, ListenerId, ObservableValue}};",
            config.runtime_crate
        ));
        buf.blank();

        Ok(buf.finish())
    }

    fn generate_postamble(
        &self,
        _contracts: &[&ListenerContractSpec],
        _config: &GeneratorConfig,
    ) -> Result<String, GeneratorError> {
        Ok(String::new())
    }

    fn supports_feature(&self, feature: GeneratorFeature) -> bool {
        match feature {
            GeneratorFeature::Documentation
            | GeneratorFeature::Headers
            | GeneratorFeature::ContravariantListeners => true,
            // Handles cannot be absent and Rust has no packages.
            GeneratorFeature::NullCheck | GeneratorFeature::Packages => false,
        }
    }
}
