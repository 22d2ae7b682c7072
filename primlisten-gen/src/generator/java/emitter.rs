//! Java code emitter.
//!
//! Renders each contract as a `@FunctionalInterface` with its `onChanged`
//! callback and a static `wrap` factory. The factory body is the wrap
//! algorithm: an `instanceof` test that returns specialized listeners
//! unchanged, then an anonymous adapter overriding `onChanged`, `equals` and
//! `hashCode`.

use crate::error::GeneratorError;
use crate::generator::code::CodeBuffer;
use crate::generator::java::type_mapper::JavaTypeMapper;
use crate::generator::traits::{
    CodeGenerator, GeneratedCode, GeneratorConfig, GeneratorFeature, NullCheck, OutputLayout,
};
use crate::ir::{AdapterMember, ListenerContractSpec, Parameter, WrapStep};

/// Java interface generator.
#[derive(Debug, Clone, Default)]
pub struct JavaEmitter {
    type_mapper: JavaTypeMapper,
}

impl JavaEmitter {
    /// Create a new JavaEmitter.
    pub fn new() -> Self {
        Self {
            type_mapper: JavaTypeMapper::new(),
        }
    }

    fn params(
        &self,
        params: &[Parameter],
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) -> String {
        params
            .iter()
            .map(|p| {
                format!(
                    "{} {}",
                    self.type_mapper.map_param(p.ty, &contract.primitive, config),
                    p.name
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn callback_declaration(
        &self,
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) -> String {
        format!(
            "void {}({})",
            contract.callback.name,
            self.params(&contract.callback.params, contract, config)
        )
    }

    /// Write a Javadoc block. Paragraphs in `text` are separated by blank lines.
    fn javadoc(&self, buf: &mut CodeBuffer<'_>, text: &str, tags: &[String]) {
        buf.line("/**");
        for (i, paragraph) in text.split("\n\n").enumerate() {
            if i > 0 {
                buf.line(" *");
            }
            for line in paragraph.lines() {
                buf.line(format!(" * {}", self.type_mapper.javadoc(line.trim())));
            }
        }
        if !tags.is_empty() {
            buf.line(" *");
            for tag in tags {
                buf.line(format!(" * {}", tag));
            }
        }
        buf.line(" */");
    }

    fn write_callback(
        &self,
        buf: &mut CodeBuffer<'_>,
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) {
        if config.generate_docs {
            let mut tags: Vec<String> = contract
                .callback
                .params
                .iter()
                .map(|p| format!("@param {} {}", p.name, p.doc))
                .collect();
            tags.extend(contract.callback.since.iter().map(|v| format!("@since {}", v)));
            self.javadoc(buf, &contract.callback.doc, &tags);
        }
        buf.line(format!("{};", self.callback_declaration(contract, config)));
    }

    fn write_wrap(
        &self,
        buf: &mut CodeBuffer<'_>,
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) {
        let wrap = &contract.wrap;
        let name = &contract.contract_name;
        let listener = &wrap.param.name;

        if config.generate_docs {
            let mut tags = vec![
                format!("@param {} {}", listener, wrap.param.doc),
                format!("@return {}", wrap.return_doc),
            ];
            tags.extend(wrap.since.iter().map(|v| format!("@since {}", v)));
            self.javadoc(buf, &wrap.doc, &tags);
        }

        let open = format!(
            "static {} {}({}) {{",
            wrap.returns,
            wrap.factory_name,
            self.params(std::slice::from_ref(&wrap.param), contract, config)
        );
        buf.block(&open, "}", |buf| {
            if config.null_check == NullCheck::Reject {
                buf.line(format!(
                    "Objects.requireNonNull({0}, \"{0}\");",
                    listener
                ));
            }

            let mut expr = String::from("return ");
            for step in &wrap.steps {
                match step {
                    WrapStep::ReturnIfSpecialized => expr.push_str(&format!(
                        "({listener} instanceof {name}) ? ({name}) {listener} : "
                    )),
                    WrapStep::ConstructAdapter { members } => {
                        buf.block(&format!("{}new {}() {{", expr, name), "};", |buf| {
                            buf.blank();
                            for member in members {
                                self.write_member(buf, *member, contract, config);
                                buf.blank();
                            }
                        });
                    }
                }
            }
        });
    }

    fn write_member(
        &self,
        buf: &mut CodeBuffer<'_>,
        member: AdapterMember,
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) {
        let listener = &contract.wrap.param.name;
        buf.line("@Override");
        match member {
            AdapterMember::ForwardCallback => {
                let open = format!("public {} {{", self.callback_declaration(contract, config));
                buf.block(&open, "}", |buf| {
                    buf.line(format!(
                        "{}.{}({});",
                        listener,
                        contract.callback.name,
                        contract.callback.param_names().join(", ")
                    ));
                });
            }
            AdapterMember::EqualsSourceOrSelf => {
                buf.block("public boolean equals(Object other) {", "}", |buf| {
                    buf.line(format!("return other == {} || other == this;", listener));
                });
            }
            AdapterMember::HashOfSource => {
                buf.block("public int hashCode() {", "}", |buf| {
                    buf.line(format!("return {}.hashCode();", listener));
                });
            }
        }
    }
}

impl CodeGenerator for JavaEmitter {
    fn id(&self) -> &'static str {
        "java"
    }

    fn name(&self) -> &'static str {
        "Java Interface Generator"
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn layout(&self) -> OutputLayout {
        OutputLayout::FilePerContract
    }

    fn generate(
        &self,
        contract: &ListenerContractSpec,
        config: &GeneratorConfig,
    ) -> Result<GeneratedCode, GeneratorError> {
        let mut buf = CodeBuffer::new(config);

        if config.generate_docs {
            let docs = &contract.docs;
            let tags: Vec<String> = docs
                .authors
                .iter()
                .map(|author| format!("@author {}", author))
                .chain(docs.since.iter().map(|since| format!("@since {}", since)))
                .collect();
            self.javadoc(&mut buf, &contract.docs.summary, &tags);
        }
        buf.line("@FunctionalInterface");

        let open = format!("public interface {} {{", contract.contract_name);
        buf.block(&open, "}", |buf| {
            buf.blank();
            self.write_callback(buf, contract, config);
            buf.blank();
            self.write_wrap(buf, contract, config);
            buf.blank();
        });

        Ok(GeneratedCode::new(buf.finish(), &contract.contract_name))
    }

    fn generate_preamble(
        &self,
        _contracts: &[&ListenerContractSpec],
        config: &GeneratorConfig,
    ) -> Result<String, GeneratorError> {
        let mut buf = CodeBuffer::new(config);

        if let Some(header) = &config.header {
            buf.line("/*");
            for line in header.lines() {
                buf.line(format!(" * {}", line).trim_end());
            }
            buf.line(" */").blank();
        }

        if let Some(package) = &config.package {
            buf.line(format!("package {};", package)).blank();
        }

        if config.null_check == NullCheck::Reject {
            buf.line("import java.util.Objects;").blank();
        }

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
            | GeneratorFeature::Packages
            | GeneratorFeature::NullCheck
            | GeneratorFeature::ContravariantListeners => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PrimitiveType;
    use crate::template::generate_contract;

    fn emitter() -> JavaEmitter {
        JavaEmitter::new()
    }

    fn int_contract() -> ListenerContractSpec {
        generate_contract(&PrimitiveType::new("int", "I", "Integer"))
    }

    fn render(config: &GeneratorConfig) -> String {
        emitter().generate(&int_contract(), config).unwrap().code
    }

    #[test]
    fn test_emitter_metadata() {
        let emitter = emitter();
        assert_eq!(emitter.id(), "java");
        assert_eq!(emitter.file_extension(), "java");
        assert_eq!(emitter.layout(), OutputLayout::FilePerContract);
        assert!(emitter.supports_feature(GeneratorFeature::NullCheck));
    }

    #[test]
    fn test_interface_declaration() {
        let code = render(&GeneratorConfig::default());
        assert!(code.contains("@FunctionalInterface\npublic interface IChangeListener {"));
        assert!(code.contains(
            "    void onChanged(ObservableValue<Integer> observable, int oldValue, int newValue);"
        ));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn test_wrap_body() {
        let code = render(&GeneratorConfig::default().with_generate_docs(false));
        assert!(code.contains(
            "    static IChangeListener wrap(ChangeListener<? super Integer> listener) {"
        ));
        assert!(code.contains(
            "        return (listener instanceof IChangeListener) ? (IChangeListener) listener : new IChangeListener() {"
        ));
        assert!(code.contains("                listener.onChanged(observable, oldValue, newValue);"));
        assert!(code.contains("                return other == listener || other == this;"));
        assert!(code.contains("                return listener.hashCode();"));
        assert!(code.contains("        };\n    }\n"));
        assert!(!code.contains("requireNonNull"));
        assert!(!code.contains("/**"));
    }

    #[test]
    fn test_null_check_reject() {
        let config = GeneratorConfig::default().with_null_check(NullCheck::Reject);
        let code = render(&config);
        let guard = code.find("Objects.requireNonNull(listener, \"listener\");").unwrap();
        let test = code.find("instanceof").unwrap();
        assert!(guard < test);

        let preamble = emitter().generate_preamble(&[], &config).unwrap();
        assert!(preamble.contains("import java.util.Objects;"));
    }

    #[test]
    fn test_javadoc() {
        let code = render(&GeneratorConfig::default());
        assert!(code.starts_with("/**\n * A specialized {@code int} {@link ChangeListener}.\n *\n * @since 1.0.0\n */\n"));
        assert!(code.contains("     * @param observable the observable whose value has changed"));
        assert!(code.contains("     * @return a specialized ChangeListener wrapping around the given one"));
        assert!(code.contains("if the given {@code listener} already is"));
    }

    #[test]
    fn test_method_javadoc_ends_with_since() {
        let code = render(&GeneratorConfig::default());
        assert!(code.contains(
            "     * @param newValue the new value\n     * @since 1.0.0\n     */\n    void onChanged("
        ));
        assert!(code.contains(
            "     * @return a specialized ChangeListener wrapping around the given one\n     * @since 1.0.0\n     */\n    static IChangeListener wrap("
        ));
    }

    #[test]
    fn test_authors_precede_since() {
        let mut contract = int_contract();
        contract.docs.authors = vec!["Jane Doe".to_string(), "John Roe".to_string()];

        let code = emitter()
            .generate(&contract, &GeneratorConfig::default())
            .unwrap()
            .code;
        assert!(code.contains(
            " *\n * @author Jane Doe\n * @author John Roe\n * @since 1.0.0\n */\n@FunctionalInterface"
        ));
    }

    #[test]
    fn test_preamble_header_and_package() {
        let config = GeneratorConfig::default()
            .with_header("Copyright (c) Example\n\nAll rights reserved.")
            .with_package("com.example.change");
        let preamble = emitter().generate_preamble(&[], &config).unwrap();
        assert_eq!(
            preamble,
            "/*\n * Copyright (c) Example\n *\n * All rights reserved.\n */\n\npackage com.example.change;\n\n"
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let config = GeneratorConfig::default().with_line_ending(crate::generator::LineEnding::CrLf);
        let code = render(&config);
        assert!(code.contains("@FunctionalInterface\r\n"));
        assert!(!code.replace("\r\n", "").contains('\n'));
    }
}
