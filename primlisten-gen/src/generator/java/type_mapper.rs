//! Descriptor to Java type mappings.
//!
//! | Parameter | Java type |
//! |-----------|-----------|
//! | observable | `observable_type` pattern, default `ObservableValue<Boxed>` |
//! | old/new value | the primitive name, e.g. `int` |
//! | listener (`Super`) | `ChangeListener<? super Boxed>` |
//! | listener (`Exact`) | `ChangeListener<Boxed>` |

use crate::generator::traits::GeneratorConfig;
use crate::ir::{render_doc, ListenerBound, ParamType, GENERIC_CONTRACT};
use crate::registry::PrimitiveType;

/// Maps contract parameter types to Java source types.
#[derive(Debug, Clone, Default)]
pub struct JavaTypeMapper;

impl JavaTypeMapper {
    /// Create a new JavaTypeMapper.
    pub fn new() -> Self {
        Self
    }

    /// Map a parameter type to its Java spelling.
    pub fn map_param(
        &self,
        ty: ParamType,
        primitive: &PrimitiveType,
        config: &GeneratorConfig,
    ) -> String {
        match ty {
            ParamType::Observable => self.observable_type(primitive, config),
            ParamType::Value => primitive.name.clone(),
            ParamType::GenericListener(bound) => self.listener_type(primitive, bound),
        }
    }

    /// Expand the configured observable type pattern.
    pub fn observable_type(&self, primitive: &PrimitiveType, config: &GeneratorConfig) -> String {
        config
            .observable_type
            .replace("{boxed}", &primitive.boxed_name)
            .replace("{abbrev}", &primitive.abbreviation)
            .replace("{name}", &primitive.name)
    }

    /// Returns the generic listener type accepted by `wrap`.
    pub fn listener_type(&self, primitive: &PrimitiveType, bound: ListenerBound) -> String {
        match bound {
            ListenerBound::Exact => format!("{}<{}>", GENERIC_CONTRACT, primitive.boxed_name),
            ListenerBound::Super => {
                format!("{}<? super {}>", GENERIC_CONTRACT, primitive.boxed_name)
            }
        }
    }

    /// Convert documentation markup to Javadoc inline tags.
    pub fn javadoc(&self, text: &str) -> String {
        render_doc(
            text,
            |code| format!("{{@code {}}}", code),
            |link| format!("{{@link {}}}", link),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> PrimitiveType {
        PrimitiveType::new("int", "Int", "Integer")
    }

    #[test]
    fn test_map_value_and_listener() {
        let mapper = JavaTypeMapper::new();
        let config = GeneratorConfig::default();

        assert_eq!(mapper.map_param(ParamType::Value, &int(), &config), "int");
        assert_eq!(
            mapper.map_param(ParamType::GenericListener(ListenerBound::Super), &int(), &config),
            "ChangeListener<? super Integer>"
        );
        assert_eq!(
            mapper.listener_type(&int(), ListenerBound::Exact),
            "ChangeListener<Integer>"
        );
    }

    #[test]
    fn test_observable_type_pattern() {
        let mapper = JavaTypeMapper::new();
        assert_eq!(
            mapper.observable_type(&int(), &GeneratorConfig::default()),
            "ObservableValue<Integer>"
        );

        let config = GeneratorConfig::default().with_observable_type("Observable{abbrev}Value");
        assert_eq!(mapper.observable_type(&int(), &config), "ObservableIntValue");
    }

    #[test]
    fn test_javadoc_markup() {
        let mapper = JavaTypeMapper::new();
        assert_eq!(
            mapper.javadoc("A specialized `int` [ChangeListener]."),
            "A specialized {@code int} {@link ChangeListener}."
        );
    }
}
