//! Type Registry holding the primitive descriptors to specialize.
//!
//! The registry is an ordered set of [`PrimitiveType`] descriptors. Order only
//! decides the order contracts are emitted in; the abbreviation of each
//! descriptor is unique because it determines the contract's name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Suffix appended to an abbreviation to form a contract name.
pub const CONTRACT_SUFFIX: &str = "ChangeListener";

/// One primitive value kind eligible for specialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveType {
    /// Canonical identifier, e.g. `int`.
    pub name: String,

    /// Short code the contract name is built from, e.g. `Int`.
    pub abbreviation: String,

    /// Reference/boxed counterpart, e.g. `Integer`.
    #[serde(rename = "boxed")]
    pub boxed_name: String,

    /// Rust spelling of the value type, e.g. `i32`. Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rust_type: Option<String>,
}

impl PrimitiveType {
    /// Create a new descriptor.
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        boxed_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            boxed_name: boxed_name.into(),
            rust_type: None,
        }
    }

    /// Set the Rust spelling of the value type.
    pub fn with_rust_type(mut self, rust_type: impl Into<String>) -> Self {
        self.rust_type = Some(rust_type.into());
        self
    }

    /// Returns the Rust spelling of the value type.
    pub fn rust_type(&self) -> &str {
        self.rust_type.as_deref().unwrap_or(&self.name)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        let fields = [
            ("name", &self.name),
            ("abbreviation", &self.abbreviation),
            ("boxed", &self.boxed_name),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(RegistryError::invalid_descriptor(
                    &self.name,
                    format!("'{}' must not be empty", field),
                ));
            }
        }

        let mut chars = self.abbreviation.chars();
        let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric()) {
            return Err(RegistryError::invalid_descriptor(
                &self.name,
                format!(
                    "abbreviation '{}' must be an ASCII letter followed by letters or digits",
                    self.abbreviation
                ),
            ));
        }

        Ok(())
    }
}

/// Builds a contract name without checking registration.
pub(crate) fn contract_name_of(descriptor: &PrimitiveType) -> String {
    format!("{}{}", descriptor.abbreviation, CONTRACT_SUFFIX)
}

/// Ordered registry of primitive type descriptors.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// Descriptors in registration order
    types: Vec<PrimitiveType>,

    /// Abbreviation -> position in `types`
    index: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The eight primitive types of the Java platform.
    pub fn standard() -> Self {
        let standard = [
            ("boolean", "Bool", "Boolean", "bool"),
            ("byte", "Byte", "Byte", "i8"),
            ("char", "Char", "Character", "char"),
            ("double", "Double", "Double", "f64"),
            ("float", "Float", "Float", "f32"),
            ("int", "Int", "Integer", "i32"),
            ("long", "Long", "Long", "i64"),
            ("short", "Short", "Short", "i16"),
        ];

        let mut registry = Self::new();
        for (name, abbreviation, boxed, rust) in standard {
            registry.push(PrimitiveType::new(name, abbreviation, boxed).with_rust_type(rust));
        }
        registry
    }

    /// Build a registry from configured descriptors, in the given order.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = PrimitiveType>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Register a descriptor at the end of the registry.
    ///
    /// Fails if the descriptor is invalid or its abbreviation is taken.
    pub fn register(&mut self, descriptor: PrimitiveType) -> Result<(), RegistryError> {
        descriptor.validate()?;

        if let Some(&existing) = self.index.get(&descriptor.abbreviation) {
            return Err(RegistryError::DuplicateAbbreviation {
                abbreviation: descriptor.abbreviation,
                existing: self.types[existing].name.clone(),
                name: descriptor.name,
            });
        }

        self.push(descriptor);
        Ok(())
    }

    fn push(&mut self, descriptor: PrimitiveType) {
        self.index
            .insert(descriptor.abbreviation.clone(), self.types.len());
        self.types.push(descriptor);
    }

    /// Visit every descriptor in registry order.
    pub fn for_each(&self, visit: impl FnMut(&PrimitiveType)) {
        self.types.iter().for_each(visit);
    }

    /// Iterate over descriptors in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &PrimitiveType> {
        self.types.iter()
    }

    /// Look up a descriptor by abbreviation.
    pub fn resolve(&self, abbreviation: &str) -> Result<&PrimitiveType, RegistryError> {
        self.index
            .get(abbreviation)
            .map(|&i| &self.types[i])
            .ok_or_else(|| RegistryError::unknown_type(abbreviation))
    }

    /// Look up a descriptor by canonical name, e.g. `int`.
    pub fn resolve_name(&self, name: &str) -> Result<&PrimitiveType, RegistryError> {
        self.types
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| RegistryError::unknown_type(name))
    }

    /// Check if exactly this descriptor is registered.
    pub fn contains(&self, descriptor: &PrimitiveType) -> bool {
        self.resolve(&descriptor.abbreviation)
            .is_ok_and(|registered| registered == descriptor)
    }

    /// Returns the specialized contract name for a registered descriptor.
    ///
    /// Fails with [`RegistryError::UnknownType`] if the descriptor is not
    /// part of this registry, rather than inventing a name for it.
    pub fn contract_name(&self, descriptor: &PrimitiveType) -> Result<String, RegistryError> {
        if self.contains(descriptor) {
            Ok(contract_name_of(descriptor))
        } else {
            Err(RegistryError::unknown_type(&descriptor.abbreviation))
        }
    }

    /// Returns the specialized contract name for an abbreviation.
    pub fn contract_type(&self, abbreviation: &str) -> Result<String, RegistryError> {
        self.resolve(abbreviation).map(contract_name_of)
    }

    /// Returns all contract names in registry order.
    pub fn contract_names(&self) -> Vec<String> {
        self.types.iter().map(contract_name_of).collect()
    }

    /// Get the number of registered descriptors.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<'a> IntoIterator for &'a TypeRegistry {
    type Item = &'a PrimitiveType;
    type IntoIter = std::slice::Iter<'a, PrimitiveType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}
