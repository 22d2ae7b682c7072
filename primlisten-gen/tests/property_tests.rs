//! Property-based tests for primlisten-gen.
//!
//! Properties tested:
//! - Contract names are unique across a registry
//! - Resolution is total on registered abbreviations
//! - Resolution fails with `UnknownType` on unregistered abbreviations
//! - Emission follows registry order, one artifact per contract for Java
//! - Generation is deterministic

use std::collections::HashSet;

use proptest::prelude::*;

use primlisten_gen::generator::{ContractGenerator, GeneratorConfig, JavaEmitter, RustEmitter};
use primlisten_gen::{PrimitiveType, RegistryError, TypeRegistry};

// =============================================================================
// Generators for property tests
// =============================================================================

/// Generate a registry with unique abbreviations.
fn arb_registry() -> impl Strategy<Value = TypeRegistry> {
    prop::collection::hash_set("[A-Z][a-z0-9]{0,5}", 0..8).prop_map(|abbrevs| {
        TypeRegistry::from_descriptors(abbrevs.into_iter().map(|abbrev| {
            let name = abbrev.to_lowercase();
            PrimitiveType::new(name, abbrev.clone(), format!("{}Box", abbrev))
        }))
        .expect("abbreviations are unique and well formed")
    })
}

// =============================================================================
// Registry properties
// =============================================================================

proptest! {
    #[test]
    fn prop_contract_names_unique(registry in arb_registry()) {
        let names = registry.contract_names();
        let unique: HashSet<_> = names.iter().collect();
        prop_assert_eq!(unique.len(), registry.len());
    }

    #[test]
    fn prop_resolution_total_on_registered(registry in arb_registry()) {
        for descriptor in &registry {
            let name = registry.contract_name(descriptor).unwrap();
            prop_assert_eq!(&name, &format!("{}ChangeListener", descriptor.abbreviation));
            prop_assert_eq!(registry.contract_type(&descriptor.abbreviation).unwrap(), name);
        }
    }

    #[test]
    fn prop_resolution_fails_on_unregistered(
        registry in arb_registry(),
        abbrev in "[A-Z][a-z0-9]{0,5}",
    ) {
        let registered = registry.iter().any(|t| t.abbreviation == abbrev);
        match registry.contract_type(&abbrev) {
            Ok(name) => {
                prop_assert!(registered);
                prop_assert_eq!(name, format!("{}ChangeListener", abbrev));
            }
            Err(err) => {
                prop_assert!(!registered);
                prop_assert_eq!(err, RegistryError::unknown_type(abbrev));
            }
        }
    }

    #[test]
    fn prop_duplicate_abbreviation_rejected(registry in arb_registry()) {
        let mut registry = registry;
        let first = registry.iter().next().cloned();
        if let Some(first) = first {
            let len = registry.len();
            let duplicate = PrimitiveType::new("other", first.abbreviation.clone(), "Other");
            let rejected = matches!(
                registry.register(duplicate),
                Err(RegistryError::DuplicateAbbreviation { .. })
            );
            prop_assert!(rejected);
            prop_assert_eq!(registry.len(), len);
        }
    }
}

// =============================================================================
// Emission properties
// =============================================================================

proptest! {
    #[test]
    fn prop_java_one_artifact_per_contract(registry in arb_registry()) {
        let generator = ContractGenerator::new(JavaEmitter::new(), GeneratorConfig::default());
        let artifacts = generator.generate(&registry).unwrap();

        prop_assert_eq!(artifacts.len(), registry.len());
        for (artifact, descriptor) in artifacts.iter().zip(registry.iter()) {
            let contract = format!("{}ChangeListener", descriptor.abbreviation);
            prop_assert_eq!(artifact.path.to_str().unwrap(), format!("{}.java", contract));
            let declaration = format!("public interface {} {{", contract);
            prop_assert!(artifact.contents.contains(&declaration));
            let wrap_param = format!("ChangeListener<? super {}> listener", descriptor.boxed_name);
            prop_assert!(artifact.contents.contains(&wrap_param));
        }
    }

    #[test]
    fn prop_rust_emission_follows_registry_order(registry in arb_registry()) {
        let generator = ContractGenerator::new(RustEmitter::new(), GeneratorConfig::default());
        let text = generator.generate_single(&registry).unwrap();

        let mut last = 0;
        for name in registry.contract_names() {
            let pos = text.find(&format!("pub struct {}(", name));
            prop_assert!(pos.is_some());
            let pos = pos.unwrap();
            prop_assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn prop_generation_is_deterministic(registry in arb_registry()) {
        let generator = ContractGenerator::new(JavaEmitter::new(), GeneratorConfig::default());
        prop_assert_eq!(
            generator.generate(&registry).unwrap(),
            generator.generate(&registry).unwrap()
        );
    }
}
