//! IR → declaration tree.
//!
//! Every function below is a pure mapping from an IR node to an owned
//! declaration subtree, built bottom-up. Top-level trees (operations and
//! fragments) share nothing and are compiled in parallel.
pub mod field;
pub mod field_set;
pub mod scalars;

use rayon::prelude::*;
use serde::Serialize;

use crate::decl::{RegistryDeclaration, TypeDeclaration};
use crate::error::Result;
use crate::ir::{IrDocument, IrFragment, IrOperation};
use crate::validate;

pub use scalars::{custom_scalar_type_name, CustomScalarRegistry};

/// Which view of a field set to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Abstract shape only.
    Interface,
    /// Concrete value holder.
    Implementation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledOperation {
    pub name: String,
    pub declarations: Vec<TypeDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledFragment {
    pub name: String,
    pub interfaces: Vec<TypeDeclaration>,
    pub implementations: Vec<TypeDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledDocument {
    pub namespace: String,
    pub operations: Vec<CompiledOperation>,
    pub fragments: Vec<CompiledFragment>,
    pub registry: RegistryDeclaration,
}

impl CompiledDocument {
    pub fn declaration_count(&self) -> usize {
        self.operations.iter().map(|op| count(&op.declarations)).sum::<usize>()
            + self
                .fragments
                .iter()
                .map(|fr| count(&fr.interfaces) + count(&fr.implementations))
                .sum::<usize>()
    }
}

fn count(decls: &[TypeDeclaration]) -> usize {
    decls.iter().map(TypeDeclaration::count).sum()
}

pub fn compile_operation(operation: &IrOperation) -> CompiledOperation {
    let _span = tracing::debug_span!("operation", name = %operation.name).entered();
    CompiledOperation {
        name: operation.name.clone(),
        declarations: field::nested_declarations(&operation.data_field, Mode::Implementation),
    }
}

pub fn compile_fragment(fragment: &IrFragment) -> CompiledFragment {
    let _span = tracing::debug_span!("fragment", name = %fragment.name).entered();
    CompiledFragment {
        name: fragment.name.clone(),
        interfaces: field::nested_declarations(&fragment.data_field, Mode::Interface),
        implementations: field::nested_declarations(&fragment.data_field, Mode::Implementation),
    }
}

/// Check preconditions, then compile every tree in the document.
/// Output order follows input order regardless of scheduling.
#[tracing::instrument(level = "debug", skip_all, fields(
    namespace = %document.namespace,
    operations = document.operations.len(),
    fragments = document.fragments.len(),
))]
pub fn compile_document(document: &IrDocument) -> Result<CompiledDocument> {
    validate::check_document(document)?;
    let registry =
        CustomScalarRegistry::new(&document.namespace, &document.custom_scalars)?.build();

    let operations = document.operations.par_iter().map(compile_operation).collect();
    let fragments = document.fragments.par_iter().map(compile_fragment).collect();

    Ok(CompiledDocument {
        namespace: document.namespace.clone(),
        operations,
        fragments,
        registry,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::ir::{IrField, IrFieldSet, LeafType, ModelPath, TypeRef};

    pub fn path(elements: &[&str]) -> ModelPath {
        ModelPath::new("com.example", elements.iter().copied()).unwrap()
    }

    pub fn leaf_field(name: &str) -> IrField {
        IrField {
            response_name: name.into(),
            ty: TypeRef::named(LeafType::String).nullable(),
            description: None,
            deprecation_reason: None,
            is_override: false,
            field_sets: Vec::new(),
            implementation_field_sets: Vec::new(),
            base_field_set: None,
        }
    }

    /// A field whose type is the model at `elements`; nested sets left empty.
    pub fn model_field(name: &str, elements: &[&str]) -> IrField {
        IrField {
            ty: TypeRef::named(LeafType::Model { path: path(elements) }).nullable(),
            ..leaf_field(name)
        }
    }

    pub fn field_set(elements: &[&str], fields: Vec<IrField>) -> IrFieldSet {
        IrFieldSet {
            model_name: elements.last().copied().unwrap_or_default().to_string(),
            full_path: path(elements),
            fields,
            implements: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{field_set, leaf_field, model_field, path};
    use super::*;
    use crate::decl::DeclarationKind;
    use crate::error::IrError;
    use crate::ir::IrCustomScalar;
    use pretty_assertions::assert_eq;

    fn document() -> IrDocument {
        let mut data = model_field("data", &["TestQuery", "Data"]);
        let mut hero = model_field("hero", &["TestQuery", "Data", "Hero"]);
        hero.implementation_field_sets =
            vec![field_set(&["TestQuery", "Data", "Hero"], vec![leaf_field("name")])];
        data.implementation_field_sets = vec![field_set(&["TestQuery", "Data"], vec![hero])];

        let mut fragment_data = model_field("data", &["HeroDetails"]);
        fragment_data.base_field_set =
            Some(Box::new(field_set(&["HeroDetails"], vec![leaf_field("name")])));
        let mut impl_set = field_set(&["HeroDetailsImpl"], vec![{
            let mut f = leaf_field("name");
            f.is_override = true;
            f
        }]);
        impl_set.implements = vec![path(&["HeroDetails"])];
        fragment_data.implementation_field_sets = vec![impl_set];

        IrDocument {
            namespace: "com.example".into(),
            custom_scalars: vec![IrCustomScalar {
                name: "DateTime".into(),
                mapped_type: Some("java.time.Instant".into()),
                description: None,
                deprecation_reason: None,
            }],
            operations: vec![IrOperation { name: "TestQuery".into(), data_field: data }],
            fragments: vec![IrFragment { name: "HeroDetails".into(), data_field: fragment_data }],
        }
    }

    #[test]
    fn operation_models_are_implementations() {
        let compiled = compile_document(&document()).unwrap();
        let op = &compiled.operations[0];
        assert_eq!(op.name, "TestQuery");
        assert_eq!(op.declarations.len(), 1);
        assert_eq!(op.declarations[0].kind, DeclarationKind::Implementation);
        assert_eq!(
            op.declarations[0].nested[0].type_name.to_string(),
            "com.example.TestQuery.Data.Hero"
        );
    }

    #[test]
    fn fragment_yields_interface_and_implementation_views() {
        let compiled = compile_document(&document()).unwrap();
        let fragment = &compiled.fragments[0];
        assert_eq!(fragment.interfaces.len(), 1);
        assert!(fragment.interfaces[0].is_interface());
        assert_eq!(fragment.implementations.len(), 1);

        let implementation = &fragment.implementations[0];
        assert_eq!(implementation.super_types[0].to_string(), "com.example.HeroDetails");
        assert!(implementation.properties[0].is_override);
    }

    #[test]
    fn document_counts_every_declaration() {
        let compiled = compile_document(&document()).unwrap();
        // Data + Hero, fragment interface, fragment implementation
        assert_eq!(compiled.declaration_count(), 4);
        assert_eq!(compiled.registry.constants.len(), 1);
    }

    #[test]
    fn compiling_twice_is_identical() {
        let doc = document();
        assert_eq!(compile_document(&doc).unwrap(), compile_document(&doc).unwrap());
    }

    #[test]
    fn precondition_violations_abort_compilation() {
        let mut doc = document();
        doc.custom_scalars.push(doc.custom_scalars[0].clone());
        assert_eq!(
            compile_document(&doc).unwrap_err(),
            IrError::DuplicateScalar { name: "DateTime".into() }
        );
    }

    #[test]
    fn output_order_follows_input_order() {
        let mut doc = document();
        doc.operations = (0..32)
            .map(|i| {
                let name = format!("Query{i}");
                let mut data = model_field("data", &[name.as_str(), "Data"]);
                data.implementation_field_sets =
                    vec![field_set(&[name.as_str(), "Data"], Vec::new())];
                IrOperation { name, data_field: data }
            })
            .collect();
        let compiled = compile_document(&doc).unwrap();
        let names: Vec<_> = compiled.operations.iter().map(|op| op.name.clone()).collect();
        let expected: Vec<_> = (0..32).map(|i| format!("Query{i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn hero_query_fixture_matches_expected() {
        let input = include_str!("../fixtures/hero_query/input.json");
        let document = crate::path_de::document_from_str(input).unwrap();
        let expected: serde_json::Value =
            serde_json::from_str(include_str!("../fixtures/hero_query/expected.json")).unwrap();
        let actual = serde_json::to_value(compile_document(&document).unwrap()).unwrap();
        assert_eq!(actual, expected);
    }
}
