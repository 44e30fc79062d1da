//! Precondition checks over IR, run once before compiling.
//!
//! Compilation assumes unique scalar names, unique model paths and unique
//! response names per field set. None of these are re-checked later.
use indexmap::{IndexMap, IndexSet};

use crate::compile::Mode;
use crate::error::{IrError, Result};
use crate::ir::{IrCustomScalar, IrDocument, IrField, IrFieldSet, LeafType, ModelPath};
use crate::resolve::names;

/// Scalar names must be unique both as written and after sanitizing, since
/// the registry emits one constant and one holder type per scalar.
pub fn check_scalars(scalars: &[IrCustomScalar]) -> Result<()> {
    let mut seen = IndexSet::with_capacity(scalars.len());
    let mut constants = IndexMap::with_capacity(scalars.len());
    let mut holders = IndexMap::with_capacity(scalars.len());
    for scalar in scalars {
        if !seen.insert(scalar.name.as_str()) {
            return Err(IrError::DuplicateScalar { name: scalar.name.clone() });
        }
        let constant = names::identifier(&scalar.name);
        let holder = names::capitalize(&constant);
        claim_generated_name(&mut constants, constant, scalar)?;
        claim_generated_name(&mut holders, holder, scalar)?;
    }
    Ok(())
}

fn claim_generated_name<'ir>(
    claimed: &mut IndexMap<String, &'ir str>,
    generated: String,
    scalar: &'ir IrCustomScalar,
) -> Result<()> {
    if let Some(first) = claimed.get(&generated) {
        return Err(IrError::ScalarNameClash {
            first: first.to_string(),
            second: scalar.name.clone(),
            generated,
        });
    }
    claimed.insert(generated, scalar.name.as_str());
    Ok(())
}

/// Walks every output tree the way the compiler emits it.
///
/// Within one tree (an operation, or one view of a fragment) each model path
/// is declared at most once. Across trees a path may recur, but only for an
/// equal field set.
#[derive(Debug)]
struct TreeCheck<'ir> {
    scalars: IndexMap<&'ir str, Option<&'ir str>>,
    claimed: IndexMap<&'ir ModelPath, &'ir IrFieldSet>,
    emitted: IndexSet<&'ir ModelPath>,
}

impl<'ir> TreeCheck<'ir> {
    fn new(scalars: &'ir [IrCustomScalar]) -> Self {
        Self {
            scalars: scalars
                .iter()
                .map(|s| (s.name.as_str(), s.mapped_type.as_deref()))
                .collect(),
            claimed: IndexMap::new(),
            emitted: IndexSet::new(),
        }
    }

    fn claimed_count(&self) -> usize {
        self.claimed.len()
    }

    fn visit_tree(&mut self, data_field: &'ir IrField, mode: Mode) -> Result<()> {
        self.emitted.clear();
        self.visit_field(data_field, mode)
    }

    fn visit_field(&mut self, field: &'ir IrField, mode: Mode) -> Result<()> {
        self.check_leaf(field.ty.leaf())?;
        match mode {
            Mode::Interface => {
                if let Some(base) = field.base_field_set.as_deref() {
                    self.visit_field_set(base, Mode::Interface)?;
                }
            }
            Mode::Implementation => {
                for field_set in &field.field_sets {
                    self.visit_field_set(field_set, Mode::Interface)?;
                }
                for field_set in &field.implementation_field_sets {
                    self.visit_field_set(field_set, Mode::Implementation)?;
                }
            }
        }
        Ok(())
    }

    fn visit_field_set(&mut self, field_set: &'ir IrFieldSet, mode: Mode) -> Result<()> {
        let path = &field_set.full_path;
        let duplicate = || IrError::DuplicateModelPath { path: path.to_string() };
        match self.claimed.get(path) {
            Some(previous) if *previous != field_set => return Err(duplicate()),
            Some(_) => {}
            None => {
                self.claimed.insert(path, field_set);
            }
        }
        if !self.emitted.insert(path) {
            return Err(duplicate());
        }

        check_response_names(field_set)?;
        for field in &field_set.fields {
            self.visit_field(field, mode)?;
        }
        Ok(())
    }

    /// The registry mapping is authoritative; a use site must agree with it.
    fn check_leaf(&self, leaf: &LeafType) -> Result<()> {
        let LeafType::CustomScalar { name, mapped_type } = leaf else {
            return Ok(());
        };
        match self.scalars.get(name.as_str()) {
            None => Err(IrError::UndeclaredScalar { name: name.clone() }),
            Some(declared) if *declared != mapped_type.as_deref() => {
                Err(IrError::ScalarMappingMismatch {
                    name: name.clone(),
                    leaf: mapped_type.clone(),
                    declared: declared.map(str::to_string),
                })
            }
            Some(_) => Ok(()),
        }
    }
}

fn check_response_names(field_set: &IrFieldSet) -> Result<()> {
    let mut seen = IndexSet::with_capacity(field_set.fields.len());
    for field in &field_set.fields {
        if !seen.insert(field.response_name.as_str()) {
            return Err(IrError::DuplicateResponseName {
                model: field_set.model_name.clone(),
                name: field.response_name.clone(),
            });
        }
    }
    Ok(())
}

#[tracing::instrument(level = "debug", skip_all, fields(namespace = %document.namespace))]
pub fn check_document(document: &IrDocument) -> Result<()> {
    check_scalars(&document.custom_scalars)?;

    let mut trees = TreeCheck::new(&document.custom_scalars);
    for operation in &document.operations {
        trees.visit_tree(&operation.data_field, Mode::Implementation)?;
    }
    for fragment in &document.fragments {
        trees.visit_tree(&fragment.data_field, Mode::Interface)?;
        trees.visit_tree(&fragment.data_field, Mode::Implementation)?;
    }
    tracing::debug!(
        field_sets = trees.claimed_count(),
        scalars = document.custom_scalars.len(),
        "preconditions hold"
    );
    Ok(())
}
