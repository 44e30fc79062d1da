use crate::decl::{Docs, PropertyDeclaration, TypeDeclaration};
use crate::ir::IrField;
use crate::resolve;

use super::{field_set, Mode};

/// The property a field contributes to its enclosing declaration.
///
/// The override marker is copied from the IR as-is; whether a supertype
/// really declares a matching field was settled upstream.
pub fn compile(field: &IrField, mode: Mode) -> PropertyDeclaration {
    tracing::trace!(field = %field.response_name, ?mode, "compile field");
    PropertyDeclaration {
        name: field.response_name.clone(),
        type_name: resolve::resolve(&field.ty),
        raw_type: resolve::resolve_raw(&field.ty),
        is_override: field.is_override,
        docs: Docs::new(field.description.as_deref(), field.deprecation_reason.as_deref()),
    }
}

/// Declarations for the field's sub-selection, nested inside the parent.
///
/// Interface view: only the common base shape. Implementation view: every
/// variant interface first, then the concrete shapes that implement them.
pub fn nested_declarations(field: &IrField, mode: Mode) -> Vec<TypeDeclaration> {
    match mode {
        Mode::Interface => field
            .base_field_set
            .as_deref()
            .map(|base| field_set::compile(base, Mode::Interface))
            .into_iter()
            .collect(),
        Mode::Implementation => {
            let interfaces = field
                .field_sets
                .iter()
                .map(|fs| field_set::compile(fs, Mode::Interface));
            let implementations = field
                .implementation_field_sets
                .iter()
                .map(|fs| field_set::compile(fs, Mode::Implementation));
            interfaces.chain(implementations).collect()
        }
    }
}
