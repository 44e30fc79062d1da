use crate::decl::{DeclarationKind, TypeDeclaration};
use crate::ir::IrFieldSet;
use crate::resolve;

use super::{field, Mode};

/// One selection node → one declaration, with its sub-selections nested inside.
///
/// Both views carry the same supertypes; they differ only in kind (abstract
/// shape vs. immutable value holder).
pub fn compile(field_set: &IrFieldSet, mode: Mode) -> TypeDeclaration {
    tracing::trace!(
        model = %field_set.full_path,
        ?mode,
        fields = field_set.fields.len(),
        "compile field set"
    );

    let properties = field_set
        .fields
        .iter()
        .map(|f| field::compile(f, mode))
        .collect();

    let nested = field_set
        .fields
        .iter()
        .flat_map(|f| field::nested_declarations(f, mode))
        .collect();

    let super_types = field_set
        .implements
        .iter()
        .map(resolve::type_name)
        .collect();

    let kind = match mode {
        Mode::Interface => DeclarationKind::Interface,
        Mode::Implementation => DeclarationKind::Implementation,
    };

    TypeDeclaration {
        kind,
        name: field_set.model_name.clone(),
        type_name: resolve::type_name(&field_set.full_path),
        adapter_type_name: resolve::adapter_type_name(&field_set.full_path),
        properties,
        super_types,
        nested,
    }
}
