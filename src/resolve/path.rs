use crate::decl::QualifiedName;
use crate::ir::ModelPath;

use super::names;

/// `[TestQuery, Data, Hero]` in `com.example` → `com.example.TestQuery.Data.Hero`
pub fn type_name(path: &ModelPath) -> QualifiedName {
    QualifiedName::new(path.namespace(), path.elements().iter().cloned())
}

/// The model's response adapter.
///
/// Go from:
///   `com.example` / `[TestQuery, Data, Hero]`
/// To:
///   `com.example.adapter` / `[TestQuery_ResponseAdapter, Data, Hero]`
///
/// Only the root is renamed: nested adapters sit next to their models, but the
/// root adapter must not clash with the root model itself.
pub fn adapter_type_name(path: &ModelPath) -> QualifiedName {
    let root = names::response_adapter_name(path.root());
    QualifiedName::new(
        names::adapter_namespace(path.namespace()),
        std::iter::once(root).chain(path.descendants().iter().cloned()),
    )
}
