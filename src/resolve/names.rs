use once_cell::sync::Lazy;
use regex::Regex;

use crate::decl::QualifiedName;

// ------------------------------ Conventions ------------------------------ //

/// Built-in scalars and `Any` live here; renderers map it onto their prelude.
pub const PRELUDE_NAMESPACE: &str = "";
pub const ADAPTER_NAMESPACE: &str = "adapter";
pub const ENUM_NAMESPACE: &str = "type";
pub const RESPONSE_ADAPTER_SUFFIX: &str = "_ResponseAdapter";
pub const SCALARS_HOLDER: &str = "Scalars";
pub const REGISTRY_NAME: &str = "CustomScalars";
/// Stand-in leaf for custom scalars nobody mapped.
pub const UNMAPPED_SCALAR_TYPE: &str = "Any";

static NON_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static pattern"));

// ------------------------------- Helpers --------------------------------- //

pub fn sub_namespace(namespace: &str, child: &str) -> String {
    if namespace.is_empty() {
        child.to_string()
    } else {
        format!("{namespace}.{child}")
    }
}

pub fn adapter_namespace(namespace: &str) -> String {
    sub_namespace(namespace, ADAPTER_NAMESPACE)
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `TestQuery` → `TestQuery_ResponseAdapter`
pub fn response_adapter_name(root: &str) -> String {
    format!("{}{RESPONSE_ADAPTER_SUFFIX}", capitalize(root))
}

/// Turn an arbitrary GraphQL name into something every target accepts as an
/// identifier.
pub fn identifier(name: &str) -> String {
    let mut out = NON_IDENT.replace_all(name, "_").into_owned();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

pub fn prelude(simple_name: &str) -> QualifiedName {
    QualifiedName::new(PRELUDE_NAMESPACE, [simple_name])
}

/// `java.time.Instant` → namespace `java.time`, simple name `Instant`.
pub fn split_qualified(dotted: &str) -> QualifiedName {
    match dotted.rsplit_once('.') {
        Some((namespace, simple)) => QualifiedName::new(namespace, [simple]),
        None => prelude(dotted),
    }
}
