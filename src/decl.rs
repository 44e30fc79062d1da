//! Declaration tree handed to rendering. No IR in here; everything a renderer
//! needs is resolved up front.
use std::fmt;
use serde::Serialize;

// ————————————————————————————————————————————————————————————————————————————
// NAMES
// ————————————————————————————————————————————————————————————————————————————

/// A nested type reference: `namespace` plus simple names, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedName {
    pub namespace: String,
    pub simple_names: Vec<String>,
}

impl QualifiedName {
    pub fn new<S: Into<String>>(
        namespace: impl Into<String>,
        simple_names: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            simple_names: simple_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Innermost name, i.e. the one a declaration is introduced under.
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}.", self.namespace)?;
        }
        write!(f, "{}", self.simple_names.join("."))
    }
}

/// A type occurrence: a named class or a list, each layer with its own nullability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeName {
    Class { name: QualifiedName, nullable: bool },
    List { element: Box<TypeName>, nullable: bool },
}

impl TypeName {
    pub fn class(name: QualifiedName) -> Self {
        TypeName::Class { name, nullable: false }
    }

    pub fn list_of(element: TypeName) -> Self {
        TypeName::List { element: Box::new(element), nullable: false }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeName::Class { nullable, .. } | TypeName::List { nullable, .. } => *nullable,
        }
    }

    /// Same type with the outermost layer's nullability replaced.
    pub fn with_nullable(self, nullable: bool) -> Self {
        match self {
            TypeName::Class { name, .. } => TypeName::Class { name, nullable },
            TypeName::List { element, .. } => TypeName::List { element, nullable },
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nullable = match self {
            TypeName::Class { name, nullable } => {
                write!(f, "{name}")?;
                *nullable
            }
            TypeName::List { element, nullable } => {
                write!(f, "List<{element}>")?;
                *nullable
            }
        };
        if nullable { write!(f, "?") } else { Ok(()) }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// MODELS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Docs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

impl Docs {
    pub fn new(description: Option<&str>, deprecation_reason: Option<&str>) -> Self {
        Self {
            description: description.map(str::to_owned),
            deprecation_reason: deprecation_reason.map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: TypeName,
    /// Leaf type, non-null. Used for adapter lookups.
    pub raw_type: TypeName,
    #[serde(rename = "override")]
    pub is_override: bool,
    pub docs: Docs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// Abstract shape: property signatures only.
    Interface,
    /// Immutable value holder, one constructor parameter per property.
    Implementation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDeclaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub type_name: QualifiedName,
    pub adapter_type_name: QualifiedName,
    pub properties: Vec<PropertyDeclaration>,
    pub super_types: Vec<QualifiedName>,
    pub nested: Vec<TypeDeclaration>,
}

impl TypeDeclaration {
    pub fn is_interface(&self) -> bool {
        self.kind == DeclarationKind::Interface
    }

    pub fn constructor_parameters(&self) -> &[PropertyDeclaration] {
        match self.kind {
            DeclarationKind::Interface => &[],
            DeclarationKind::Implementation => &self.properties,
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDeclaration> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// This declaration plus everything nested below it.
    pub fn count(&self) -> usize {
        1 + self.nested.iter().map(TypeDeclaration::count).sum::<usize>()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CUSTOM SCALARS
// ————————————————————————————————————————————————————————————————————————————

/// What the serialization layer keys its (de)serializers on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarMapping {
    pub graphql_name: String,
    pub mapped_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarConstant {
    pub name: String,
    /// Holder type the constant lives in, `<namespace>.Scalars.<Name>`.
    pub type_name: QualifiedName,
    pub value: ScalarMapping,
    pub docs: Docs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmapped_note: Option<String>,
}

impl ScalarConstant {
    pub fn is_unmapped(&self) -> bool {
        self.unmapped_note.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryDeclaration {
    pub name: String,
    pub type_name: QualifiedName,
    pub doc: String,
    pub constants: Vec<ScalarConstant>,
}
