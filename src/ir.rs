// Strongly-typed IR handed to the compiler. Built upstream, read-only here.

use serde::{Deserialize, Serialize};

use crate::error::IrError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Named(LeafType),         // non-null unless wrapped
    Nullable(Box<TypeRef>),
    List(Box<TypeRef>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeafType {
    String,
    Int,
    Float,
    Boolean,
    Id,
    Enum { namespace: String, name: String },
    CustomScalar { name: String, mapped_type: Option<String> },
    Model { path: ModelPath },
}

impl TypeRef {
    pub fn named(leaf: LeafType) -> Self {
        Self::Named(leaf)
    }
    pub fn nullable(self) -> Self {
        Self::Nullable(Box::new(self))
    }
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// The leaf with every wrapping layer peeled off.
    pub fn leaf(&self) -> &LeafType {
        let mut cur = self;
        loop {
            match cur {
                TypeRef::Named(leaf) => return leaf,
                TypeRef::Nullable(inner) | TypeRef::List(inner) => cur = inner.as_ref(),
            }
        }
    }
}

/// Where a generated model lives: a namespace plus the chain of enclosing
/// declarations, operation root first and the node's own name last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawModelPath")]
pub struct ModelPath {
    namespace: String,
    elements: Vec<String>,
}

#[derive(Deserialize)]
struct RawModelPath {
    namespace: String,
    elements: Vec<String>,
}

impl TryFrom<RawModelPath> for ModelPath {
    type Error = IrError;

    fn try_from(raw: RawModelPath) -> Result<Self, Self::Error> {
        ModelPath::new(raw.namespace, raw.elements)
    }
}

impl ModelPath {
    pub fn new<S: Into<String>>(
        namespace: impl Into<String>,
        elements: impl IntoIterator<Item = S>,
    ) -> Result<Self, IrError> {
        let elements: Vec<String> = elements.into_iter().map(Into::into).collect();
        if elements.is_empty() {
            return Err(IrError::EmptyModelPath);
        }
        Ok(Self { namespace: namespace.into(), elements })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// The operation (or fragment) root. Always present.
    pub fn root(&self) -> &str {
        &self.elements[0]
    }

    /// Everything below the root, outermost first.
    pub fn descendants(&self) -> &[String] {
        &self.elements[1..]
    }
}

impl std::fmt::Display for ModelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{}.", self.namespace)?;
        }
        write!(f, "{}", self.elements.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrCustomScalar {
    pub name: String,
    #[serde(default)]
    pub mapped_type: Option<String>,   // None when the consumer registered no mapping
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrField {
    pub response_name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
    /// Re-declares a field inherited from one of the implemented interfaces.
    #[serde(default, rename = "override")]
    pub is_override: bool,
    /// Shared shapes, emitted as interfaces.
    #[serde(default)]
    pub field_sets: Vec<IrFieldSet>,
    /// One concrete shape per type condition.
    #[serde(default)]
    pub implementation_field_sets: Vec<IrFieldSet>,
    /// Common shape across all variants, used for the interface view.
    #[serde(default)]
    pub base_field_set: Option<Box<IrFieldSet>>,
}

impl IrField {
    pub fn has_sub_selection(&self) -> bool {
        !self.field_sets.is_empty()
            || !self.implementation_field_sets.is_empty()
            || self.base_field_set.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrFieldSet {
    pub model_name: String,
    pub full_path: ModelPath,
    #[serde(default)]
    pub fields: Vec<IrField>,
    #[serde(default)]
    pub implements: Vec<ModelPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrOperation {
    pub name: String,
    pub data_field: IrField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrFragment {
    pub name: String,
    pub data_field: IrField,
}

/// One schema's worth of IR: the custom scalars it references plus every
/// operation and fragment selection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrDocument {
    pub namespace: String,
    #[serde(default)]
    pub custom_scalars: Vec<IrCustomScalar>,
    #[serde(default)]
    pub operations: Vec<IrOperation>,
    #[serde(default)]
    pub fragments: Vec<IrFragment>,
}
