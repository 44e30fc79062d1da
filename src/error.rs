use thiserror::Error;

/// Contract violations in IR handed over by the upstream builder.
///
/// Compilation itself is total; these only come out of decoding and the
/// precondition checks in [`crate::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IrError {
    #[error("model path must have at least one segment")]
    EmptyModelPath,

    #[error("custom scalar `{name}` is declared more than once")]
    DuplicateScalar { name: String },

    #[error("custom scalars `{first}` and `{second}` both generate `{generated}`")]
    ScalarNameClash { first: String, second: String, generated: String },

    #[error("custom scalar `{name}` is used but not declared")]
    UndeclaredScalar { name: String },

    #[error("custom scalar `{name}` maps to `{leaf:?}` at a use site but `{declared:?}` in the registry")]
    ScalarMappingMismatch { name: String, leaf: Option<String>, declared: Option<String> },

    #[error("model path `{path}` is used by more than one field set")]
    DuplicateModelPath { path: String },

    #[error("field set `{model}` selects response name `{name}` more than once")]
    DuplicateResponseName { model: String, name: String },

    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },
}

pub type Result<T, E = IrError> = std::result::Result<T, E>;
