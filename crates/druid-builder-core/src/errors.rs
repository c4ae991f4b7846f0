use druid_builder_core_types::RequestId;
use thiserror::Error;

/// Result type alias using BuilderError
pub type Result<T> = std::result::Result<T, BuilderError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code that hosts and tests can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Addressing
    InvalidPath,
    NotFound,
    IndexOutOfRange,
    NotANodeSlot,

    // Registry
    UnknownKind,
    FieldNotDeclared,
    NotACollection,

    // Editing
    ShapeMismatch,

    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::IndexOutOfRange => "ERR_INDEX_OUT_OF_RANGE",
            ExErrorKind::NotANodeSlot => "ERR_NOT_A_NODE_SLOT",
            ExErrorKind::UnknownKind => "ERR_UNKNOWN_KIND",
            ExErrorKind::FieldNotDeclared => "ERR_FIELD_NOT_DECLARED",
            ExErrorKind::NotACollection => "ERR_NOT_A_COLLECTION",
            ExErrorKind::ShapeMismatch => "ERR_SHAPE_MISMATCH",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Structured error handed to hosts and log events
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    node_kind: Option<String>,
    field: Option<String>,
    index: Option<usize>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            node_kind: None,
            field: None,
            index: None,
            request_id: None,
            message: String::new(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the document path the error refers to
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add the node kind (registry label or discriminant) involved
    pub fn with_node_kind(mut self, kind: impl Into<String>) -> Self {
        self.node_kind = Some(kind.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn node_kind(&self) -> Option<&str> {
        self.node_kind.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(kind) = &self.node_kind {
            write!(f, " (kind: {})", kind)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised while addressing or editing a builder document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuilderError {
    /// Path text could not be parsed
    #[error("Invalid path '{input}': {reason}")]
    InvalidPath { input: String, reason: String },

    /// An intermediate node on the path does not exist
    #[error("Nothing at '{path}'")]
    PathNotFound { path: String },

    /// Path steps through a field that does not hold child nodes
    #[error("'{path}' is not a node slot")]
    NotANodeSlot { path: String },

    #[error("Index {index} out of range at '{path}' (len {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },

    /// No registry entry matches the key or discriminant
    #[error("Unknown {category} kind '{key}'")]
    UnknownKind { category: String, key: String },

    #[error("Kind '{kind}' has no field '{field}'")]
    FieldNotDeclared { kind: String, field: String },

    #[error("Field '{field}' of '{kind}' is not a collection")]
    NotACollection { kind: String, field: String },

    /// The edit does not fit the shape of the field
    #[error("Field '{field}' of '{kind}' is {expected}, got {edit} edit")]
    ShapeMismatch {
        kind: String,
        field: String,
        expected: String,
        edit: String,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<BuilderError> for ExError {
    fn from(err: BuilderError) -> Self {
        match err {
            BuilderError::InvalidPath { input, reason } => ExError::new(ExErrorKind::InvalidPath)
                .with_path(input)
                .with_message(reason),

            BuilderError::PathNotFound { path } => ExError::new(ExErrorKind::NotFound)
                .with_path(path)
                .with_message("No node at path"),

            BuilderError::NotANodeSlot { path } => ExError::new(ExErrorKind::NotANodeSlot)
                .with_path(path)
                .with_message("Path does not address a node"),

            BuilderError::IndexOutOfRange { path, index, len } => {
                ExError::new(ExErrorKind::IndexOutOfRange)
                    .with_path(path)
                    .with_index(index)
                    .with_message(format!("Collection has {} elements", len))
            }

            BuilderError::UnknownKind { category, key } => ExError::new(ExErrorKind::UnknownKind)
                .with_node_kind(key)
                .with_message(format!("Not a known {} kind", category)),

            BuilderError::FieldNotDeclared { kind, field } => {
                ExError::new(ExErrorKind::FieldNotDeclared)
                    .with_node_kind(kind)
                    .with_field(field)
                    .with_message("Field is not declared for this kind")
            }

            BuilderError::NotACollection { kind, field } => {
                ExError::new(ExErrorKind::NotACollection)
                    .with_node_kind(kind)
                    .with_field(field)
                    .with_message("Field is not an ordered collection")
            }

            BuilderError::ShapeMismatch {
                kind,
                field,
                expected,
                edit,
            } => ExError::new(ExErrorKind::ShapeMismatch)
                .with_node_kind(kind)
                .with_field(field)
                .with_message(format!("Expected {}, got {}", expected, edit)),

            BuilderError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for BuilderError {
    fn from(err: serde_json::Error) -> Self {
        BuilderError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        let cases = [
            (ExErrorKind::InvalidPath, "ERR_INVALID_PATH"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::IndexOutOfRange, "ERR_INDEX_OUT_OF_RANGE"),
            (ExErrorKind::UnknownKind, "ERR_UNKNOWN_KIND"),
            (ExErrorKind::ShapeMismatch, "ERR_SHAPE_MISMATCH"),
        ];
        for (kind, code) in cases {
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn test_index_error_carries_context() {
        let err: ExError = BuilderError::IndexOutOfRange {
            path: "filter.fields".to_string(),
            index: 4,
            len: 2,
        }
        .into();

        assert_eq!(err.kind(), ExErrorKind::IndexOutOfRange);
        assert_eq!(err.path(), Some("filter.fields"));
        assert_eq!(err.index(), Some(4));
        let text = err.to_string();
        assert!(text.starts_with("[ERR_INDEX_OUT_OF_RANGE]"));
        assert!(text.contains("(index: 4)"));
    }

    #[test]
    fn test_shape_mismatch_maps_field_and_kind() {
        let err: ExError = BuilderError::ShapeMismatch {
            kind: "Selector".to_string(),
            field: "dimension".to_string(),
            expected: "text".to_string(),
            edit: "boolean".to_string(),
        }
        .into();
        assert_eq!(err.node_kind(), Some("Selector"));
        assert_eq!(err.field(), Some("dimension"));
    }

    #[test]
    fn test_request_id_attaches() {
        let id = RequestId::new();
        let err = ExError::new(ExErrorKind::ShapeMismatch)
            .with_op("apply")
            .with_request_id(id.clone());
        assert_eq!(err.request_id(), Some(&id));
        assert_eq!(err.op(), Some("apply"));
    }

    #[test]
    fn test_serde_json_error_converts() {
        let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: BuilderError = bad.unwrap_err().into();
        assert!(matches!(err, BuilderError::Serialization { .. }));
    }
}
