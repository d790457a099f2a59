//! Error types for repository operations.
//!
//! Every failure the data repository can report carries a structured
//! [`ErrorContext`] describing the operation and entity involved, so the
//! presentation layer can decide on a fallback without string matching.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structured context for repository errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "historical_aggregate", "load_dataset")
    pub operation: Option<String>,
    /// The entity type involved (e.g., "operator", "banner", "image")
    pub entity: Option<String>,
    /// The entity ID if applicable
    pub entity_id: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the entity type.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the entity ID.
    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref id) = self.entity_id {
            parts.push(format!("id={}", id));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A precondition of a derivation does not hold for the loaded data
    /// (empty collection, too few eligible operators, store not loaded).
    #[error("Invalid state: {message} {context}")]
    InvalidState {
        message: String,
        context: ErrorContext,
    },

    /// Requested entity was not found.
    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// A second process-wide record store was requested.
    #[error("Construction misuse: {message} {context}")]
    ConstructionMisuse {
        message: String,
        context: ErrorContext,
    },

    /// A requested window falls outside the available records.
    #[error("Out of bounds: {message} {context}")]
    OutOfBounds {
        message: String,
        context: ErrorContext,
    },

    /// The dataset document could not be decoded.
    #[error("Parse error: {message} {context}")]
    ParseError {
        message: String,
        context: ErrorContext,
    },

    /// The decoded dataset violates a data-model invariant.
    #[error("Data validation error: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Configuration or initialization error.
    #[error("Configuration error: {message} {context}")]
    ConfigurationError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Create an invalid state error with context.
    pub fn invalid_state_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::InvalidState {
            message: message.into(),
            context,
        }
    }

    /// Create a not found error with context.
    pub fn not_found_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    /// Create a construction misuse error with context.
    pub fn construction_misuse_with_context(
        message: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        Self::ConstructionMisuse {
            message: message.into(),
            context,
        }
    }

    /// Create an out of bounds error with context.
    pub fn out_of_bounds_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::OutOfBounds {
            message: message.into(),
            context,
        }
    }

    /// Create a parse error with context.
    pub fn parse_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ParseError {
            message: message.into(),
            context,
        }
    }

    /// Create a validation error with context.
    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::ValidationError {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::InvalidState { context, .. } => context,
            Self::NotFound { context, .. } => context,
            Self::ConstructionMisuse { context, .. } => context,
            Self::OutOfBounds { context, .. } => context,
            Self::ParseError { context, .. } => context,
            Self::ValidationError { context, .. } => context,
            Self::ConfigurationError { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::InvalidState { context, .. }
            | Self::NotFound { context, .. }
            | Self::ConstructionMisuse { context, .. }
            | Self::OutOfBounds { context, .. }
            | Self::ParseError { context, .. }
            | Self::ValidationError { context, .. }
            | Self::ConfigurationError { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::new("recent_and_upcoming_shop_operators")
            .with_entity("operator")
            .with_entity_id("amiya")
            .with_details("count=1");
        assert_eq!(
            ctx.to_string(),
            "[operation=recent_and_upcoming_shop_operators, entity=operator, id=amiya, details=count=1]"
        );
    }

    #[test]
    fn test_empty_context_display() {
        assert_eq!(ErrorContext::default().to_string(), "[]");
    }

    #[test]
    fn test_error_display_includes_context() {
        let err = RepositoryError::invalid_state_with_context(
            "operator count sus",
            ErrorContext::new("forecast"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid state: operator count sus"));
        assert!(msg.contains("operation=forecast"));
    }

    #[test]
    fn test_context_accessor() {
        let err = RepositoryError::not_found_with_context(
            "missing",
            ErrorContext::new("resolve_image").with_entity("portraits"),
        );
        assert_eq!(err.context().operation.as_deref(), Some("resolve_image"));
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_with_operation_overrides() {
        let err = RepositoryError::configuration("bad value").with_operation("load_config");
        assert_eq!(err.context().operation.as_deref(), Some("load_config"));
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }

    #[test]
    fn test_construction_misuse_variant() {
        let err = RepositoryError::construction_misuse_with_context(
            "store already installed",
            ErrorContext::new("install_store"),
        );
        assert!(matches!(err, RepositoryError::ConstructionMisuse { .. }));
        assert!(err.to_string().contains("store already installed"));
    }
}
