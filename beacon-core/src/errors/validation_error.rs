//! Payload validation errors.

use crate::event::OperationKind;

/// Errors raised when a payload fails validation.
///
/// In strict mode these reach the caller; in lenient mode they are logged
/// and the operation continues down the chain.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{kind} payload missing required field: {field}")]
    MissingField {
        kind: OperationKind,
        field: &'static str,
    },

    #[error("schema check rejected {kind}: {message}")]
    SchemaRejected { kind: OperationKind, message: String },
}
