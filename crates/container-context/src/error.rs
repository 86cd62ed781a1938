// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use thiserror::Error;

/// Result type for container context operations that may be unavailable.
pub type ContextResult<T> = Result<T, ContextError>;

/// Error returned by a [`ContainerContext`](crate::ContainerContext) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The host does not implement this member of the contract.
    #[error("operation `{operation}` is not supported by this container context")]
    Unsupported {
        /// Name of the contract member that was called
        operation: &'static str,
    },
}

impl ContextError {
    /// Create an [`ContextError::Unsupported`] for the named operation.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }

    /// Returns true if this error reports an unsupported operation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
