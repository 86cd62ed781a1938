// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use thiserror::Error;

/// Errors raised while configuring the documentation endpoints.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// No resources were given to the builder.
    #[error("no resources were provided; at least one resource is required to generate a document")]
    MissingResources,
}
