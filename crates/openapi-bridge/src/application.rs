// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::fmt;
use std::sync::Arc;

use openapi_gen::{ApiResource, Application};

/// Fixed set of resources handed to the generator.
#[derive(Clone)]
pub struct ApplicationAdaptor {
    resources: Arc<[Arc<dyn ApiResource>]>,
}

impl ApplicationAdaptor {
    /// Snapshot `resources`. Later changes to the source collection are not seen.
    pub fn new(resources: impl IntoIterator<Item = Arc<dyn ApiResource>>) -> Self {
        Self {
            resources: resources.into_iter().collect(),
        }
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True when there is nothing to document.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl fmt::Debug for ApplicationAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationAdaptor")
            .field("resources", &self.resources.len())
            .finish()
    }
}

impl Application for ApplicationAdaptor {
    fn singletons(&self) -> Vec<Arc<dyn ApiResource>> {
        self.resources.to_vec()
    }
}
