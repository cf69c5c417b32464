use serde::{Deserialize, Serialize};

use crate::domain::SecretSummary;

/// Offset-based page request sent to a secret data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    pub fn first(limit: usize) -> Self {
        Self { limit, offset: 0 }
    }

    pub fn at(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }
}

/// One batch of secrets with a continuation flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPage {
    pub items: Vec<SecretSummary>,
    pub has_more: bool,
}

impl SecretPage {
    pub fn new(items: Vec<SecretSummary>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
