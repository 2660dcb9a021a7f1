pub mod services;
pub mod workers;

use serde::{Deserialize, Serialize};

/// Default page size for the full listing grid.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

/// Page size used by the compact (three-column) listing view.
pub const COMPACT_PAGE_SIZE: u64 = 9;

/// Upper bound accepted for `pageSize` from query strings.
pub const MAX_PAGE_SIZE: u64 = 100;

/// The `{success, data, error?, metadata?}` envelope every API route returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            metadata: None,
        }
    }
}
