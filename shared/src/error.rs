use serde::{Serialize, Deserialize};

pub const INVALID_DATA: &str = "Invalid data";

/// Error body returned by every `/api` route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }

    pub fn invalid_data() -> Self {
        Self::new(INVALID_DATA)
    }
}
