//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "status": "success" }`, the acknowledgement returned by write endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self { status: "success" }
    }
}

/// `{ "status": "success", "message": ... }`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// `{ "totalElements": n, "content": [...] }` listing envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T: Serialize> {
    pub total_elements: usize,
    pub content: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(content: Vec<T>) -> Self {
        Self {
            total_elements: content.len(),
            content,
        }
    }
}
