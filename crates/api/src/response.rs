//! Response envelope shared by the JSON handlers.
//!
//! Successful responses wrap their payload as `{ "data": ... }`. Handlers
//! return [`DataResponse`] instead of hand-building `serde_json::json!`
//! maps so the shape stays typed and uniform across endpoints.

use serde::Serialize;

/// The `{ "data": T }` success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
