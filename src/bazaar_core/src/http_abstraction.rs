//! Zero-cost HTTP response abstraction for the storefront handlers.
//!
//! Framework crates implement [`AuthResponseBuilder`] on a newtype around
//! their own response builder, so the handlers in `bazaar_adapters` never
//! name a web framework:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  bazaar_core: AuthResponseBuilder trait  │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  bazaar_axum: AxumResponseBuilder        │
//! │  impl AuthResponseBuilder for it         │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  bazaar_adapters::handlers build bodies  │
//! │  generically over the builder            │
//! └──────────────────────────────────────────┘
//! ```

/// Trait for building HTTP responses.
///
/// This follows the builder pattern, allowing method chaining:
/// ```ignore
/// builder
///     .status(201)
///     .header("location", "/admin/users/42")
///     .json_body(json!({"id": "42"}))
///     .build()
/// ```
pub trait AuthResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Set a JSON body with Content-Type header
    fn json_body(self, body: serde_json::Value) -> Self;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// Helper methods for creating common responses.
///
/// Automatically implemented for all types that implement `AuthResponseBuilder`.
pub trait AuthResponseHelpers: AuthResponseBuilder {
    /// Create a 200 OK JSON response
    fn ok_json(self, body: serde_json::Value) -> Self::Response {
        self.status(200).json_body(body).build()
    }

    /// Create a 201 Created JSON response
    fn created_json(self, body: serde_json::Value) -> Self::Response {
        self.status(201).json_body(body).build()
    }

    /// Create a 200 OK response carrying only a message
    fn ok_message(self, message: &str) -> Self::Response {
        self.ok_json(serde_json::json!({ "message": message }))
    }
}

// Blanket implementation for all AuthResponseBuilder types
impl<T: AuthResponseBuilder> AuthResponseHelpers for T {}
