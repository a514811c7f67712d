use async_trait::async_trait;

/// Authentication stage of the role gate.
///
/// Reads credentials out of the request head and turns them into claims.
/// It only sees the parts (headers, URI, extensions), never the body, so a
/// validator stays usable with bodies that are not `Sync`.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    type Claims: Clone + Send + Sync + 'static;

    /// Usually `http::request::Parts`.
    type RequestParts: Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Fails when the token is missing, malformed, expired or signed with a
    /// different key.
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
