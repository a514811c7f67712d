pub mod error;

pub use bazaar_core::{AuthResponseBuilder, AuthResponseHelpers};
pub use error::{ApiError, ErrorResponse};
