pub mod error;
pub mod health;
pub mod url;

pub use error::{ErrorResponse, NotFoundResponse, ValidationDetails, ValidationResponse};
pub use health::HealthResponse;
pub use url::{CreateMappingResponse, Envelope, ResolveMappingResponse};
