pub mod container;
pub mod controller;
pub mod error;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use controller::{ChatController, ChatRequest, ChatResponse, HealthController, HealthResponse};
pub use error::{ApiError, FieldError, PROCESSING_ERROR_DETAIL};
pub use router::{build_router, serve};
