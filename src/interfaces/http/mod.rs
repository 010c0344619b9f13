//! REST API surface

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use common::{ApiResponse, ValidatedJson};
pub use middleware::{AuthState, AuthenticatedUser};
pub use router::{create_api_router, ApiState};
