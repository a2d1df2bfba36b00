pub mod auth;
pub mod rate_limit;
pub mod response;

pub use auth::{session_auth_middleware, CurrentUser};
pub use rate_limit::rate_limit_middleware;
pub use response::{ApiResponse, ApiResult};
