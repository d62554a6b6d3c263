pub mod auth;
pub mod response;

pub use auth::{access_gate_middleware, Caller, LegacyCaller, ResolvedIdentity};
pub use response::{timestamp, ApiResponse, ApiResult};
