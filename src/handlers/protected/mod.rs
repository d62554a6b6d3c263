// handlers/protected/mod.rs - Handlers that require a caller identity
//
// Each takes a `Caller` (or `LegacyCaller`) extractor and makes at most one
// collaborator call through the injected `AppState` handles.
pub mod analytics;
pub mod billing;
pub mod health_query;
pub mod reports;

pub use analytics::mongo_analytics;
pub use billing::{payment_history, subscription_status};
pub use health_query::health_query;
pub use reports::{mongo_reports, user_reports};
