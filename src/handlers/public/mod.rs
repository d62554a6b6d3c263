// handlers/public/mod.rs - Handlers reachable without a caller identity
//
// Liveness, the not-found fallback, and the document store connectivity probe.
pub mod diagnostics;
pub mod health;

pub use diagnostics::test_mongo;
pub use health::{health, not_found};
