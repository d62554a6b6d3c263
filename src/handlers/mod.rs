// handlers/mod.rs - Handler tiers
//
// Public (no identity) → Protected (caller identity required)
//
// Which tier a path falls into at the gate is decided by `access::AccessTable`;
// protected handlers additionally take a `Caller` so they never run anonymously.
pub mod public;
pub mod protected;
