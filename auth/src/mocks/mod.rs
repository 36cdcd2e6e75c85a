//! Mock implementations for testing.
//!
//! Gated behind the `test-utils` feature (enabled by default) so integration
//! tests and downstream crates can drive the controller without a hosted
//! provider.

mod provider;

pub use provider::MockAuthProvider;
