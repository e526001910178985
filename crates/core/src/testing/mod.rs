//! Test doubles for the gateway.
//!
//! The mock here is exported (not test-gated) so downstream crates can
//! drive their own LLM-facing code without a provider.

mod mock_gateway;

pub use mock_gateway::MockGateway;
