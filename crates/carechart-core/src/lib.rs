//! Ambient plumbing shared by Carechart services: tracing setup, request-id and trace
//! middleware, health handlers and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
