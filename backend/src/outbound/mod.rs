//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters convert between domain types and infrastructure representations
//! and contain no business logic.

pub mod persistence;
