//! Task ordering, status transitions, and audit trail for Trellis.
//!
//! This module implements the board core: creating and editing tasks,
//! moving them within and between status lanes while keeping per-lane
//! `order` values strictly increasing, applying batch status changes and
//! deletions atomically, and deriving the list/board lane projections.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
