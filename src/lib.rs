//! Trellis: task ordering and status transition engine.
//!
//! This crate provides the core for a personal task tracker with two
//! presentations (flat list, kanban board) over one shared collection of
//! tasks: gap-tolerant per-lane ordering, unrestricted status transitions,
//! atomic batch operations, and an append-only activity trail per task.
//!
//! # Architecture
//!
//! Trellis follows hexagonal architecture principles:
//!
//! - **Domain**: Pure ordering, filtering, and audit logic with no
//!   infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the task store and the
//!   attachment collaborator
//! - **Adapters**: Concrete implementations of ports (in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task aggregate, lane ordering policy, transition engine,
//!   batch coordinator, and view projections

pub mod task;
