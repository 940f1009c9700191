//! Unit tests for the board core.
//!
//! Tests are organised by component: domain types, lane ordering policy,
//! view projections, and the lifecycle, transition, batch, and
//! attachment services.

mod transition_tests;
mod view_tests;
