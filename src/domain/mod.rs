//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, repository interfaces, and the pure rule-matching logic
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`rule_matcher`] - First-match-wins geo rule selection
//! - [`visit_event`] - Visit tracking event model
//! - [`visit_worker`] - Asynchronous visit processing worker
//!
//! # Visit Processing Flow
//!
//! 1. The redirect handler resolves a destination URL
//! 2. [`visit_event::VisitEvent`] is sent to a bounded async channel
//! 3. [`visit_worker::run_visit_worker`] drains the channel
//! 4. Visit rows are persisted via [`repositories::VisitRepository`]; failures
//!    are logged and dropped, never surfaced to the redirect response

pub mod entities;
pub mod repositories;
pub mod rule_matcher;
pub mod visit_event;
pub mod visit_worker;
