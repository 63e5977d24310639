//! # Application Layer
//!
//! Orchestration on top of the domain: collecting quotes from sources,
//! ranking deals and assembling search reports.
//!
//! - [`services`]: the collection orchestrator and deal ranking
//! - [`use_cases`]: multi-date and monthly searches
//! - [`dto`]: request and report types
//! - [`error`]: [`error::ApplicationError`]

pub mod dto;
pub mod error;
pub mod services;
pub mod use_cases;
