//! folio: build-time data layer for a personal portfolio and blog site.
//!
//! Fetches work/education experience and skill records from a hosted
//! backend, loads blog metadata from local Markdown content, applies the
//! page transformations (skill categorization, resume date formatting,
//! recent-post selection), and emits fully-materialized page props as JSON
//! for the rendering layer.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod util;
