//! Application services layer.

pub mod blog;
pub mod build;
pub mod error;
pub mod props;
pub mod resume;
