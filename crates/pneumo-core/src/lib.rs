//! pneumo-core
//!
//! Pure domain types shared by the pathology forms, the summary export and
//! the HTTP layer. No I/O here.

pub mod error;
pub mod models;
