//! pneumo-export
//!
//! Read-only summaries of saved pathology records: grouped and formatted
//! from a pathology's display configuration, rendered to Markdown or DOCX.

pub mod docx;
pub mod error;
pub mod render;
pub mod summary;
