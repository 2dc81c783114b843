//! Application services

pub mod document;

pub use document::{DocumentReport, DocumentService};
