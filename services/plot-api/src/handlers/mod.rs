//! HTTP request handlers for the plotting service.

pub mod common;
pub mod plot;
pub mod root;
