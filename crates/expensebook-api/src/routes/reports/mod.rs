//! Report routes - PDF expense report download
//!
//! Structure:
//! - api.rs: report endpoint returning PDF bytes

pub mod api;

pub use api::expenses_report_pdf;
