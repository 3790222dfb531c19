//! Report generation.
//!
//! Pipeline: `aggregate` (pure computation) → `model` (validation and
//! display formatting) → one of two format adapters (`pdf`, `word`).
//! The adapters only walk the model and emit layout primitives; all
//! business logic lives upstream of them.

pub mod aggregate;
pub mod model;
pub mod pdf;
pub mod word;

pub use model::{build_report_model, ReportModel};
