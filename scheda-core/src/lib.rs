//! Scheda Core Library
//!
//! Workout plan domain model and the logic around it: decoding and encoding
//! plan documents, plan validity, weight logging and alert ranking.
//!
//! Everything here is synchronous and free of I/O. Hosts fetch documents,
//! call into this crate, and write the results back.

pub mod document;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod note;

pub use document::{decode_plan, encode_plan, parse_alerts, DocumentPath};
pub use error::{PlanError, ValidationError};
pub use lifecycle::{remaining_weeks, status, PlanStatus, EXPIRING_SOON_WEEKS};
pub use models::{
    parse_superset, rank, Day, Exercise, MuscleGroup, Plan, Urgency, UserAlert, WeightLog,
};
pub use note::{format_weight, summarize, NoteFormat};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
