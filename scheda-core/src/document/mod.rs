//! Conversion between the plan entity tree and backend documents.
//!
//! The backend stores each plan as a schema-less map-of-maps. Ordered
//! children live under synthetic keys (`giornoN`, `gruppoN`, `esercizioN`);
//! the entity tree keeps them as plain ordered `Vec`s and only this module
//! knows about the key layout.
//!
//! # Layout
//!
//! ```text
//! startDate        "2024-01-01T00:00:00+0000"
//! durationWeeks    4
//! changeRequested  false
//! days/giornoN/{name, muscleGroups/gruppoN/{name, exercises/esercizioN/{...}}}
//! ```
//!
//! Exercise nodes hold `name`, `serie`, `riposo`, `notePT`, `noteUtente` and
//! an optional `weightLogs` map of `id -> {timestamp, weight}`.

mod alerts;
pub mod coerce;
pub mod keys;
mod paths;
mod reader;
pub mod weight_logs;
mod writer;

pub use alerts::parse_alerts;
pub use paths::DocumentPath;
pub use reader::{decode_exercise, decode_plan, parse_start_date};
pub use writer::{encode_day, encode_exercise, encode_muscle_group, encode_plan};
