mod alert;
mod day;
mod exercise;
mod muscle_group;
mod plan;
mod sequence;
mod weight_log;

pub use alert::{rank, Urgency, UserAlert};
pub use day::Day;
pub use exercise::{parse_superset, Exercise, SUPERSET_SEPARATOR};
pub use muscle_group::MuscleGroup;
pub use plan::Plan;
pub use sequence::Identified;
pub use weight_log::WeightLog;
