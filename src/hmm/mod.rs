pub mod context;
pub mod model;
pub mod table;
pub mod tagger;
pub mod trainer;

/// Virtual predecessor of the first tag of every sequence.
pub const START: &str = "<S>";
/// Virtual successor of the last tag of every sequence.
pub const END: &str = "<E>";

/// Probability used for any lookup the model cannot answer.
pub const DEFAULT_EPSILON: f64 = 1e-6;
