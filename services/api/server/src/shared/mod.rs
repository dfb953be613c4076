pub mod errors;
pub mod extractors;
