pub(crate) mod core;
pub(crate) mod error_recorder;
