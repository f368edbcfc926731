// crates/vidcore-core/src/helpers/mod.rs

pub mod format;
pub mod time;
