// src/helpers/mod.rs

pub mod log;
