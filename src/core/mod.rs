//! Core module - shared building blocks

pub mod file_reader;
pub mod paths;
pub mod util;
