// src/data_input/mod.rs

pub mod log_parser;
pub mod reference_path;
pub mod trace_data;

// src/data_input/mod.rs
