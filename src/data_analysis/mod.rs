// src/data_analysis/mod.rs

pub mod derivative;
pub mod motion_analysis;
pub mod path_overlay;
pub mod segment_detector;
pub mod speed;
pub mod trace_cleaner;

// src/data_analysis/mod.rs
