// src/plot_functions/mod.rs

pub mod plot_ee_state;
pub mod plot_joint_states;
pub mod plot_path_overlay;

// src/plot_functions/mod.rs
