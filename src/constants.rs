// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE, GREEN, GREY, ORANGE, PURPLE, RED};
use plotters::style::RGBColor;

// Default input files, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "rsi_const_laydown_speed.txt";
pub const DEFAULT_REFERENCE_PATH: &str = "simplePath.txt";

// RSI interpolation cycle (4 ms).
pub const SAMPLE_PERIOD_S: f64 = 0.004;

// Unit conversion applied while parsing log lines.
pub const MM_TO_M: f64 = 0.001;
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

// --- Log Token Layout ---
// Positions refer to the numeric tokens extracted from one log line.
pub const POSE_TOKEN_START: usize = 1; // X, Y, Z, A, B, C (measured)
pub const POSE_REQUEST_TOKEN_START: usize = 7; // X, Y, Z, A, B, C (commanded)
pub const JOINT_TOKEN_START: usize = 14; // A1..A6 at 14, 16, ..., 24
pub const JOINT_REQUEST_TOKEN_START: usize = 26; // A1..A6 at 26, 28, ..., 36
pub const JOINT_TOKEN_STRIDE: usize = 2;
pub const MIN_TOKENS_PER_LINE: usize = 25;
pub const MIN_TOKENS_WITH_REQUEST: usize = 37;

// --- Segment Detection ---
pub const SEGMENT_VELOCITY_THRESHOLD: f64 = 0.0003; // rad/s
pub const SEGMENT_MIN_GAP: usize = 10; // samples

// Boundary ordinal where the overlay starts (fifth detected boundary).
pub const DEFAULT_OVERLAY_START_BOUNDARY: usize = 4;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// --- Plot Color Assignments ---
pub const COLOR_MEASURED: &RGBColor = &BLUE;
pub const COLOR_REQUESTED: &RGBColor = &ORANGE;
pub const COLOR_VELOCITY: &RGBColor = &GREEN;
pub const COLOR_ACCELERATION: &RGBColor = &PURPLE;
pub const COLOR_SPEED: &RGBColor = &RED;
pub const COLOR_SEGMENT_BOUNDARY: &RGBColor = &GREY;
pub const COLOR_PATH_REFERENCE: &RGBColor = &RED;
pub const COLOR_PATH_PERFORMED: &RGBColor = &BLUE;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const LINE_WIDTH_PATH: u32 = 2;

// Radius of the point markers on the reference path.
pub const PATH_MARKER_SIZE: u32 = 3;

// Font sizes
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// Number of dash segments used for dotted vertical markers.
pub const DOTTED_LINE_SEGMENTS: usize = 20;

// Dash and gap length in pixels for dashed series.
pub const DASH_LENGTH_PX: u32 = 8;
pub const DASH_SPACING_PX: u32 = 5;

// src/constants.rs
