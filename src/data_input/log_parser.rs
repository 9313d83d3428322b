// src/data_input/log_parser.rs

use regex::Regex;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::channel_names::{JOINT_COUNT, POSE_COUNT};
use crate::constants::{
    DEG_TO_RAD, JOINT_REQUEST_TOKEN_START, JOINT_TOKEN_START, JOINT_TOKEN_STRIDE,
    MIN_TOKENS_PER_LINE, MIN_TOKENS_WITH_REQUEST, MM_TO_M, POSE_REQUEST_TOKEN_START,
    POSE_TOKEN_START, SAMPLE_PERIOD_S,
};
use crate::data_input::trace_data::{Sample, Trace};
use crate::error::{Result, TraceError};

static NUMBER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn number_pattern() -> &'static Regex {
    NUMBER_PATTERN.get_or_init(|| {
        Regex::new(r"[-+]?\d*\.\d+|[-+]?\d+").expect("valid numeric token pattern")
    })
}

/// Extracts every numeric token (signed integer or decimal) from a log line, left to right.
pub fn extract_numeric_tokens(line: &str) -> Vec<f64> {
    number_pattern()
        .find_iter(line)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Position in millimeters followed by orientation in degrees, converted to meters and radians.
fn pose_from_tokens(tokens: &[f64], start: usize) -> [f64; POSE_COUNT] {
    std::array::from_fn(|k| {
        let scale = if k < 3 { MM_TO_M } else { DEG_TO_RAD };
        tokens[start + k] * scale
    })
}

fn joints_from_tokens(tokens: &[f64], start: usize) -> [f64; JOINT_COUNT] {
    std::array::from_fn(|k| tokens[start + k * JOINT_TOKEN_STRIDE] * DEG_TO_RAD)
}

/// Parses one log line into a sample stamped `time_sec`.
///
/// Returns `Ok(None)` for lines without any numeric token (XML headers, blank lines).
/// Lines with some tokens but not enough for the joint channels are reported as `Parse` errors.
pub fn parse_line(line: &str, line_number: usize, time_sec: f64) -> Result<Option<Sample>> {
    let tokens = extract_numeric_tokens(line);
    if tokens.is_empty() {
        return Ok(None);
    }
    if tokens.len() < MIN_TOKENS_PER_LINE {
        return Err(TraceError::parse(
            line_number,
            format!(
                "expected at least {} numeric fields, found {}",
                MIN_TOKENS_PER_LINE,
                tokens.len()
            ),
        ));
    }

    let has_request = tokens.len() >= MIN_TOKENS_WITH_REQUEST;

    Ok(Some(Sample {
        time_sec,
        joints: joints_from_tokens(&tokens, JOINT_TOKEN_START),
        pose: pose_from_tokens(&tokens, POSE_TOKEN_START),
        joint_request: has_request.then(|| joints_from_tokens(&tokens, JOINT_REQUEST_TOKEN_START)),
        pose_request: has_request.then(|| pose_from_tokens(&tokens, POSE_REQUEST_TOKEN_START)),
    }))
}

/// Reads a raw trace from any line source.
///
/// The k-th accepted line is stamped `k * SAMPLE_PERIOD_S`. Malformed lines are logged and skipped;
/// bytes that are not valid UTF-8 are replaced before tokenizing.
pub fn parse_log_reader<R: BufRead>(reader: R) -> Result<Trace> {
    read_trace(reader, Path::new("<log reader>"))
}

fn read_trace<R: BufRead>(mut reader: R, source: &Path) -> Result<Trace> {
    let mut samples: Vec<Sample> = Vec::new();
    let mut skipped = 0usize;
    let mut buffer: Vec<u8> = Vec::new();
    let mut line_number = 0usize;

    loop {
        buffer.clear();
        let bytes_read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|e| TraceError::from_io(source, e))?;
        if bytes_read == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buffer);
        if matches!(line, Cow::Owned(_)) {
            warn!(line = line_number, "Log line is not valid UTF-8; invalid bytes replaced");
        }
        let line = line.trim_end_matches(['\n', '\r']);

        let time_sec = samples.len() as f64 * SAMPLE_PERIOD_S;
        match parse_line(line, line_number, time_sec) {
            Ok(Some(sample)) => samples.push(sample),
            Ok(None) => {}
            Err(e) => {
                warn!("Skipping log line: {e}");
                skipped += 1;
            }
        }
    }

    let trace = Trace::from_samples(&samples);
    info!(
        samples = trace.len(),
        skipped,
        request_channels = trace.request.is_some(),
        "Finished reading log"
    );
    Ok(trace)
}

/// Parses the RSI log file at `input_file_path` into a raw trace.
pub fn parse_log_file(input_file_path: &Path) -> Result<Trace> {
    let file = File::open(input_file_path).map_err(|e| TraceError::from_io(input_file_path, e))?;
    info!("Reading log {}", input_file_path.display());
    read_trace(BufReader::new(file), input_file_path)
}
