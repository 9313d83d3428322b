// src/main.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use tracing::info;

use rsi_trace_render::channel_names::joint_name;
use rsi_trace_render::constants::{
    DEFAULT_LOG_PATH, DEFAULT_OVERLAY_START_BOUNDARY, DEFAULT_REFERENCE_PATH, SAMPLE_PERIOD_S,
    SEGMENT_MIN_GAP, SEGMENT_VELOCITY_THRESHOLD,
};
use rsi_trace_render::crate_version;
use rsi_trace_render::data_analysis::derivative::Stencil;
use rsi_trace_render::data_analysis::motion_analysis::{analyze_trace, AnalysisConfig};
use rsi_trace_render::data_analysis::path_overlay::{overlay_path, select_boundary};
use rsi_trace_render::data_analysis::segment_detector::{
    state_after_boundary, SegmentConfig, TransitionRule,
};
use rsi_trace_render::data_input::log_parser::parse_log_file;
use rsi_trace_render::data_input::reference_path::load_reference_path;
use rsi_trace_render::plot_functions::plot_ee_state::plot_ee_state;
use rsi_trace_render::plot_functions::plot_joint_states::plot_joint_states;
use rsi_trace_render::plot_functions::plot_path_overlay::plot_path_overlay;

#[derive(Parser, Debug)]
#[command(author, version = crate_version(), about = "Offline analysis of KUKA RSI motion logs", long_about = None)]
struct Args {
    /// RSI log file (one XML telegram per line)
    #[arg(default_value = DEFAULT_LOG_PATH, value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Reference path file (whitespace-separated x y z rows)
    #[arg(short, long, default_value = DEFAULT_REFERENCE_PATH, value_hint = ValueHint::FilePath)]
    reference: PathBuf,

    /// Directory the PNG plots are written to
    #[arg(short, long, default_value = ".", value_hint = ValueHint::DirPath)]
    output_dir: PathBuf,

    /// Boundary ordinal where the path overlay starts
    #[arg(long, default_value_t = DEFAULT_OVERLAY_START_BOUNDARY)]
    overlay_start: usize,

    /// Boundary ordinal where the path overlay ends (default: end of trace)
    #[arg(long)]
    overlay_end: Option<usize>,

    /// Finite-difference stencil for velocity and acceleration
    #[arg(long, value_enum, default_value_t = StencilOpt::Central)]
    stencil: StencilOpt,

    /// Condition set used by the segment detector
    #[arg(long, value_enum, default_value_t = RuleOpt::Sustained)]
    transition_rule: RuleOpt,

    /// Velocity magnitude below which A1 counts as stopped (rad/s)
    #[arg(long, default_value_t = SEGMENT_VELOCITY_THRESHOLD)]
    threshold: f64,

    /// Minimum number of samples between two segment boundaries
    #[arg(long, default_value_t = SEGMENT_MIN_GAP)]
    min_gap: usize,

    /// Skip rendering plots; only print the report
    #[arg(long, action = ArgAction::SetTrue)]
    no_plots: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StencilOpt {
    Central,
    Forward,
    Backward,
    ForwardSecondOrder,
    BackwardSecondOrder,
}

impl From<StencilOpt> for Stencil {
    fn from(value: StencilOpt) -> Self {
        match value {
            StencilOpt::Central => Stencil::Central,
            StencilOpt::Forward => Stencil::Forward,
            StencilOpt::Backward => Stencil::Backward,
            StencilOpt::ForwardSecondOrder => Stencil::ForwardSecondOrder,
            StencilOpt::BackwardSecondOrder => Stencil::BackwardSecondOrder,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RuleOpt {
    Sustained,
    Edge,
}

impl From<RuleOpt> for TransitionRule {
    fn from(value: RuleOpt) -> Self {
        match value {
            RuleOpt::Sustained => TransitionRule::Sustained,
            RuleOpt::Edge => TransitionRule::Edge,
        }
    }
}

fn output_prefix(output_dir: &Path, input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rsi_trace".to_string());
    output_dir.join(stem).to_string_lossy().into_owned()
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let root_name = args
        .input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("Analyzing '{}'", args.input.display());

    let raw = parse_log_file(&args.input)?;
    let config = AnalysisConfig {
        sample_period_s: SAMPLE_PERIOD_S,
        stencil: args.stencil.into(),
        segment: SegmentConfig {
            threshold: args.threshold,
            min_gap: args.min_gap,
            rule: args.transition_rule.into(),
        },
    };
    let analysis = analyze_trace(&raw, &config)?;

    println!(
        "Samples: {} raw, {} after removing the initial dwell",
        raw.len(),
        analysis.cleaned.len()
    );
    println!(
        "Segment boundaries on {} velocity: {:?}",
        joint_name(0), analysis.boundaries
    );
    for (ordinal, &index) in analysis.boundaries.iter().enumerate() {
        println!(
            "  #{ordinal}: index {index} (t = {:.3} s) -> {:?}",
            analysis.cleaned.time[index],
            state_after_boundary(ordinal)
        );
    }

    let prefix = output_prefix(&args.output_dir, &args.input);
    if !args.no_plots {
        std::fs::create_dir_all(&args.output_dir)?;
        plot_joint_states(&analysis, &prefix, &root_name)?;
        plot_ee_state(&analysis, &prefix, &root_name)?;
    }

    let reference = load_reference_path(&args.reference)?;
    let start = select_boundary(&analysis.boundaries, args.overlay_start)?;
    let end = args
        .overlay_end
        .map(|ordinal| select_boundary(&analysis.boundaries, ordinal))
        .transpose()?;
    let performed = overlay_path(&analysis.cleaned, start, end, &reference)?;

    println!(
        "Path overlay: {} executed samples from index {start} against {} reference points",
        performed.len(),
        reference.len()
    );
    if let (Some(first), Some(last)) = (performed.first(), performed.last()) {
        println!(
            "  Performed path: ({:.4}, {:.4}) -> ({:.4}, {:.4}) m",
            first.0, first.1, last.0, last.1
        );
    }

    if !args.no_plots {
        plot_path_overlay(&reference, &performed, &prefix, &root_name)?;
    }

    info!(version = crate_version(), "Analysis finished");
    Ok(())
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rsi_trace_render=info,warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
