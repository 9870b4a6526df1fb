//! Encoder quality benchmark binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vbench_media::{check_ffmpeg, check_ffprobe};
use vbench_runner::{compare, ensure_references, render_summary, select_profiles, RunEnv};
use vbench_store::{load_all, ScoreStore};

/// Benchmark task phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Task {
    /// Transcode and summarize
    All,
    /// Transcode references and compute scores, speed and actual rate
    Transcode,
    /// Summarize previously computed scores
    Plot,
}

/// Benchmark video encoders by transcoding references under many
/// configurations and scoring perceptual quality of each result.
#[derive(Debug, Parser)]
#[command(name = "vbench", version, about)]
struct Cli {
    /// Do only some of the tasks
    #[arg(short, long, value_enum, default_value_t = Task::All)]
    task: Task,

    /// Only run some comparison profile/s
    #[arg(long = "profile", value_name = "NAME", default_values_t = [String::from("voc-streaming")])]
    profiles: Vec<String>,

    /// Source description file (defaults to <basedir>/sources.json)
    #[arg(short, long, value_name = "FILE")]
    source: Option<PathBuf>,

    /// Base directory for scores/, references/ and tmp/
    #[arg(long, default_value = ".")]
    basedir: PathBuf,

    /// Override the score directory
    #[arg(long)]
    scoredir: Option<PathBuf>,

    /// Override the reference directory
    #[arg(long)]
    refdir: Option<PathBuf>,

    /// Override the working directory for intermediates
    #[arg(long)]
    tmpdir: Option<PathBuf>,

    /// Tag to identify your current testing platform
    tag: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let mut env = RunEnv::under(&cli.basedir);
    if let Some(scoredir) = cli.scoredir.clone() {
        env.scoredir = scoredir;
    }
    if let Some(refdir) = cli.refdir.clone() {
        env.refdir = refdir;
    }
    if let Some(tmpdir) = cli.tmpdir.clone() {
        env.tmpdir = tmpdir;
    }

    info!("Comparison profiles: {:?}", cli.profiles);
    let profiles = select_profiles(&cli.profiles)?;

    if matches!(cli.task, Task::All | Task::Transcode) {
        check_ffmpeg()?;
        check_ffprobe()?;

        let sourcefile = cli
            .source
            .clone()
            .unwrap_or_else(|| cli.basedir.join("sources.json"));
        let references = ensure_references(&sourcefile, &env.refdir)
            .await
            .with_context(|| format!("failed to prepare references from {}", sourcefile.display()))?;
        info!("Reference videos: {:?}", references);

        let mut store = ScoreStore::new(&env.scoredir);
        compare(&references, &profiles, &cli.tag, &env, &mut store).await?;
    }

    if matches!(cli.task, Task::All | Task::Plot) {
        let entries = load_all(&env.scoredir).await?;
        print!("{}", render_summary(&entries));
    }

    Ok(())
}

/// Initialize tracing with colored output for dev, JSON for production.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|format| format.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vbench_runner=info".parse().expect("static directive parses"))
        .add_directive("vbench_media=info".parse().expect("static directive parses"))
        .add_directive("vbench_store=info".parse().expect("static directive parses"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
