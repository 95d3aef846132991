//! Passrate - pass@k evaluation CLI
//!
//! The `passrate` command evaluates code-generating models against a fixed
//! prompt/test pair and reports unbiased pass@k estimates.
//!
//! ## Commands
//!
//! - `run`: generate candidates for each model, check them in the sandbox,
//!   and print per-model pass@k
//! - `estimate`: compute pass@k directly from (n, c, k) counts

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use passrate_core::{
    init_tracing, pass_at_k, render_summary_md, write_results_json, EvalConfig,
    EvalResultsArtifact, EvalSpec, Evaluator,
};

#[derive(Parser)]
#[command(name = "passrate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "pass@k evaluation for code-generating models", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one or more models against a prompt/test pair
    Run {
        /// Prompt text, or @path to read it from a file
        #[arg(short, long)]
        prompt: String,

        /// Test case text, or @path to read it from a file
        #[arg(short, long)]
        test: String,

        /// Models to evaluate (comma-separated or repeated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        models: Vec<String>,

        /// Candidates to request per model
        #[arg(short = 'n', long, default_value_t = 10)]
        samples: usize,

        /// k values to report (comma-separated)
        #[arg(short, long, value_delimiter = ',', default_values_t = vec![1, 10, 100])]
        k: Vec<usize>,

        /// Generation backend endpoint
        #[arg(long, env = "PASSRATE_ENDPOINT", default_value = "http://localhost:11434")]
        endpoint: String,

        /// Wall-clock limit per sandboxed check, in seconds
        #[arg(long, default_value_t = 3)]
        timeout_secs: u64,

        /// Interpreter command for the sandbox
        #[arg(long, env = "PASSRATE_INTERPRETER", default_value = "python3")]
        interpreter: String,

        /// Write the JSON results artifact to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute pass@k from counts, one line per k
    Estimate {
        /// Total samples n
        #[arg(short = 'n', long)]
        samples: usize,

        /// Correct samples c
        #[arg(short, long)]
        correct: usize,

        /// k values (comma-separated)
        #[arg(short, long, value_delimiter = ',', default_values_t = vec![1, 10, 100])]
        k: Vec<usize>,
    },
}

/// Inline text, or the contents of a file when prefixed with `@`.
fn read_text_arg(value: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read text from {path}"))
        }
        None => Ok(value.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    match cli.command {
        Commands::Run {
            prompt,
            test,
            models,
            samples,
            k,
            endpoint,
            timeout_secs,
            interpreter,
            output,
        } => {
            let prompt = read_text_arg(&prompt)?;
            let test = read_text_arg(&test)?;

            let config = EvalConfig::from_env()
                .with_endpoint(&endpoint)
                .with_exec_timeout_ms(timeout_secs.saturating_mul(1000))
                .with_interpreter(&interpreter);

            let mut spec = EvalSpec::new(&prompt, &test)
                .with_samples(samples)
                .with_k_values(k);
            for model in models {
                spec = spec.with_model(&model);
            }

            let evaluator = Evaluator::from_config(config);
            let run = evaluator.evaluate(&spec).await?;

            print!("{}", render_summary_md(&run));

            if let Some(path) = output {
                let artifact = EvalResultsArtifact::from_run(&run, &spec.prompt);
                write_results_json(&path, &artifact)?;
                println!("\nResults written to {}", path.display());
            }
        }

        Commands::Estimate {
            samples,
            correct,
            k,
        } => {
            if correct > samples {
                bail!("correct count {correct} exceeds sample count {samples}");
            }
            for k in k {
                if k == 0 {
                    bail!("k must be a positive integer");
                }
                println!("pass@{} = {:.6}", k, pass_at_k(samples, correct, k));
            }
        }
    }

    Ok(())
}
