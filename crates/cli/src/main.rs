mod echo;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use gist_core::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_MODEL, ExtractConfig, Extractor, FetchConfig, HttpGeneratorConfig,
    HttpGeneratorFactory, LazyGenerator, Pipeline, SummaryResult, Summarizer, TargetSet,
};
use owo_colors::OwoColorize;
use url::Url;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Summarize a news article into length-bounded digests
#[derive(Parser, Debug)]
#[command(name = "gist")]
#[command(version)]
#[command(about = "Summarize news articles by URL", long_about = None)]
struct Args {
    /// Article URL (http or https)
    #[arg(value_name = "URL", required_unless_present = "completions")]
    url: Option<String>,

    /// Summarize into 3, 5 and 8 lines instead of 100, 200 and 300 characters
    #[arg(long)]
    lines: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Base URL of the inference endpoint
    #[arg(long, default_value = "http://127.0.0.1:8080", value_name = "URL")]
    generator_url: Url,

    /// Model identifier sent to the inference endpoint
    #[arg(long, default_value = DEFAULT_MODEL, value_name = "ID")]
    model: String,

    /// Article fetch timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for the article fetch
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn build_pipeline(args: &Args) -> Pipeline {
    let mut fetch = FetchConfig { timeout: args.timeout, ..Default::default() };
    if let Some(ua) = &args.user_agent {
        fetch.user_agent = ua.clone();
    }

    let generator = HttpGeneratorFactory::new(HttpGeneratorConfig {
        endpoint: args.generator_url.as_str().trim_end_matches('/').to_string(),
        model: args.model.clone(),
        ..Default::default()
    });

    Pipeline::new(
        Extractor::new(ExtractConfig { fetch, ..Default::default() }),
        Summarizer::new(LazyGenerator::new(generator), DEFAULT_CACHE_CAPACITY),
    )
}

/// One block per output, keyed like the JSON form.
fn render_text(result: &SummaryResult) -> String {
    let mut out = format!("id: {}\n", result.id);
    for (target, text) in &result.outputs {
        out.push_str(&format!("\n[{}]\n{}\n", target, text));
    }
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "gist", &mut io::stdout());
        return Ok(());
    }

    let url = args.url.clone().context("URL is required")?;

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("gist_core=debug"))
            .with_writer(io::stderr)
            .init();
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let mode = if args.lines { TargetSet::Lines } else { TargetSet::Chars };
    let targets = mode.targets();

    if args.verbose {
        echo::print_step(1, 3, &format!("Summarizing {}", url.bright_white().underline()));
        echo::print_detail("Generator:", args.generator_url.as_str());
        echo::print_detail("Model:", &args.model);
        echo::print_detail(
            "Targets:",
            &targets.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
        );
        eprintln!();
    }

    let pipeline = build_pipeline(&args);
    let result = match pipeline.run(&url, &targets).await {
        Ok(result) => result,
        Err(e) => {
            echo::print_error(&format!("{:?} failure", e.kind()));
            return Err(e).context("Failed to summarize article");
        }
    };

    if args.verbose {
        echo::print_step(2, 3, "Rendering output");
        echo::print_detail("Id:", &result.id);
        echo::print_detail("Format:", &format!("{:?}", args.format));
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Text => render_text(&result),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&result).context("Failed to serialize summary")?;
            json.push('\n');
            json
        }
    };

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
