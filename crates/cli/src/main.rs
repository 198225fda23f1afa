use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use qa_cli::config::AppConfig;
use qa_cli::responder::AssistantError;
use qa_cli::{build_assistant, build_engine, build_normalizer, http_api};
use qa_search::QueryExpander;
use qa_vector_store::EmbeddingMode;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "qa")]
#[command(about = "Corpus-first campus question answering", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (overrides QA_CONFIG; default: ./qa.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dataset path (JSON array or JSON Lines); overrides QA_DATASET
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Override embedding backend in this process
    #[arg(long, global = true, value_enum)]
    embed_mode: Option<EmbedMode>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question (corpus first, then fallback)
    Ask(AskArgs),

    /// Print the full ranking trace as JSON
    Inspect(QuestionArgs),

    /// Print the normalized form of a text
    Normalize(TextArgs),

    /// Print the query variants scored for a text, one per line
    Expand(TextArgs),

    /// Serve the chat API over HTTP (POST /chat, GET /health)
    ServeHttp(ServeArgs),
}

#[derive(Args)]
struct AskArgs {
    question: String,

    /// Emit {"response", "source"} as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct QuestionArgs {
    question: String,
}

#[derive(Args)]
struct TextArgs {
    text: String,
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:5000
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: String,
}

#[derive(Copy, Clone, ValueEnum)]
enum EmbedMode {
    Stub,
    Http,
}

impl EmbedMode {
    const fn as_domain(self) -> EmbeddingMode {
        match self {
            Self::Stub => EmbeddingMode::Stub,
            Self::Http => EmbeddingMode::Http,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut cfg = AppConfig::load(cli.config.as_deref())?;
    if let Some(dataset) = cli.dataset {
        cfg.dataset = dataset;
    }
    if let Some(mode) = cli.embed_mode {
        cfg.embedding.mode = mode.as_domain();
    }

    match cli.command {
        Commands::Ask(args) => run_ask(&cfg, args).await?,
        Commands::Inspect(args) => run_inspect(&cfg, args).await?,
        Commands::Normalize(args) => run_normalize(&cfg, &args)?,
        Commands::Expand(args) => run_expand(&cfg, &args)?,
        Commands::ServeHttp(args) => serve_http(&cfg, args).await?,
    }

    Ok(())
}

async fn run_ask(cfg: &AppConfig, args: AskArgs) -> Result<()> {
    let assistant = build_assistant(cfg).await?;
    let reply = match assistant.respond(&args.question).await {
        Ok(reply) => reply,
        Err(AssistantError::NoAnswer) => {
            anyhow::bail!("No answer found for {:?}", args.question.trim())
        }
        Err(err) => return Err(err).context("Failed to answer"),
    };

    if args.json {
        let body = serde_json::json!({ "response": reply.text, "source": reply.source });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", reply.text);
    }
    Ok(())
}

async fn run_inspect(cfg: &AppConfig, args: QuestionArgs) -> Result<()> {
    let engine = build_engine(cfg).await?;
    let outcome = engine.explain(&args.question).await;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn run_normalize(cfg: &AppConfig, args: &TextArgs) -> Result<()> {
    let normalizer = build_normalizer(cfg)?;
    println!("{}", normalizer.normalize(&args.text));
    Ok(())
}

fn run_expand(cfg: &AppConfig, args: &TextArgs) -> Result<()> {
    let normalizer = build_normalizer(cfg)?;
    let expander = QueryExpander::new(&cfg.engine.question_words);
    for variant in expander.expand(&args.text, &normalizer) {
        println!("{variant}");
    }
    Ok(())
}

async fn serve_http(cfg: &AppConfig, args: ServeArgs) -> Result<()> {
    let assistant = Arc::new(build_assistant(cfg).await?);
    println!("Serving chat API on http://{}/chat", args.bind);
    http_api::serve(assistant, &args.bind).await
}
