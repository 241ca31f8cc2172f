//! Nimbus CLI - A command line interface for the Nimbus Cognition API.

use clap::{Parser, Subcommand};

mod commands;

use commands::{
    AssistantCommand, ConfigCommand, LanguageCommand, SttCommand, TranslateCommand, TtsCommand,
    VisionCommand,
};

/// Nimbus CLI - A command line interface for the Nimbus Cognition API.
///
/// This tool allows you to interact with Nimbus Cognition services including:
///   - STT (Speech to Text): One-shot and streaming recognition
///   - TTS (Text to Speech): Voice synthesis
///   - Language: Text analysis (sentiment, entities, keywords)
///   - Translate: Text translation and language identification
///   - Assistant: Workspace-based conversation
///   - Vision: Image classification and face detection
///
/// Configuration is stored in ~/.nimbus/cognitive/ and supports multiple
/// contexts, similar to kubectl's context management.
#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Nimbus Cognition API CLI tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.nimbus/cognitive/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Context name to use
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Input request file (YAML or JSON)
    #[arg(short = 'f', long = "file", global = true)]
    pub input: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage CLI configuration
    Config(ConfigCommand),
    /// STT (Speech to Text) service
    Stt(SttCommand),
    /// TTS (Text to Speech) service
    Tts(TtsCommand),
    /// Language Analyzer service
    Language(LanguageCommand),
    /// Language Translator service
    Translate(TranslateCommand),
    /// Assistant (conversation) service
    Assistant(AssistantCommand),
    /// Visual Recognition service
    Vision(VisionCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "nimbus_cognitive=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Commands::Config(cmd) => cmd.run(&cli).await,
        Commands::Stt(cmd) => cmd.run(&cli).await,
        Commands::Tts(cmd) => cmd.run(&cli).await,
        Commands::Language(cmd) => cmd.run(&cli).await,
        Commands::Translate(cmd) => cmd.run(&cli).await,
        Commands::Assistant(cmd) => cmd.run(&cli).await,
        Commands::Vision(cmd) => cmd.run(&cli).await,
    }
}
