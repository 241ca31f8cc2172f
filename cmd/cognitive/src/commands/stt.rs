//! STT (Speech to Text) commands.

use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

use nimbus_cli::output::print_verbose;
use nimbus_cli::request::{load_request, load_request_from_stdin};
use nimbus_cognitive::{RecognitionEvent, RecognizeRequest, StreamConfig};

use super::{create_client, get_context, output_result, parse_format, parse_language, parse_rate};
use crate::Cli;

/// STT (Speech to Text) service.
///
/// Supports one-shot recognition, streaming recognition, and model listing.
#[derive(Args)]
pub struct SttCommand {
    #[command(subcommand)]
    command: SttSubcommand,
}

#[derive(Subcommand)]
enum SttSubcommand {
    /// Recognize a complete audio file
    Recognize {
        /// Audio file path
        #[arg(short = 'a', long)]
        audio: Option<String>,
        /// Audio format (pcm, wav, mp3, flac, ogg)
        #[arg(short = 'F', long)]
        format: Option<String>,
        /// Sample rate
        #[arg(short = 's', long)]
        sample_rate: Option<i32>,
        /// Recognition model name
        #[arg(short = 'm', long)]
        model: Option<String>,
        /// Language (en-US, es-ES, ...)
        #[arg(short = 'l', long)]
        language: Option<String>,
        /// Include per-word timestamps
        #[arg(long)]
        timestamps: bool,
    },
    /// Stream an audio file for incremental recognition
    Stream {
        /// Audio file path
        #[arg(short = 'a', long)]
        audio: String,
        /// Audio format (pcm, wav, mp3, flac, ogg)
        #[arg(short = 'F', long)]
        format: Option<String>,
        /// Sample rate
        #[arg(short = 's', long)]
        sample_rate: Option<i32>,
        /// Recognition model name
        #[arg(short = 'm', long)]
        model: Option<String>,
        /// Print interim (non-final) results
        #[arg(long)]
        interim: bool,
    },
    /// List available recognition models
    Models,
    /// Show a single recognition model
    Model {
        /// Model name
        name: String,
    },
}

/// STT request from a YAML/JSON file (-f flag).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SttFileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    audio_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_rate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

impl SttCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            SttSubcommand::Recognize {
                audio,
                format,
                sample_rate,
                model,
                language,
                timestamps,
            } => {
                self.recognize(
                    cli,
                    audio.as_deref(),
                    format.as_deref(),
                    *sample_rate,
                    model.as_deref(),
                    language.as_deref(),
                    *timestamps,
                )
                .await
            }
            SttSubcommand::Stream {
                audio,
                format,
                sample_rate,
                model,
                interim,
            } => {
                self.stream(
                    cli,
                    audio,
                    format.as_deref(),
                    *sample_rate,
                    model.as_deref(),
                    *interim,
                )
                .await
            }
            SttSubcommand::Models => {
                let ctx = get_context(cli)?;
                let client = create_client(&ctx)?;
                let models = client.speech_to_text().list_models().await?;
                output_result(cli, &models)
            }
            SttSubcommand::Model { name } => {
                let ctx = get_context(cli)?;
                let client = create_client(&ctx)?;
                let model = client.speech_to_text().get_model(name).await?;
                output_result(cli, &model)
            }
        }
    }

    async fn recognize(
        &self,
        cli: &Cli,
        audio_path: Option<&str>,
        format: Option<&str>,
        sample_rate: Option<i32>,
        model: Option<&str>,
        language: Option<&str>,
        timestamps: bool,
    ) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let client = create_client(&ctx)?;

        // Flags override values from the -f request file.
        let file_req: SttFileRequest = match cli.input.as_deref() {
            Some("-") => load_request_from_stdin()?,
            Some(path) => load_request(path)?,
            None => SttFileRequest::default(),
        };

        let audio_file = audio_path
            .map(String::from)
            .or(file_req.audio_file)
            .ok_or_else(|| anyhow::anyhow!("audio file is required, use -a flag"))?;
        let audio = std::fs::read(&audio_file)?;

        let model = model
            .map(String::from)
            .or(file_req.model)
            .or_else(|| (!ctx.default_model.is_empty()).then(|| ctx.default_model.clone()));
        let format = format.map(String::from).or(file_req.format);
        let sample_rate = sample_rate.or(file_req.sample_rate);
        let language = language.map(String::from).or(file_req.language);

        print_verbose(cli.verbose, &format!("recognizing {}", audio_file));

        let response = client
            .speech_to_text()
            .recognize(&RecognizeRequest {
                audio,
                format: parse_format(format.as_deref()),
                sample_rate: parse_rate(sample_rate),
                model,
                language: language.as_deref().and_then(parse_language),
                word_timestamps: timestamps,
                ..Default::default()
            })
            .await?;

        output_result(cli, &response)
    }

    async fn stream(
        &self,
        cli: &Cli,
        audio_path: &str,
        format: Option<&str>,
        sample_rate: Option<i32>,
        model: Option<&str>,
        interim: bool,
    ) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let client = create_client(&ctx)?;

        let model = model
            .map(String::from)
            .or_else(|| (!ctx.default_model.is_empty()).then(|| ctx.default_model.clone()));

        let mut stream = client
            .speech_to_text()
            .open_stream(&StreamConfig {
                format: parse_format(format),
                sample_rate: parse_rate(sample_rate),
                model,
                interim_results: interim,
                ..Default::default()
            })
            .await?;

        print_verbose(cli.verbose, &format!("streaming {}", audio_path));

        let audio = tokio::fs::File::open(audio_path).await?;
        stream.send_reader(audio).await?;

        let mut finals = Vec::new();
        while let Some(event) = stream.recv().await {
            match event? {
                RecognitionEvent::Transcription(response) => {
                    for result in &response.results {
                        let Some(alt) = result.alternatives.first() else {
                            continue;
                        };
                        if result.is_final {
                            println!("{}", alt.transcript);
                            finals.push(response.clone());
                        } else if interim {
                            eprintln!("... {}", alt.transcript);
                        }
                    }
                }
                RecognitionEvent::Disconnected => break,
                RecognitionEvent::Listening => {}
            }
        }

        if let Some(path) = cli.output.as_deref() {
            let output = if cli.json {
                serde_json::to_string_pretty(&finals)?
            } else {
                serde_yaml::to_string(&finals)?
            };
            std::fs::write(path, output)?;
        }

        Ok(())
    }
}
