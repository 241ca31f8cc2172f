//! TTS (Text to Speech) commands.

use clap::{Args, Subcommand};

use nimbus_cli::output::guess_extension;
use nimbus_cognitive::SynthesizeRequest;

use super::{create_client, get_context, output_result, parse_format, parse_rate, print_success};
use crate::Cli;

/// TTS (Text to Speech) service.
#[derive(Args)]
pub struct TtsCommand {
    #[command(subcommand)]
    command: TtsSubcommand,
}

#[derive(Subcommand)]
enum TtsSubcommand {
    /// Synthesize text to an audio file
    Synthesize {
        /// Text to synthesize
        #[arg(short = 't', long)]
        text: String,
        /// Voice name, e.g. en-US_Michael
        #[arg(long)]
        voice: Option<String>,
        /// Audio format (pcm, wav, mp3, flac, ogg)
        #[arg(short = 'F', long)]
        format: Option<String>,
        /// Sample rate
        #[arg(short = 's', long)]
        sample_rate: Option<i32>,
    },
    /// List available voices
    Voices,
    /// Show a single voice
    Voice {
        /// Voice name
        name: String,
    },
}

impl TtsCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            TtsSubcommand::Synthesize {
                text,
                voice,
                format,
                sample_rate,
            } => {
                let ctx = get_context(cli)?;
                let client = create_client(&ctx)?;

                let voice = voice
                    .clone()
                    .unwrap_or_else(|| ctx.default_voice.clone());
                let audio_format = parse_format(format.as_deref());

                let response = client
                    .text_to_speech()
                    .synthesize(&SynthesizeRequest {
                        text: text.clone(),
                        voice,
                        format: audio_format,
                        sample_rate: parse_rate(*sample_rate),
                    })
                    .await?;

                let path = cli.output.clone().unwrap_or_else(|| {
                    format!("speech.{}", guess_extension(audio_format.as_str()))
                });
                std::fs::write(&path, &response.audio)?;
                print_success(&format!("wrote {} bytes to {}", response.audio.len(), path));
                Ok(())
            }
            TtsSubcommand::Voices => {
                let ctx = get_context(cli)?;
                let client = create_client(&ctx)?;
                let voices = client.text_to_speech().list_voices().await?;
                output_result(cli, &voices)
            }
            TtsSubcommand::Voice { name } => {
                let ctx = get_context(cli)?;
                let client = create_client(&ctx)?;
                let voice = client.text_to_speech().get_voice(name).await?;
                output_result(cli, &voice)
            }
        }
    }
}
