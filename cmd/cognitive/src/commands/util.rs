//! Utility functions for CLI commands.

use nimbus_cli::config::{Config, Context, load_config};
use nimbus_cli::output::{Output, OutputFormat};
use nimbus_cognitive::{AudioFormat, Client, Language, SampleRate};

use crate::Cli;

const APP_NAME: &str = "cognitive";

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(APP_NAME, cli.config.as_deref())
}

/// Gets the context configuration to use.
pub fn get_context(cli: &Cli) -> anyhow::Result<Context> {
    let cfg = get_config(cli)?;

    match cfg.resolve_context(cli.context.as_deref()) {
        Some(ctx) => Ok(ctx.clone()),
        None => {
            if cli.context.is_none() {
                anyhow::bail!(
                    "no context specified. Use -c flag or set a default context with 'nimbus config use-context'"
                );
            }
            anyhow::bail!("context '{}' not found", cli.context.as_deref().unwrap());
        }
    }
}

/// Creates an API client from a context.
pub fn create_client(ctx: &Context) -> anyhow::Result<Client> {
    let mut builder = Client::builder(&ctx.api_key);

    if !ctx.base_url.is_empty() {
        builder = builder.base_url(&ctx.base_url);
    }
    if !ctx.ws_url.is_empty() {
        builder = builder.ws_url(&ctx.ws_url);
    }
    if ctx.max_retries > 0 {
        builder = builder.max_retries(ctx.max_retries as u32);
    }

    Ok(builder.build()?)
}

/// Outputs a result per the global output flags.
pub fn output_result<T: serde::Serialize>(cli: &Cli, result: &T) -> anyhow::Result<()> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Yaml
    };
    Output::new(format, cli.output.clone()).write(result)
}

/// Prints a success message to stderr so stdout stays pipeable.
pub fn print_success(message: &str) {
    eprintln!("{}", message);
}

/// Parses an audio format flag, defaulting to wav.
pub fn parse_format(format: Option<&str>) -> AudioFormat {
    match format.unwrap_or("wav") {
        "pcm" => AudioFormat::Pcm,
        "mp3" => AudioFormat::Mp3,
        "flac" => AudioFormat::Flac,
        "ogg" => AudioFormat::Ogg,
        _ => AudioFormat::Wav,
    }
}

/// Parses a sample rate flag, defaulting to 16 kHz.
pub fn parse_rate(rate: Option<i32>) -> SampleRate {
    match rate {
        Some(8000) => SampleRate::Rate8k,
        Some(22050) => SampleRate::Rate22k,
        Some(44100) => SampleRate::Rate44k,
        _ => SampleRate::Rate16k,
    }
}

/// Parses a language flag.
pub fn parse_language(language: &str) -> Option<Language> {
    match language {
        "en-US" => Some(Language::EnUs),
        "en-GB" => Some(Language::EnGb),
        "es-ES" => Some(Language::EsEs),
        "fr-FR" => Some(Language::FrFr),
        "de-DE" => Some(Language::DeDe),
        "pt-BR" => Some(Language::PtBr),
        "ja-JP" => Some(Language::JaJp),
        "zh-CN" => Some(Language::ZhCn),
        _ => None,
    }
}
