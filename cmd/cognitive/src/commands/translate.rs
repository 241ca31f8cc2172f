//! Language Translator commands.

use clap::{Args, Subcommand};

use nimbus_cognitive::TranslateRequest;

use super::{create_client, get_context, output_result};
use crate::Cli;

/// Language Translator service.
#[derive(Args)]
pub struct TranslateCommand {
    #[command(subcommand)]
    command: TranslateSubcommand,
}

#[derive(Subcommand)]
enum TranslateSubcommand {
    /// Translate text
    Text {
        /// Text to translate
        text: Vec<String>,
        /// Translation model id, e.g. en-es
        #[arg(short = 'm', long)]
        model: Option<String>,
        /// Source language code
        #[arg(long)]
        source: Option<String>,
        /// Target language code
        #[arg(long)]
        target: Option<String>,
    },
    /// Identify the language of text
    Identify {
        /// Text to identify
        text: String,
    },
    /// List available translation models
    Models,
    /// List identifiable languages
    Languages,
}

impl TranslateCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let client = create_client(&ctx)?;

        match &self.command {
            TranslateSubcommand::Text {
                text,
                model,
                source,
                target,
            } => {
                if text.is_empty() {
                    anyhow::bail!("text is required");
                }
                if model.is_none() && (source.is_none() || target.is_none()) {
                    anyhow::bail!("either --model or both --source and --target are required");
                }

                let response = client
                    .translator()
                    .translate(&TranslateRequest {
                        text: text.clone(),
                        model_id: model.clone(),
                        source: source.clone(),
                        target: target.clone(),
                    })
                    .await?;
                output_result(cli, &response)
            }
            TranslateSubcommand::Identify { text } => {
                let languages = client.translator().identify(text).await?;
                output_result(cli, &languages)
            }
            TranslateSubcommand::Models => {
                let models = client.translator().list_models().await?;
                output_result(cli, &models)
            }
            TranslateSubcommand::Languages => {
                let languages = client.translator().list_identifiable_languages().await?;
                output_result(cli, &languages)
            }
        }
    }
}
