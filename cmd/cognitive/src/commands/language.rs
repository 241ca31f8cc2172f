//! Language Analyzer commands.

use clap::{Args, Subcommand};

use nimbus_cognitive::{AnalyzeRequest, Features};

use super::{create_client, get_context, output_result};
use crate::Cli;

/// Language Analyzer service.
#[derive(Args)]
pub struct LanguageCommand {
    #[command(subcommand)]
    command: LanguageSubcommand,
}

#[derive(Subcommand)]
enum LanguageSubcommand {
    /// Analyze text
    Analyze {
        /// Text to analyze
        text: String,
        /// Compute document sentiment
        #[arg(long)]
        sentiment: bool,
        /// Extract named entities
        #[arg(long)]
        entities: bool,
        /// Extract keywords
        #[arg(long)]
        keywords: bool,
        /// Language hint, e.g. en
        #[arg(short = 'l', long)]
        language: Option<String>,
    },
}

impl LanguageCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            LanguageSubcommand::Analyze {
                text,
                sentiment,
                entities,
                keywords,
                language,
            } => {
                let ctx = get_context(cli)?;
                let client = create_client(&ctx)?;

                // With no feature flags, compute everything.
                let all = !sentiment && !entities && !keywords;

                let response = client
                    .language()
                    .analyze(&AnalyzeRequest {
                        text: text.clone(),
                        features: Features {
                            sentiment: *sentiment || all,
                            entities: *entities || all,
                            keywords: *keywords || all,
                        },
                        language: language.clone(),
                    })
                    .await?;
                output_result(cli, &response)
            }
        }
    }
}
