//! Configuration management commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use nimbus_cli::config::{Context as CliContext, mask_api_key};

use super::{get_config, output_result, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Contexts allow you to manage multiple API configurations,
/// similar to kubectl's context management.
///
/// Configuration is stored in ~/.nimbus/cognitive/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Add a new context
    #[command(name = "add-context")]
    AddContext {
        /// Context name
        name: String,
        /// API key (required)
        #[arg(long)]
        api_key: String,
        /// API base URL
        #[arg(long)]
        base_url: Option<String>,
        /// WebSocket URL
        #[arg(long)]
        ws_url: Option<String>,
        /// Maximum retries
        #[arg(long)]
        max_retries: Option<i32>,
        /// Default recognition model
        #[arg(long)]
        default_model: Option<String>,
        /// Default voice for synthesis
        #[arg(long)]
        default_voice: Option<String>,
    },
    /// Delete a context
    #[command(name = "delete-context")]
    DeleteContext {
        /// Context name
        name: String,
    },
    /// Set the current context
    #[command(name = "use-context")]
    UseContext {
        /// Context name
        name: String,
    },
    /// Display the current context
    #[command(name = "get-context")]
    GetContext,
    /// List all contexts
    #[command(name = "list-contexts", alias = "get-contexts")]
    ListContexts,
}

/// Context view with the API key masked.
#[derive(Serialize)]
struct ContextView {
    name: String,
    api_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    base_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    ws_url: String,
    current: bool,
}

impl ConfigCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::AddContext {
                name,
                api_key,
                base_url,
                ws_url,
                max_retries,
                default_model,
                default_voice,
            } => {
                let mut cfg = get_config(cli)?;

                let ctx = CliContext {
                    api_key: api_key.clone(),
                    base_url: base_url.clone().unwrap_or_default(),
                    ws_url: ws_url.clone().unwrap_or_default(),
                    max_retries: max_retries.unwrap_or(0),
                    default_model: default_model.clone().unwrap_or_default(),
                    default_voice: default_voice.clone().unwrap_or_default(),
                    ..Default::default()
                };

                cfg.add_context(name, ctx)?;
                if cfg.current_context.is_empty() {
                    cfg.use_context(name)?;
                }
                print_success(&format!("context '{}' added", name));
                Ok(())
            }
            ConfigSubcommand::DeleteContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.delete_context(name)?;
                print_success(&format!("context '{}' deleted", name));
                Ok(())
            }
            ConfigSubcommand::UseContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.use_context(name)?;
                print_success(&format!("switched to context '{}'", name));
                Ok(())
            }
            ConfigSubcommand::GetContext => {
                let cfg = get_config(cli)?;
                let ctx = cfg
                    .get_current_context()
                    .ok_or_else(|| anyhow::anyhow!("no current context"))?;
                output_result(cli, &view(ctx, true))
            }
            ConfigSubcommand::ListContexts => {
                let cfg = get_config(cli)?;
                let mut views: Vec<ContextView> = cfg
                    .contexts
                    .values()
                    .map(|ctx| view(ctx, ctx.name == cfg.current_context))
                    .collect();
                views.sort_by(|a, b| a.name.cmp(&b.name));
                output_result(cli, &views)
            }
        }
    }
}

fn view(ctx: &CliContext, current: bool) -> ContextView {
    ContextView {
        name: ctx.name.clone(),
        api_key: mask_api_key(&ctx.api_key),
        base_url: ctx.base_url.clone(),
        ws_url: ctx.ws_url.clone(),
        current,
    }
}
