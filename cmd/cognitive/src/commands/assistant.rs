//! Assistant (conversation) commands.

use clap::{Args, Subcommand};

use nimbus_cognitive::{MessageInput, MessageRequest};

use super::{create_client, get_context, output_result};
use crate::Cli;

/// Assistant (conversation) service.
#[derive(Args)]
pub struct AssistantCommand {
    #[command(subcommand)]
    command: AssistantSubcommand,
}

#[derive(Subcommand)]
enum AssistantSubcommand {
    /// Send a message turn to a workspace
    Message {
        /// Workspace id
        #[arg(short = 'w', long)]
        workspace: String,
        /// Message text
        text: String,
        /// Context file from a previous turn (JSON)
        #[arg(long)]
        context: Option<String>,
    },
    /// List workspaces
    Workspaces,
    /// Show a single workspace
    Workspace {
        /// Workspace id
        id: String,
    },
}

impl AssistantCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let client = create_client(&ctx)?;

        match &self.command {
            AssistantSubcommand::Message {
                workspace,
                text,
                context,
            } => {
                let dialog_context = match context {
                    Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
                    None => None,
                };

                let response = client
                    .assistant()
                    .message(
                        workspace,
                        &MessageRequest {
                            input: MessageInput { text: text.clone() },
                            context: dialog_context,
                            ..Default::default()
                        },
                    )
                    .await?;
                output_result(cli, &response)
            }
            AssistantSubcommand::Workspaces => {
                let workspaces = client.assistant().list_workspaces().await?;
                output_result(cli, &workspaces)
            }
            AssistantSubcommand::Workspace { id } => {
                let workspace = client.assistant().get_workspace(id).await?;
                output_result(cli, &workspace)
            }
        }
    }
}
