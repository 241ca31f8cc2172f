//! Visual Recognition commands.

use clap::{Args, Subcommand};

use nimbus_cognitive::{ClassifyRequest, DetectFacesRequest};

use super::{create_client, get_context, output_result};
use crate::Cli;

/// Visual Recognition service.
#[derive(Args)]
pub struct VisionCommand {
    #[command(subcommand)]
    command: VisionSubcommand,
}

#[derive(Subcommand)]
enum VisionSubcommand {
    /// Classify an image
    Classify {
        /// Image file path
        #[arg(short = 'i', long)]
        image: Option<String>,
        /// Image URL (alternative to a file)
        #[arg(long)]
        url: Option<String>,
        /// Classifier ids to run
        #[arg(long)]
        classifier: Vec<String>,
        /// Minimum score to report
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Detect faces in an image
    Faces {
        /// Image file path
        #[arg(short = 'i', long)]
        image: Option<String>,
        /// Image URL (alternative to a file)
        #[arg(long)]
        url: Option<String>,
    },
}

impl VisionCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let ctx = get_context(cli)?;
        let client = create_client(&ctx)?;

        match &self.command {
            VisionSubcommand::Classify {
                image,
                url,
                classifier,
                threshold,
            } => {
                let image_bytes = read_image(image.as_deref(), url.as_deref())?;
                let response = client
                    .vision()
                    .classify(&ClassifyRequest {
                        image: image_bytes,
                        url: url.clone(),
                        classifier_ids: classifier.clone(),
                        threshold: *threshold,
                    })
                    .await?;
                output_result(cli, &response)
            }
            VisionSubcommand::Faces { image, url } => {
                let image_bytes = read_image(image.as_deref(), url.as_deref())?;
                let response = client
                    .vision()
                    .detect_faces(&DetectFacesRequest {
                        image: image_bytes,
                        url: url.clone(),
                    })
                    .await?;
                output_result(cli, &response)
            }
        }
    }
}

fn read_image(image: Option<&str>, url: Option<&str>) -> anyhow::Result<Option<Vec<u8>>> {
    match image {
        Some(path) => Ok(Some(std::fs::read(path)?)),
        None if url.is_some() => Ok(None),
        None => anyhow::bail!("either --image or --url is required"),
    }
}
