//! FaceCloud command-line client.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use facecloud_client::{FaceClient, FaceClientConfig, FaceDetector, MemorySettings, SettingsStore};
use facecloud_models::{FaceRect, Mode};

/// Feature flags shared by detect and match.
#[derive(clap::Args, Clone, Debug)]
struct FeatureArgs {
    /// Request age, gender and ethnicity estimates
    #[arg(long)]
    demographics: bool,

    /// Request face attributes
    #[arg(long)]
    attributes: bool,

    /// Request facial landmarks
    #[arg(long)]
    landmarks: bool,
}

#[derive(Parser)]
#[command(name = "facecloud")]
#[command(about = "Face detection and matching against the FaceCloud service")]
#[command(version)]
struct Cli {
    /// Service base URL (overrides FACECLOUD_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Response window in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Access token (overrides FACECLOUD_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the operations the service publishes
    Endpoints,
    /// Detect faces on an image
    Detect {
        image: PathBuf,

        /// Smallest face size to search for
        #[arg(long)]
        min_size: Option<i32>,

        /// Largest face size to search for
        #[arg(long)]
        max_size: Option<i32>,

        /// Detection confidence threshold
        #[arg(long)]
        threshold: Option<f32>,

        /// Known face rectangle as x,y,w,h (excludes size bounds)
        #[arg(long, conflicts_with_all = ["min_size", "max_size", "threshold"])]
        face: Option<FaceRect>,

        #[command(flatten)]
        features: FeatureArgs,
    },
    /// Compare the faces on two images
    Match {
        image1: PathBuf,
        image2: PathBuf,

        /// Face rectangle on the first image as x,y,w,h
        #[arg(long)]
        face1: Option<FaceRect>,

        /// Face rectangle on the second image as x,y,w,h
        #[arg(long, requires = "face1")]
        face2: Option<FaceRect>,

        #[command(flatten)]
        features: FeatureArgs,
    },
}

fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("facecloud=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}

fn apply_features(client: &mut FaceClient, features: &FeatureArgs) {
    client.set_demographics(features.demographics);
    client.set_attributes(features.attributes);
    client.set_landmarks(features.landmarks);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();

    let settings = Arc::new(MemorySettings::from_env());
    if let Some(token) = &cli.token {
        settings.set_token(token);
    }

    let mut config = FaceClientConfig::from_env();
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(ms) = cli.timeout_ms {
        config.timeout = Duration::from_millis(ms);
    }

    let store: Arc<dyn SettingsStore> = settings;
    let mut client = FaceClient::new(config, store)
        .await
        .context("Failed to create FaceCloud client")?;
    info!(base_url = %client.base_url(), "FaceCloud client ready");

    match cli.command {
        Command::Endpoints => {
            if client.catalog().is_empty() {
                bail!("Service at {} published no endpoints", client.base_url());
            }
            let mut endpoints: Vec<_> = client.catalog().iter().collect();
            endpoints.sort();
            for (key, path) in endpoints {
                println!("{:<12} {}", key, path);
            }
        }
        Command::Detect {
            image,
            min_size,
            max_size,
            threshold,
            face,
            features,
        } => {
            client.login_from_settings().await?;
            client.set_mode(Mode::Detect);
            apply_features(&mut client, &features);

            if let Some(face) = face {
                client.set_face1(face);
            }
            for (name, applied) in [
                ("min-size", min_size.map(|v| client.set_min_size(v))),
                ("max-size", max_size.map(|v| client.set_max_size(v))),
                ("threshold", threshold.map(|v| client.set_threshold(v))),
            ] {
                if applied == Some(false) {
                    warn!(option = name, "Option ignored");
                }
            }

            let mut detector = FaceDetector::new(image.clone());
            let updated = detector
                .run(&client)
                .await
                .with_context(|| format!("Detection failed for {}", image.display()))?;
            if !updated {
                warn!(image = %image.display(), "Service returned an empty result");
            }

            let report = json!({
                "image": image.display().to_string(),
                "bbox": detector.bounding_box(),
                "landmarks": detector.landmarks(),
                "attributes": detector.attributes(),
                "demographics": detector.demographics(),
                "response": detector.document().map(|d| d.root().clone()),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Match {
            image1,
            image2,
            face1,
            face2,
            features,
        } => {
            client.login_from_settings().await?;
            client.set_mode(Mode::Match);
            apply_features(&mut client, &features);

            if let Some(face) = face1 {
                client.set_face1(face);
            }
            if let Some(face) = face2 {
                client.set_face2(face);
            }

            let document = client
                .match_faces(&image1, &image2)
                .await
                .context("Match request failed")?;
            println!("{}", serde_json::to_string_pretty(&document.into_inner())?);
        }
    }

    Ok(())
}
