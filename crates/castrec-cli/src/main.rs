//! castrec — drive one simulated recording session end to end.
//!
//! Runs request → confirm → record → pause → resume → stop against the
//! simulated platform (which ticks out synthetic chunks) and writes the
//! finalized artifact to disk.
//!
//! # Environment
//!
//! | Variable          | Default | Meaning                          |
//! |-------------------|---------|----------------------------------|
//! | `CASTREC_LABEL`   | (empty) | Recording name (empty → default) |
//! | `CASTREC_SECONDS` | `3`     | Total recording time             |
//! | `CASTREC_OUT`     | `.`     | Output directory                 |

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use castrec_core::RecorderConfig;
use castrec_media::sim::SimPlatform;
use castrec_session::CaptureSession;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("castrec v{}", env!("CARGO_PKG_VERSION"));

    let label = env_or("CASTREC_LABEL", "");
    let seconds: u64 = env_or("CASTREC_SECONDS", "3")
        .parse()
        .context("CASTREC_SECONDS must be an integer")?;
    let out_dir = env_or("CASTREC_OUT", ".");

    let platform = SimPlatform::with_chunk_interval(Duration::from_millis(200));
    let mut session = CaptureSession::new(Box::new(platform), RecorderConfig::default());

    session.request_start();
    session
        .confirm_start(&label)
        .await
        .context("starting recording")?;

    // Record the first half, pause briefly, then record the rest.
    let half = Duration::from_millis(seconds * 500);
    tokio::time::sleep(half).await;
    session.pump();
    session.pause();
    info!("paused at {:?}", session.elapsed());
    tokio::time::sleep(Duration::from_millis(300)).await;
    session.resume();
    tokio::time::sleep(half).await;

    let artifact = session.stop().await.context("no artifact produced")?;
    let path = Path::new(&out_dir).join(artifact.file_name());
    std::fs::write(&path, artifact.data())
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {} ({} bytes)", path.display(), artifact.byte_len());

    Ok(())
}
