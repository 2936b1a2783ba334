use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use lettercraft_api::client::clipboard::Osc52Clipboard;
use lettercraft_api::client::{Lettercraft, SelectedFile, Slot, UploadClient, UploadState};
use lettercraft_api::craft::options::{DEFAULT_LANGUAGE, DEFAULT_TONE};
use lettercraft_api::telemetry::init_tracing;

/// Generate a cover letter from a resume and a job description.
#[derive(Debug, Parser)]
#[command(name = "lettercraft", version)]
struct Args {
    /// Resume file (PDF or image)
    #[arg(long)]
    resume: PathBuf,

    /// Job description file (PDF or image)
    #[arg(long)]
    job_description: PathBuf,

    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    #[arg(long, default_value = DEFAULT_TONE)]
    tone: String,

    /// Base URL of the Lettercraft API
    #[arg(long, env = "LETTERCRAFT_SERVER", default_value = "http://localhost:8080")]
    server: String,

    /// Give up on the request after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Also copy the letter to the terminal clipboard (OSC 52)
    #[arg(long)]
    copy: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut session = Lettercraft::new();
    session.set_language(args.language.clone());
    session.set_tone(args.tone.clone());

    for (slot, path) in [
        (Slot::Resume, &args.resume),
        (Slot::JobDescription, &args.job_description),
    ] {
        let file = load_file(path).await?;
        if session.select_file(slot, file).is_err() {
            bail!(
                "{}: {}",
                path.display(),
                session.validation_error().unwrap_or_default()
            );
        }
    }

    let Some(submission) = session.begin_generation() else {
        bail!("{}", session.validation_error().unwrap_or_default());
    };
    info!(
        language = %submission.language,
        tone = %submission.tone,
        total_bytes = submission.total_bytes(),
        "Submitting"
    );

    let client = UploadClient::new(&args.server, args.timeout_secs.map(Duration::from_secs))?;
    let (progress_tx, mut progress_rx) = tokio::sync::watch::channel((0u64, 0u64));
    let mut request = tokio::spawn(async move {
        client
            .submit(&submission, move |sent, total| {
                let _ = progress_tx.send((sent, total));
            })
            .await
    });

    let outcome = loop {
        tokio::select! {
            outcome = &mut request => break outcome?,
            changed = progress_rx.changed() => {
                if changed.is_err() {
                    break (&mut request).await?;
                }
                let (sent, total) = *progress_rx.borrow_and_update();
                session.record_progress(sent, total);
                eprint!("\rUploading... {:>3}%", session.progress());
            }
        }
    };
    eprintln!();

    session.finish(outcome);

    match session.state() {
        UploadState::Succeeded { letter } => {
            println!("{letter}");
        }
        UploadState::Failed { message } => bail!("{message}"),
        other => bail!("unexpected client state: {other:?}"),
    }

    if args.copy {
        let now = Instant::now();
        let mut clipboard = Osc52Clipboard::new(std::io::stdout());
        session.copy_result(&mut clipboard, now)?;
        std::io::stdout().flush()?;
        eprintln!("{}", session.copy_label(now));
    }

    Ok(())
}

async fn load_file(path: &Path) -> Result<SelectedFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile::new(file_name, mime_type, bytes))
}
