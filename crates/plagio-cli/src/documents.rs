//! # Document Subcommands
//!
//! `upload`, `get` and `analyse`, all routed through the gateway.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use plagio_client::PlagioClient;
use plagio_core::DocumentId;

use crate::{EXIT_OK, EXIT_REFUSED};

/// Arguments for `plagio upload`.
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Text file to upload. Its name is kept as the display name.
    pub file: PathBuf,

    /// Media type to send. Defaults to the service default (text/plain).
    #[arg(long)]
    pub media_type: Option<String>,
}

/// Arguments for `plagio get`.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Document identifier.
    pub id: DocumentId,

    /// Write the bytes here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `plagio analyse`.
#[derive(Args, Debug)]
pub struct AnalyseArgs {
    /// Document identifier.
    pub id: DocumentId,
}

/// Upload a file and print its identifier.
///
/// Returns [`EXIT_REFUSED`] when identical content is already stored.
pub async fn run_upload(args: &UploadArgs, client: &PlagioClient) -> Result<u8> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let file_name = display_name(&args.file);

    match client
        .gateway()
        .upload(bytes, &file_name, args.media_type.as_deref())
        .await
    {
        Ok(id) => {
            println!("{id}");
            Ok(EXIT_OK)
        }
        Err(e) if e.status() == Some(409) => {
            eprintln!(
                "{}: {}",
                args.file.display(),
                e.api_message().unwrap_or_else(|| "already stored".to_string())
            );
            Ok(EXIT_REFUSED)
        }
        Err(e) => Err(e).context("uploading document"),
    }
}

/// Download a document to stdout or `--output`.
pub async fn run_get(args: &GetArgs, client: &PlagioClient) -> Result<u8> {
    let Some(doc) = client
        .gateway()
        .download(args.id)
        .await
        .context("downloading document")?
    else {
        eprintln!("document {} not found", args.id);
        return Ok(EXIT_REFUSED);
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &doc.bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                bytes = doc.bytes.len(),
                file_name = doc.file_name.as_deref().unwrap_or(""),
                "document saved"
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&doc.bytes).context("writing to stdout")?;
            stdout.flush().context("writing to stdout")?;
        }
    }
    Ok(EXIT_OK)
}

/// Analyse a document and print the record as JSON.
pub async fn run_analyse(args: &AnalyseArgs, client: &PlagioClient) -> Result<u8> {
    let Some(reply) = client
        .gateway()
        .analyse(args.id)
        .await
        .context("analysing document")?
    else {
        eprintln!("document {} not found", args.id);
        return Ok(EXIT_REFUSED);
    };

    if let Some(status) = &reply.cache_status {
        tracing::info!(cache = %status, "analysis served");
    }
    println!("{}", serde_json::to_string_pretty(&reply.report)?);
    Ok(EXIT_OK)
}

/// The name a file is uploaded under: its final path component.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
