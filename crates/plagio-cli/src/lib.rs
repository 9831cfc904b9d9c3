//! # plagio-cli: Command-Line Client for Plagio
//!
//! Provides the `plagio` command-line interface.
//!
//! ## Subcommands
//!
//! - `plagio upload`: Store a text file through the gateway.
//! - `plagio get`: Download a stored document.
//! - `plagio analyse`: Paragraph, word and character counts for a document.
//! - `plagio fingerprint`: Offline fingerprint and blob location of a file.
//! - `plagio count`: Offline counts, identical to what the service computes.
//!
//! ```bash
//! plagio --gateway http://localhost:8080 upload essay.txt
//! plagio analyse 550e8400-e29b-41d4-a716-446655440000
//! plagio count essay.txt
//! ```
//!
//! Network subcommands talk to `--gateway`, falling back to
//! `PLAGIO_GATEWAY_URL` and then `http://localhost:8080`.

pub mod documents;
pub mod offline;

use anyhow::{Context, Result};
use plagio_client::{ClientConfig, PlagioClient};
use url::Url;

/// Exit code for a successful command.
pub const EXIT_OK: u8 = 0;

/// Exit code for a command that ran but was refused (duplicate, not found).
pub const EXIT_REFUSED: u8 = 1;

/// Build a client whose gateway is `gateway`, or the environment default.
pub fn gateway_client(gateway: Option<Url>) -> Result<PlagioClient> {
    let mut config = ClientConfig::from_env().context("reading client configuration")?;
    if let Some(url) = gateway {
        config.gateway_url = url;
    }
    tracing::debug!(gateway = %config.gateway_url, "using gateway");
    PlagioClient::new(config).context("building HTTP client")
}
