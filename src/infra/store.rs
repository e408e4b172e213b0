// src/infra/store.rs — Ledger persistence (JSON file)
//
// The whole ledger is read once at startup and written back once per
// invocation. Writes go to a temp file in the same directory and are
// renamed over the ledger, so an interrupted save leaves the old file.

use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::core::Ledger;
use crate::infra::errors::WbsoError;

#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger. `None` when the file does not exist yet.
    pub async fn load(&self) -> anyhow::Result<Option<Ledger>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            tracing::warn!(path = %self.path.display(), "ledger file is empty, starting fresh");
            return Ok(Some(Ledger::new()));
        }

        let ledger: Ledger = serde_json::from_str(&content)
            .map_err(WbsoError::from)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        ledger
            .validate()
            .with_context(|| format!("validating {}", self.path.display()))?;
        tracing::debug!(sessions = ledger.len(), open = ?ledger.open_index(), "ledger loaded");
        Ok(Some(ledger))
    }

    /// Read the ledger, creating an empty file when missing. The flag is
    /// `true` when the file was just created.
    pub async fn load_or_create(&self) -> anyhow::Result<(Ledger, bool)> {
        if let Some(ledger) = self.load().await? {
            return Ok((ledger, false));
        }
        let ledger = Ledger::new();
        self.save(&ledger).await?;
        tracing::info!(path = %self.path.display(), "created new ledger file");
        Ok((ledger, true))
    }

    /// Atomically write the ledger (temp file + rename).
    pub async fn save(&self, ledger: &Ledger) -> anyhow::Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("creating {}", dir.display()))?;

        let json = serde_json::to_string_pretty(ledger).map_err(WbsoError::from)?;
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ledger.json".into());
        let tmp = dir.join(format!(".{file_name}.tmp"));

        let mut f = tokio::fs::File::create(&tmp)
            .await
            .with_context(|| format!("creating {}", tmp.display()))?;
        f.write_all(json.as_bytes()).await?;
        f.flush().await?;
        f.sync_all().await?;
        drop(f);
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        tracing::debug!(sessions = ledger.len(), path = %self.path.display(), "ledger saved");
        Ok(())
    }
}
