use crate::domain::snippets::{StoreChange, StoreSnapshot};
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    #[error("no configuration directory available")]
    NoConfigDir,
}

/// Where the saved prompts and trigger live. Owned by the settings surface;
/// the engine only reads it and listens for changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetStore: Send + Sync {
    async fn get(&self) -> Result<StoreSnapshot, StoreError>;

    fn subscribe(&self) -> Result<mpsc::Receiver<StoreChange>, StoreError>;
}
