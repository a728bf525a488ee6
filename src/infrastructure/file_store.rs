use crate::domain::snippets::{StoreChange, StoreSnapshot};
use crate::domain::store::{SnippetStore, StoreError};
use async_trait::async_trait;
use notify::{RecursiveMode, Watcher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

pub const STORE_FILE: &str = "snippets.toml";
const SNIPPETS_KEY: &str = "snippets";
const TRIGGER_KEY: &str = "trigger_symbol";
const DEBOUNCE: Duration = Duration::from_millis(150);

/// Snippets kept in a TOML file the settings surface writes:
///
/// ```toml
/// trigger_symbol = "!!"
/// snippets = ["Summarize the text above.", "Explain like I'm five."]
/// ```
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Unparsable content is treated as an empty store.
pub fn parse_snapshot(content: &str, path: &Path) -> StoreSnapshot {
    match content.parse::<toml::Table>() {
        Ok(mut table) => StoreSnapshot {
            snippets: table.remove(SNIPPETS_KEY),
            trigger_symbol: table.remove(TRIGGER_KEY),
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring malformed snippet file");
            StoreSnapshot::default()
        }
    }
}

async fn load(path: &Path) -> Result<StoreSnapshot, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(parse_snapshot(&content, path)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(StoreSnapshot::default()),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn load_blocking(path: &Path) -> StoreSnapshot {
    std::fs::read_to_string(path)
        .map(|content| parse_snapshot(&content, path))
        .unwrap_or_default()
}

#[async_trait]
impl SnippetStore for TomlFileStore {
    async fn get(&self) -> Result<StoreSnapshot, StoreError> {
        load(&self.path).await
    }

    /// Watches the file's directory (editors often replace files instead of
    /// writing in place) and reports only the keys that changed.
    fn subscribe(&self) -> Result<mpsc::Receiver<StoreChange>, StoreError> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .ok_or(StoreError::NoConfigDir)?;
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Read {
            path: dir.clone(),
            source,
        })?;

        let (notify_tx, mut notify_rx) = mpsc::channel(1);
        let file_name = self.path.file_name().map(ToOwned::to_owned);
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
                if let Ok(event) = res {
                    if event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == file_name.as_deref())
                    {
                        let _ = notify_tx.try_send(());
                    }
                }
            })
            .map_err(|source| StoreError::Watch {
                path: dir.clone(),
                source,
            })?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|source| StoreError::Watch {
                path: dir.clone(),
                source,
            })?;

        let (change_tx, change_rx) = mpsc::channel(16);
        let path = self.path.clone();
        let mut last = load_blocking(&path);

        tokio::spawn(async move {
            let _watcher = watcher;
            let mut pending = false;
            loop {
                tokio::select! {
                    () = change_tx.closed() => break,
                    received = notify_rx.recv() => {
                        if received.is_none() {
                            break;
                        }
                        pending = true;
                    }
                    () = tokio::time::sleep(DEBOUNCE), if pending => {
                        pending = false;
                        let next = match load(&path).await {
                            Ok(next) => next,
                            Err(err) => {
                                tracing::warn!(%err, "failed to reload snippets");
                                continue;
                            }
                        };
                        let change = StoreChange::between(&last, &next);
                        last = next;
                        if change.is_empty() {
                            continue;
                        }
                        tracing::info!(path = %path.display(), "snippet file changed");
                        if change_tx.send(change).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Ok(change_rx)
    }
}
