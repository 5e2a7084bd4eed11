// ABOUTME: Persistent key-value store holding the auth token
// ABOUTME: JSON file under ~/.onboard, written whole on every change

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::error::{AuthError, AuthResult};

/// Key the login token is stored under
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Default token file (`~/.onboard/token.json`)
pub fn default_token_file() -> AuthResult<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".onboard").join("token.json"))
        .ok_or_else(|| AuthError::Storage("unable to determine home directory".to_string()))
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn set_item(&self, key: &str, value: &str) -> AuthResult<()>;
    async fn get_item(&self, key: &str) -> AuthResult<Option<String>>;
    async fn remove_item(&self, key: &str) -> AuthResult<()>;
}

pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> AuthResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => {
                error!("Failed to read token store {}: {}", self.path.display(), e);
                Err(e.into())
            }
        }
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, contents).await.map_err(|e| {
            error!("Failed to write token store {}: {}", self.path.display(), e);
            AuthError::Storage(e.to_string())
        })
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn set_item(&self, key: &str, value: &str) -> AuthResult<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await?;
        debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }

    async fn get_item(&self, key: &str) -> AuthResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn remove_item(&self, key: &str) -> AuthResult<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        if items.remove(key).is_none() {
            return Err(AuthError::TokenNotFound(key.to_string()));
        }
        self.write_all(&items).await
    }
}
