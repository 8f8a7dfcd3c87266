use crate::error::{QuoteError, QuoteResult};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;

/// Read and parse a JSON file. A missing file is `Ok(None)`.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> QuoteResult<Option<T>> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(store_read(path, e)),
    };

    serde_json::from_str(&data)
        .map(Some)
        .map_err(|e| store_read(path, e))
}

/// Like [`load_json`], but any failure degrades to `T::default()`.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(Some(value)) => value,
        Ok(None) => {
            tracing::warn!(path = %path.display(), "Data file not found, using empty data");
            T::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Data file unusable, using empty data");
            T::default()
        }
    }
}

fn store_read(path: &Path, reason: impl std::fmt::Display) -> QuoteError {
    QuoteError::StoreRead {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use tempfile::TempDir;

    /// Scratch data directory, removed with the inner `TempDir`.
    pub struct DataDir(TempDir);

    impl DataDir {
        pub fn new() -> Self {
            Self(tempfile::tempdir().unwrap())
        }

        pub fn write(&self, name: &str, contents: &str) -> &Self {
            std::fs::write(self.path().join(name), contents).unwrap();
            self
        }

        pub fn path(&self) -> &Path {
            self.0.path()
        }
    }
}
