//! Knowledge base loading
//!
//! Each table loads independently; a missing or malformed file leaves
//! that table `None` and the assistant answers "data unavailable" for
//! the affected intents. The tables are immutable after loading.

use std::collections::BTreeMap;
use std::path::Path;

use crate::tables::{CropInfo, PriceEntry, Scheme};
use crate::KnowledgeError;

/// Crop advisory table: crop name → advisory fields.
pub type CropTable = BTreeMap<String, CropInfo>;

/// Mandi price table: market full name → crop name → price entry.
pub type MandiTable = BTreeMap<String, BTreeMap<String, PriceEntry>>;

/// The three knowledge tables, loaded once per process.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    pub crops: Option<CropTable>,
    pub mandi: Option<MandiTable>,
    pub schemes: Option<Vec<Scheme>>,
}

impl KnowledgeBase {
    /// Load all three tables, tolerating absent files.
    ///
    /// Load failures are logged and leave the table unset; the caller
    /// decides nothing — degradation is handled at reply time.
    pub fn load(
        crop_path: impl AsRef<Path>,
        mandi_path: impl AsRef<Path>,
        schemes_path: impl AsRef<Path>,
    ) -> Self {
        let crops = load_table::<CropTable>(crop_path.as_ref(), "crop_advisory");
        let mandi = load_table::<MandiTable>(mandi_path.as_ref(), "mandi_prices");
        let schemes = load_table::<Vec<Scheme>>(schemes_path.as_ref(), "schemes");

        tracing::info!(
            crops = crops.as_ref().map(|t| t.len()).unwrap_or(0),
            mandis = mandi.as_ref().map(|t| t.len()).unwrap_or(0),
            schemes = schemes.as_ref().map(|t| t.len()).unwrap_or(0),
            "Knowledge base loaded"
        );

        Self {
            crops,
            mandi,
            schemes,
        }
    }

    /// Strict single-file loader, used by tests and tooling.
    pub fn load_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, KnowledgeError> {
        let text = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| KnowledgeError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

fn load_table<T: serde::de::DeserializeOwned>(path: &Path, table: &str) -> Option<T> {
    if !path.exists() {
        tracing::warn!(table, path = %path.display(), "Knowledge file not found, table disabled");
        return None;
    }
    match KnowledgeBase::load_file::<T>(path) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(table, error = %e, "Failed to load knowledge file, table disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_files_disable_tables() {
        let dir = tempfile::tempdir().unwrap();
        let kb = KnowledgeBase::load(
            dir.path().join("none1.json"),
            dir.path().join("none2.json"),
            dir.path().join("none3.json"),
        );
        assert!(kb.crops.is_none());
        assert!(kb.mandi.is_none());
        assert!(kb.schemes.is_none());
    }

    #[test]
    fn malformed_file_disables_only_that_table() {
        let dir = tempfile::tempdir().unwrap();
        let crops = write_temp(&dir, "crops.json", r#"{"गेहूं": {"sowing_time": "अक्टूबर"}}"#);
        let mandi = write_temp(&dir, "mandi.json", "not json at all");
        let schemes = write_temp(&dir, "schemes.json", "[]");

        let kb = KnowledgeBase::load(&crops, &mandi, &schemes);
        assert!(kb.crops.is_some());
        assert!(kb.mandi.is_none());
        assert_eq!(kb.schemes.as_ref().unwrap().len(), 0);
    }

    #[test]
    fn loads_full_mandi_table() {
        let dir = tempfile::tempdir().unwrap();
        let mandi = write_temp(
            &dir,
            "mandi.json",
            r#"{"कानपुर मंडी": {"गेहूं": {"price": "₹2100 प्रति क्विंटल", "last_updated": "2024-05-01"}}}"#,
        );
        let kb = KnowledgeBase::load(dir.path().join("x.json"), &mandi, dir.path().join("y.json"));
        let table = kb.mandi.unwrap();
        assert_eq!(
            table["कानपुर मंडी"]["गेहूं"].price,
            "₹2100 प्रति क्विंटल"
        );
    }
}
