//! Document persistence.
//!
//! The board document lives in three flat JSON files under the data
//! directory: the district map and the two master lists. Writes go through
//! write-to-temp + rename, and the previous district map is copied to a
//! `.bak` file before every overwrite. On first start missing files can be
//! seeded from a bundled defaults directory.
//!
//! There is no lock and no version token: concurrent writers race and the
//! last arrival wins the whole document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roster_board::{districts_from_value, districts_to_value, District, Document};
use serde::Deserialize;
use tracing::{debug, info};

const COMPS_FILE: &str = "comps.json";
const BROS_FILE: &str = "brothers.json";
const FAMS_FILE: &str = "families.json";

/// Incoming write, decoded from either the wrapped or the legacy body shape.
///
/// Master lists are optional on the wire; an update without them leaves the
/// stored lists untouched.
#[derive(Debug, Deserialize)]
pub struct DocumentUpdate {
    #[serde(with = "roster_board::district_map")]
    pub comps: Vec<District>,

    #[serde(rename = "masterBros", default)]
    pub master_bros: Option<Vec<String>>,

    #[serde(rename = "masterFams", default)]
    pub master_fams: Option<Vec<String>>,
}

impl DocumentUpdate {
    /// Decode a POST body. Bodies with a `comps` key are the current shape;
    /// legacy bodies are the bare district map itself.
    pub fn from_wire(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if value.get("comps").is_some() {
            serde_json::from_value(value)
        } else {
            serde_json::from_value(serde_json::json!({ "comps": value }))
        }
    }
}

/// Flat-file document store.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open the store, creating the data directory and seeding any missing
    /// files from `seed_dir`.
    pub fn new(data_dir: impl Into<PathBuf>, seed_dir: Option<&Path>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        if let Some(seed_dir) = seed_dir {
            for file in [COMPS_FILE, BROS_FILE, FAMS_FILE] {
                let src = seed_dir.join(file);
                let dest = data_dir.join(file);
                if !dest.exists() && src.exists() {
                    fs::copy(&src, &dest).with_context(|| {
                        format!("Failed to seed {} from {}", dest.display(), src.display())
                    })?;
                    info!(file, "Seeded data file");
                }
            }
        }

        Ok(Self { data_dir })
    }

    /// Read the full document. Missing files read as empty structures.
    pub fn load(&self) -> Result<Document> {
        let comps = match self.read_value(COMPS_FILE)? {
            Some(value) => districts_from_value(value)
                .with_context(|| format!("Failed to parse district map in {}", COMPS_FILE))?,
            None => Vec::new(),
        };
        let master_bros = self.read_names(BROS_FILE)?;
        let master_fams = self.read_names(FAMS_FILE)?;

        Ok(Document {
            comps,
            master_bros,
            master_fams,
        })
    }

    /// Replace the stored document with an incoming update.
    ///
    /// The previous district map is copied to `comps.json.bak` first; master
    /// list files are only rewritten when the update carries them.
    pub fn save(&self, update: &DocumentUpdate) -> Result<()> {
        let comps_path = self.data_dir.join(COMPS_FILE);
        if comps_path.exists() {
            let bak_path = comps_path.with_extension("json.bak");
            fs::copy(&comps_path, &bak_path).with_context(|| {
                format!("Failed to back up {} to {}", comps_path.display(), bak_path.display())
            })?;
        }

        let comps_value =
            districts_to_value(&update.comps).context("Failed to serialize district map")?;
        self.write_value(COMPS_FILE, &comps_value)?;

        if let Some(bros) = &update.master_bros {
            self.write_value(BROS_FILE, &serde_json::to_value(bros)?)?;
        }
        if let Some(fams) = &update.master_fams {
            self.write_value(FAMS_FILE, &serde_json::to_value(fams)?)?;
        }

        debug!(
            districts = update.comps.len(),
            path = %self.data_dir.display(),
            "Saved document"
        );
        Ok(())
    }

    fn read_value(&self, file: &str) -> Result<Option<serde_json::Value>> {
        let path = self.data_dir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "No data file, reading as empty");
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse data file: {}", path.display()))?;
        Ok(Some(value))
    }

    fn read_names(&self, file: &str) -> Result<Vec<String>> {
        match self.read_value(file)? {
            Some(value) => serde_json::from_value(value)
                .with_context(|| format!("Failed to parse name list in {}", file)),
            None => Ok(Vec::new()),
        }
    }

    /// Write one file atomically via temp + rename.
    fn write_value(&self, file: &str, value: &serde_json::Value) -> Result<()> {
        let path = self.data_dir.join(file);
        let tmp_path = path.with_extension("tmp");
        let content = serde_json::to_string_pretty(value)?;

        fs::write(&tmp_path, &content)
            .with_context(|| format!("Failed to write temp file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path).with_context(|| {
            format!("Failed to rename {} -> {}", tmp_path.display(), path.display())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_board::Companionship;

    fn update_from(json: serde_json::Value) -> DocumentUpdate {
        DocumentUpdate::from_wire(json).unwrap()
    }

    #[test]
    fn empty_store_loads_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), None).unwrap();

        let doc = store.load().unwrap();
        assert!(doc.comps.is_empty());
        assert!(doc.master_bros.is_empty());
        assert!(doc.master_fams.is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), None).unwrap();

        let update = update_from(serde_json::json!({
            "comps": { "District 1": [{ "brothers": ["Bob"], "families": ["Smith"] }] },
            "masterBros": ["Bob"],
            "masterFams": ["Smith"],
        }));
        store.save(&update).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.comps[0].name, "District 1");
        assert_eq!(
            doc.comps[0].comps[0],
            Companionship {
                brothers: vec!["Bob".to_string()],
                families: vec!["Smith".to_string()],
            }
        );
        assert_eq!(doc.master_bros, vec!["Bob"]);
    }

    #[test]
    fn legacy_body_is_the_bare_district_map() {
        let update = update_from(serde_json::json!({
            "District 1": [{ "brothers": ["Bob"], "families": [] }],
        }));
        assert_eq!(update.comps[0].name, "District 1");
        assert!(update.master_bros.is_none());
        assert!(update.master_fams.is_none());
    }

    #[test]
    fn legacy_save_leaves_master_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), None).unwrap();

        store
            .save(&update_from(serde_json::json!({
                "comps": {},
                "masterBros": ["Bob"],
                "masterFams": ["Smith"],
            })))
            .unwrap();

        store
            .save(&update_from(serde_json::json!({
                "District 1": [{ "brothers": ["Bob"], "families": [] }],
            })))
            .unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.comps[0].name, "District 1");
        assert_eq!(doc.master_bros, vec!["Bob"], "masters kept from first save");
    }

    #[test]
    fn overwrite_backs_up_the_previous_district_map() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), None).unwrap();

        store
            .save(&update_from(serde_json::json!({
                "comps": { "District 1": [{ "brothers": ["Bob"], "families": [] }] },
            })))
            .unwrap();
        store
            .save(&update_from(serde_json::json!({ "comps": {} })))
            .unwrap();

        let bak = dir.path().join("comps.json.bak");
        let content = fs::read_to_string(bak).unwrap();
        assert!(content.contains("Bob"), "backup holds the previous map");

        let doc = store.load().unwrap();
        assert!(doc.comps.is_empty());
    }

    #[test]
    fn seeds_missing_files_on_first_open() {
        let seed = tempfile::tempdir().unwrap();
        fs::write(
            seed.path().join(BROS_FILE),
            serde_json::to_string(&["Bob"]).unwrap(),
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), Some(seed.path())).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.master_bros, vec!["Bob"]);
        assert!(doc.master_fams.is_empty());
    }
}
