use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
};

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    MasteryStatus,
    MasteryTracker,
};
use crate::{
    core::PracticeError,
    persistence::get_app_data_dir,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryRecord {
    pub status: MasteryStatus,
    pub translation: String,
    pub category: String,
    pub subcategory: String,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub reviews: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MasteryData {
    records: HashMap<String, MasteryRecord>,
}

/// JSON-file-backed mastery records in the app data dir. Saves after every
/// recorded response; a failed save is logged and the session keeps going.
#[derive(Debug)]
pub struct MasteryStore {
    data: MasteryData,
    file_path: PathBuf,
}

impl MasteryStore {
    pub fn load() -> Result<Self, PracticeError> {
        Self::load_from(Self::default_path())
    }

    pub fn load_from(file_path: PathBuf) -> Result<Self, PracticeError> {
        let data = if file_path.exists() {
            let content = fs::read_to_string(&file_path).map_err(|e| {
                PracticeError::Custom(format!("Failed to read mastery store: {}", e))
            })?;

            serde_json::from_str::<MasteryData>(&content).map_err(|e| {
                PracticeError::Custom(format!("Failed to parse mastery store: {}", e))
            })?
        } else {
            MasteryData::default()
        };

        Ok(Self { data, file_path })
    }

    /// Load, or start empty when the store is unreadable. Ratings made during
    /// the session still persist via the next successful save.
    pub fn load_or_default() -> Self {
        let file_path = Self::default_path();
        match Self::load_from(file_path.clone()) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("{}. Starting with an empty mastery store.", e);
                Self { data: MasteryData::default(), file_path }
            }
        }
    }

    pub fn save(&self) -> Result<(), PracticeError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PracticeError::Custom(format!("Failed to create mastery store directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.file_path, content)
            .map_err(|e| PracticeError::Custom(format!("Failed to write mastery store: {}", e)))
    }

    pub fn record(&self, text: &str) -> Option<&MasteryRecord> {
        self.data.records.get(text)
    }

    pub fn len(&self) -> usize {
        self.data.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.records.is_empty()
    }

    fn default_path() -> PathBuf {
        get_app_data_dir().join("mastery.json")
    }
}

impl MasteryTracker for MasteryStore {
    fn status(&self, text: &str) -> Option<MasteryStatus> {
        self.data.records.get(text).map(|record| record.status)
    }

    fn track_response(
        &mut self,
        text: &str,
        translation: &str,
        status: MasteryStatus,
        category: &str,
        subcategory: &str,
    ) {
        let reviews = self.data.records.get(text).map(|record| record.reviews).unwrap_or(0) + 1;

        self.data.records.insert(text.to_string(), MasteryRecord {
            status,
            translation: translation.to_string(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            updated_at: Utc::now(),
            reviews,
        });

        if let Err(e) = self.save() {
            eprintln!("Failed to save mastery store: {}", e);
        }
    }
}
