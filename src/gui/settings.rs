use serde::{
    Deserialize,
    Serialize,
};

use crate::session::{
    PlayGap,
    PlaySpeed,
};

fn default_true() -> bool {
    true
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SettingsData {
    #[serde(default = "default_true")]
    pub show_rom: bool,
    #[serde(default = "default_true")]
    pub show_en: bool,
    #[serde(default)]
    pub speed: PlaySpeed,
    #[serde(default)]
    pub gap: PlayGap,
    #[serde(default)]
    pub dataset_path: Option<String>,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            show_rom: true,
            show_en: true,
            speed: PlaySpeed::default(),
            gap: PlayGap::default(),
            dataset_path: None,
        }
    }
}
