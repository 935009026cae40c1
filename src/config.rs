use crate::error::{Error, Result};
use crate::segmentor::DEFAULT_LOOKAHEAD;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "spellseg";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum number of characters tried for the first piece of a split.
    ///
    /// The segmentor always tries at least the longest dictionary word plus
    /// two characters, so only values above that widen the search.
    pub lookahead: usize,
    /// Inputs longer than this are rejected before segmentation.
    pub max_input_length: usize,
    /// Frequency file used instead of the built-in dictionary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            max_input_length: 64,
            dictionary_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        match confy::load(APP_NAME, Some(CONFIG_NAME)) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!("Failed to load config, using defaults: {err}");
                Ok(Self::default())
            }
        }
    }

    /// Write the config to the platform config directory.
    pub fn save(&self) -> Result<()> {
        let path = confy::get_configuration_file_path(APP_NAME, Some(CONFIG_NAME))?;
        self.save_to(path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        confy::store_path(path, self)?;
        Ok(())
    }

    /// Read the config at `path`, creating it with defaults if it is missing.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Ok(confy::load_path(path)?)
    }

    /// Reject `input` if it exceeds `max_input_length` characters.
    pub fn check_length(&self, input: &str) -> Result<()> {
        let length = input.chars().count();
        if length > self.max_input_length {
            return Err(Error::InputTooLong {
                length,
                limit: self.max_input_length,
            });
        }
        Ok(())
    }
}
