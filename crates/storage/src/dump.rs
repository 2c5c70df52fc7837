//! JSON forum dumps
//!
//! A [`ForumDump`] is the on-disk form of a [`MemoryForum`](crate::MemoryForum):
//! plain entity lists, read and written with `serde_json`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use recat_core::{Category, Error, Permalink, Post, Result, Tag, Topic};

/// Every entity of a forum, as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumDump {
    /// Categories
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Topics
    #[serde(default)]
    pub topics: Vec<Topic>,
    /// Posts
    #[serde(default)]
    pub posts: Vec<Post>,
    /// Tags
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// URL redirect rules
    #[serde(default)]
    pub permalinks: Vec<Permalink>,
}

impl ForumDump {
    /// Parse a dump from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Render the dump as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Read a dump file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write a dump file, replacing it atomically
    ///
    /// The JSON is written next to the target and renamed over it, so a
    /// crash never leaves a half-written dump behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, self.to_json()?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
