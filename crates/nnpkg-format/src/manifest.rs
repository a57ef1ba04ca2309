//! `Manifest.json`: the package's table of contents.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const FILE_FORMAT_VERSION: &str = "1.0.0";
pub const AUTHOR: &str = "nnpkg";
pub const MODEL_DESCRIPTION: &str = "Model Specification";
pub const WEIGHTS_DESCRIPTION: &str = "Model Weights";
pub const MODEL_FILE_NAME: &str = "model.mlmodel";
pub const WEIGHTS_DIR_NAME: &str = "weights";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub author: String,
    pub description: String,
    pub name: String,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub file_format_version: String,
    pub item_info_entries: IndexMap<String, ItemInfo>,
    pub root_model_identifier: String,
}

impl Manifest {
    /// Manifest listing the model file and the weights directory under the
    /// given item identifiers.
    pub fn new(model_id: impl Into<String>, weights_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        let mut entries = IndexMap::new();
        entries.insert(
            model_id.clone(),
            ItemInfo {
                author: AUTHOR.to_owned(),
                description: MODEL_DESCRIPTION.to_owned(),
                name: MODEL_FILE_NAME.to_owned(),
                path: MODEL_FILE_NAME.to_owned(),
            },
        );
        entries.insert(
            weights_id.into(),
            ItemInfo {
                author: AUTHOR.to_owned(),
                description: WEIGHTS_DESCRIPTION.to_owned(),
                name: MODEL_FILE_NAME.to_owned(),
                path: WEIGHTS_DIR_NAME.to_owned(),
            },
        );

        Self {
            file_format_version: FILE_FORMAT_VERSION.to_owned(),
            item_info_entries: entries,
            root_model_identifier: model_id,
        }
    }

    pub fn root_item(&self) -> Option<&ItemInfo> {
        self.item_info_entries.get(&self.root_model_identifier)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
