//! 物件詳細の編集内容
//!
//! 組み込みカタログは書き換えず、物件IDごとの差分をJSONに保存して
//! 読み出し時に重ねる。

use crate::config::Config;
use crate::error::{InspectError, Result};
use property_inspect_common::{Property, PropertyPatch};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EDITS_FILE_NAME: &str = "property-edits.json";

#[derive(Debug, Clone)]
pub struct PropertyEdits {
    path: PathBuf,
    patches: BTreeMap<String, PropertyPatch>,
}

impl PropertyEdits {
    pub fn default_path() -> Result<PathBuf> {
        Ok(Config::config_dir()?.join(EDITS_FILE_NAME))
    }

    /// 読み込み（ファイルがなければ編集なし）
    pub fn load(path: &Path) -> Result<Self> {
        let patches = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            patches,
        })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.patches)?)?;
        debug!(path = %self.path.display(), edited = self.patches.len(), "物件編集を保存");
        Ok(())
    }

    /// 保存済みの編集を重ねた物件
    pub fn apply(&self, mut property: Property) -> Property {
        if let Some(patch) = self.patches.get(&property.id) {
            patch.apply(&mut property);
        }
        property
    }

    pub fn apply_all(&self, properties: Vec<Property>) -> Vec<Property> {
        properties.into_iter().map(|p| self.apply(p)).collect()
    }

    /// 詳細画面の保存
    ///
    /// 閲覧専用で開いた場合は編集を受け付けない。
    pub fn update(
        &mut self,
        property: &Property,
        patch: PropertyPatch,
        read_only: bool,
    ) -> Result<Property> {
        if read_only {
            return Err(InspectError::ReadOnly(property.id.clone()));
        }

        info!(property = %property.id, "物件詳細を更新");
        self.patches
            .entry(property.id.clone())
            .or_default()
            .merge(patch);
        Ok(self.apply(property.clone()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
