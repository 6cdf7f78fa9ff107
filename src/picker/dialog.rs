//! 対話式の写真選択

use super::{default_work_dir, load_image, scan_photos, ImagePicker, PickerOptions, PickerResponse};
use dialoguer::Select;
use std::path::PathBuf;
use tracing::warn;

/// フォルダ内の写真から1枚選ぶピッカー
pub struct DialogPicker {
    folder: PathBuf,
    work_dir: PathBuf,
}

impl DialogPicker {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            work_dir: default_work_dir(),
        }
    }
}

impl ImagePicker for DialogPicker {
    fn pick(&self, options: &PickerOptions) -> PickerResponse {
        let photos = match scan_photos(&self.folder) {
            Ok(photos) if photos.is_empty() => {
                return PickerResponse::Error(format!(
                    "写真がありません: {}",
                    self.folder.display()
                ))
            }
            Ok(photos) => photos,
            Err(e) => return PickerResponse::Error(e.to_string()),
        };

        let mut items: Vec<String> = photos
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            })
            .collect();
        items.push("キャンセル".to_string());

        let selection = Select::new()
            .with_prompt("写真を選択")
            .items(&items)
            .default(0)
            .interact_opt();

        match selection {
            Ok(Some(idx)) if idx < photos.len() => {
                match load_image(&photos[idx], options, &self.work_dir) {
                    Ok(image) => PickerResponse::Picked(image),
                    Err(e) => {
                        warn!(error = %e, "写真を読み込めません");
                        PickerResponse::Error(e.to_string())
                    }
                }
            }
            Ok(_) => PickerResponse::Cancelled,
            Err(e) => PickerResponse::Error(e.to_string()),
        }
    }
}
