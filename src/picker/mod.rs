//! 画像ピッカー
//!
//! 写真を1枚選ばせて不透明な `ImageRef` を返す。キャンセル・エラーは
//! 呼び出し側で無視される（状態は変えない）。

mod dialog;
mod exif;

pub use dialog::DialogPicker;

use crate::error::{InspectError, Result};
use image::imageops::FilterType;
use property_inspect_common::ImageRef;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Photo,
}

/// ピッカー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    pub media_type: MediaType,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            media_type: MediaType::Photo,
            max_width: 2000,
            max_height: 2000,
        }
    }
}

impl PickerOptions {
    pub fn with_max_dimension(mut self, max: u32) -> Self {
        self.max_width = max;
        self.max_height = max;
        self
    }
}

/// ピッカーの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResponse {
    Cancelled,
    Error(String),
    Picked(ImageRef),
}

pub trait ImagePicker {
    fn pick(&self, options: &PickerOptions) -> PickerResponse;
}

/// 縮小画像の置き場所
pub fn default_work_dir() -> PathBuf {
    std::env::temp_dir().join("property-inspect")
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|&e| e == ext.to_string_lossy()))
        .unwrap_or(false)
}

/// フォルダ直下の写真を列挙（ファイル名順）
pub fn scan_photos(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(InspectError::FolderNotFound(folder.display().to_string()));
    }

    let mut photos: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_image_file(p))
        .collect();

    photos.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(photos)
}

/// 画像ファイルからImageRefを作る
///
/// 最大サイズを超える場合は縮小した複製を `work_dir` に書き出し、そちらを指す。
pub fn load_image(path: &Path, options: &PickerOptions, work_dir: &Path) -> Result<ImageRef> {
    if !path.is_file() {
        return Err(InspectError::ImageLoad(format!(
            "ファイルが見つかりません: {}",
            path.display()
        )));
    }
    if options.media_type != MediaType::Photo || !is_image_file(path) {
        return Err(InspectError::ImageLoad(format!(
            "写真ではありません: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    let id = hex::encode(Sha256::digest(&bytes))[..16].to_string();
    // ヘッダだけでなく全体をデコードして壊れたファイルを弾く
    let img = image::load_from_memory(&bytes)
        .map_err(|e| InspectError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    let (width, height) = (img.width(), img.height());
    let captured_at = exif::extract_date(path);

    if width <= options.max_width && height <= options.max_height {
        return Ok(ImageRef {
            id,
            path: path.canonicalize()?,
            width,
            height,
            captured_at,
        });
    }

    let resized = img.resize(options.max_width, options.max_height, FilterType::Lanczos3);

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "jpg".to_string());
    std::fs::create_dir_all(work_dir)?;
    let dest = work_dir.join(format!("{}.{}", id, ext));
    resized
        .save(&dest)
        .map_err(|e| InspectError::ImageLoad(format!("{}: {}", dest.display(), e)))?;

    debug!(
        from = %format!("{}x{}", width, height),
        to = %format!("{}x{}", resized.width(), resized.height()),
        "写真を縮小"
    );

    Ok(ImageRef {
        id,
        path: dest,
        width: resized.width(),
        height: resized.height(),
        captured_at,
    })
}

/// パス指定のピッカー
pub struct FilePicker {
    path: PathBuf,
    work_dir: PathBuf,
}

impl FilePicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            work_dir: default_work_dir(),
        }
    }

    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }
}

impl ImagePicker for FilePicker {
    fn pick(&self, options: &PickerOptions) -> PickerResponse {
        match load_image(&self.path, options, &self.work_dir) {
            Ok(image) => PickerResponse::Picked(image),
            Err(e) => {
                warn!(error = %e, "写真を読み込めません");
                PickerResponse::Error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("a.jpg")));
        assert!(is_image_file(Path::new("a.JPEG")));
        assert!(is_image_file(Path::new("a.png")));
        assert!(!is_image_file(Path::new("a.txt")));
        assert!(!is_image_file(Path::new("a")));
    }

    #[test]
    fn test_scan_photos_not_found() {
        let result = scan_photos(Path::new("/nonexistent/folder/98765"));
        assert!(matches!(result, Err(InspectError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_photos_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("c.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("b.jpg"), b"x").unwrap();

        let photos = scan_photos(dir.path()).unwrap();
        let names: Vec<_> = photos
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "c.jpg"]);
    }

    #[test]
    fn test_load_small_image_keeps_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("room.png");
        RgbImage::new(40, 30).save(&path).unwrap();

        let image = load_image(&path, &PickerOptions::default(), &dir.path().join("work")).unwrap();
        assert_eq!((image.width, image.height), (40, 30));
        assert_eq!(image.id.len(), 16);
        assert_eq!(image.path, path.canonicalize().unwrap());
        assert!(image.captured_at.is_none());
    }

    #[test]
    fn test_load_large_image_is_downsized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbImage::new(300, 100).save(&path).unwrap();

        let options = PickerOptions::default().with_max_dimension(150);
        let work = dir.path().join("work");
        let image = load_image(&path, &options, &work).unwrap();
        assert_eq!((image.width, image.height), (150, 50));
        assert!(image.path.starts_with(&work));
        assert!(image.path.exists());
    }

    #[test]
    fn test_truncated_image_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        RgbImage::new(40, 30).save(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 20]).unwrap();

        let picker = FilePicker::new(&path).with_work_dir(dir.path().join("work"));
        assert!(matches!(
            picker.pick(&PickerOptions::default()),
            PickerResponse::Error(_)
        ));
    }

    #[test]
    fn test_file_picker_errors() {
        let dir = tempdir().unwrap();
        let missing = FilePicker::new(dir.path().join("missing.jpg"));
        assert!(matches!(
            missing.pick(&PickerOptions::default()),
            PickerResponse::Error(_)
        ));

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "not an image").unwrap();
        assert!(matches!(
            FilePicker::new(&text).pick(&PickerOptions::default()),
            PickerResponse::Error(_)
        ));
    }
}
