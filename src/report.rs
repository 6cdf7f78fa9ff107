use anyhow::{Context, Result};
use property_inspect_common::InspectionReport;
use std::fs;
use std::path::{Path, PathBuf};

pub fn save_report(path: &Path, report: &InspectionReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(report)?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn load_report(path: &Path) -> Result<InspectionReport> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let report: InspectionReport =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(report)
}

/// 出力先がディレクトリなら `inspection-<物件ID>.json` を付ける
pub fn report_path(output: &Path, property_ref: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("inspection-{}.json", property_ref))
    } else {
        output.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use property_inspect_common::InspectionSession;
    use tempfile::tempdir;

    #[test]
    fn test_report_path_for_directory() {
        let dir = tempdir().unwrap();
        assert_eq!(
            report_path(dir.path(), "3"),
            dir.path().join("inspection-3.json")
        );
        assert_eq!(
            report_path(&dir.path().join("out.json"), "3"),
            dir.path().join("out.json")
        );
    }

    #[test]
    fn test_save_and_load_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("r.json");

        let mut session = InspectionSession::new("1");
        session.detected_amenities = vec!["Crown Molding".to_string()];
        let report = InspectionReport::from_session(&session, None, "2025-08-15T12:00:00+09:00");

        save_report(&path, &report).unwrap();
        assert_eq!(load_report(&path).unwrap(), report);
    }

    #[test]
    fn test_load_missing_report_has_context() {
        let dir = tempdir().unwrap();
        let err = load_report(&dir.path().join("none.json")).unwrap_err();
        assert!(err.to_string().contains("read"));
    }
}
