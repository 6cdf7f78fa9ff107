//! 画面遷移の受け口
//!
//! 画面そのものは描画しない。コントローラは名前付き画面への遷移と
//! インスペクション完了の通知だけを依頼する。

use property_inspect_common::InspectionReport;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Home,
    /// インスペクション対象の物件一覧
    Inspect,
    InspectionStart { property_id: String },
    Details { property_id: String, read_only: bool },
    Profile,
}

pub trait Navigator: Send {
    fn navigate(&mut self, screen: Screen);

    fn inspection_completed(&mut self, report: &InspectionReport);
}

#[derive(Debug, Default)]
struct History {
    screens: Vec<Screen>,
    reports: Vec<InspectionReport>,
}

/// 遷移と完了通知を記録するだけのナビゲータ
///
/// クローンは同じ履歴を共有する。
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    inner: Arc<Mutex<History>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screens(&self) -> Vec<Screen> {
        self.inner
            .lock()
            .map(|h| h.screens.clone())
            .unwrap_or_default()
    }

    pub fn reports(&self) -> Vec<InspectionReport> {
        self.inner
            .lock()
            .map(|h| h.reports.clone())
            .unwrap_or_default()
    }

    pub fn current(&self) -> Option<Screen> {
        self.inner.lock().ok().and_then(|h| h.screens.last().cloned())
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&mut self, screen: Screen) {
        if let Ok(mut history) = self.inner.lock() {
            history.screens.push(screen);
        }
    }

    fn inspection_completed(&mut self, report: &InspectionReport) {
        if let Ok(mut history) = self.inner.lock() {
            history.reports.push(report.clone());
        }
    }
}

/// 端末に完了通知を出すナビゲータ
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    history: HistoryNavigator,
}

impl ConsoleNavigator {
    pub fn new(history: HistoryNavigator) -> Self {
        Self { history }
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&mut self, screen: Screen) {
        debug!(?screen, "画面遷移");
        self.history.navigate(screen);
    }

    fn inspection_completed(&mut self, report: &InspectionReport) {
        println!("\n✅ Inspection Complete");
        println!("  物件: {}", report.property_ref);
        if !report.has_results() {
            println!("  ⚠ 解析結果なしで完了しました");
        }
        if report.analysis_pending {
            println!("  ⚠ 解析中のまま完了しました");
        }
        self.history.inspection_completed(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use property_inspect_common::InspectionSession;

    #[test]
    fn test_history_is_shared_between_clones() {
        let history = HistoryNavigator::new();
        let mut nav = history.clone();

        nav.navigate(Screen::Home);
        nav.navigate(Screen::InspectionStart {
            property_id: "2".to_string(),
        });

        assert_eq!(history.screens().len(), 2);
        assert_eq!(
            history.current(),
            Some(Screen::InspectionStart {
                property_id: "2".to_string()
            })
        );
    }

    #[test]
    fn test_console_navigator_records_reports() {
        let history = HistoryNavigator::new();
        let mut nav = ConsoleNavigator::new(history.clone());
        let report = InspectionReport::from_session(&InspectionSession::new("1"), None, "now");

        nav.inspection_completed(&report);
        nav.navigate(Screen::Inspect);

        assert_eq!(history.reports(), vec![report]);
        assert_eq!(history.current(), Some(Screen::Inspect));
    }
}
