//! インスペクション画面のコントローラ
//!
//! 録音トグル・写真選択・完了の3操作で `InspectionSession` を遷移させる。
//!
//! 解析呼び出しはtokioタスクに逃がし、結果はチャネル経由で戻す。
//! セッションを書き換えるのは `&mut self` を持つコントローラだけで、
//! 結果の反映は `next_completion` / `settle` / `apply_ready` の呼び出し時に1回だけ行う。
//! tokioランタイム上で使うこと。

use crate::analyzer::{AnalysisError, AnalysisService, LabelResult};
use crate::navigation::{Navigator, Screen};
use crate::picker::PickerResponse;
use property_inspect_common::{
    FallbackPolicy, ImageRef, InspectionReport, InspectionSession, RecordingState, User,
    PLACEHOLDER_TRANSCRIPT,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// 解析の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Text,
    Image,
}

#[derive(Debug)]
enum Completion {
    Text(LabelResult),
    Image { image_id: String, result: LabelResult },
}

pub struct SessionController {
    session: InspectionSession,
    service: Arc<dyn AnalysisService>,
    navigator: Box<dyn Navigator>,
    fallback: FallbackPolicy,
    inspector: Option<User>,
    transcription_delay: Duration,
    cancel: CancellationToken,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl SessionController {
    pub fn new(
        property_ref: impl Into<String>,
        service: Arc<dyn AnalysisService>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            session: InspectionSession::new(property_ref),
            service,
            navigator,
            fallback: FallbackPolicy::default(),
            inspector: None,
            transcription_delay: Duration::from_millis(2500),
            cancel: CancellationToken::new(),
            completions_tx,
            completions_rx,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// レポートに載せる担当者（セッションストアから渡す）
    pub fn with_inspector(mut self, inspector: Option<User>) -> Self {
        self.inspector = inspector;
        self
    }

    /// 録音停止から解析呼び出しまでの擬似的な文字起こし時間
    pub fn with_transcription_delay(mut self, delay: Duration) -> Self {
        self.transcription_delay = delay;
        self
    }

    pub fn session(&self) -> &InspectionSession {
        &self.session
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 録音の開始／停止
    ///
    /// - Idle → Recording: 前回の文字起こしとキーワードを消す
    /// - Recording → Transcribing: テキスト解析を投げる
    ///
    /// 解析中（種類を問わない）は何もしない。遷移後の状態を返す。
    pub fn toggle_recording(&mut self) -> RecordingState {
        if self.is_torn_down() || self.session.analysis_in_flight() {
            debug!(state = %self.session.recording_state, "解析中のため録音操作を無視");
            return self.session.recording_state;
        }

        match self.session.recording_state {
            RecordingState::Idle => {
                self.session.recording_state = RecordingState::Recording;
                self.session.transcript = None;
                self.session.extracted_keywords.clear();
                info!(property = %self.session.property_ref, "録音開始");
            }
            RecordingState::Recording => {
                self.session.recording_state = RecordingState::Transcribing;
                self.session.text_in_flight = true;
                info!(property = %self.session.property_ref, "録音停止、文字起こし開始");
                self.dispatch_text();
            }
            // Transcribing中は text_in_flight が立っているので上で弾かれる
            RecordingState::Transcribing => {}
        }

        self.session.recording_state
    }

    /// 写真を選択して画像解析を投げる
    ///
    /// キャンセル・エラーは状態を変えない。画像解析が既に走っている間も無視する。
    /// 解析を投げた場合に true。
    pub fn pick_image(&mut self, response: PickerResponse) -> bool {
        if self.is_torn_down() {
            return false;
        }

        let image = match response {
            PickerResponse::Picked(image) => image,
            PickerResponse::Cancelled => {
                debug!("写真選択キャンセル");
                return false;
            }
            PickerResponse::Error(e) => {
                debug!(error = %e, "写真選択エラーを無視");
                return false;
            }
        };

        if self.session.image_in_flight {
            debug!(image = %image.id, "画像解析中のため写真選択を無視");
            return false;
        }

        info!(property = %self.session.property_ref, image = %image.id, "画像解析開始");
        self.session.selected_image = Some(image.clone());
        self.session.image_in_flight = true;
        self.dispatch_image(image);
        true
    }

    /// インスペクション完了
    ///
    /// 解析の有無・進行中かどうかに関わらず完了を通知し、一覧画面へ戻す。
    pub fn complete(&mut self) -> Option<InspectionReport> {
        if self.is_torn_down() {
            return None;
        }

        let report = InspectionReport::from_session(
            &self.session,
            self.inspector.clone(),
            chrono::Local::now().to_rfc3339(),
        );
        info!(
            property = %report.property_ref,
            has_results = report.has_results(),
            pending = report.analysis_pending,
            "インスペクション完了"
        );

        self.navigator.inspection_completed(&report);
        self.navigator.navigate(Screen::Inspect);
        Some(report)
    }

    /// 次の解析結果を待って反映
    ///
    /// 解析中のものがない、または破棄済みなら即 None。
    pub async fn next_completion(&mut self) -> Option<AnalysisKind> {
        if self.is_torn_down() || !self.session.analysis_in_flight() {
            return None;
        }

        let completion = tokio::select! {
            completion = self.completions_rx.recv() => completion?,
            _ = self.cancel.cancelled() => return None,
        };
        Some(self.apply(completion))
    }

    /// 解析中のものがなくなるまで待つ
    pub async fn settle(&mut self) {
        while self.next_completion().await.is_some() {}
    }

    /// 届いている結果だけを反映（待たない）
    pub fn apply_ready(&mut self) -> usize {
        let mut applied = 0;
        while !self.is_torn_down() {
            match self.completions_rx.try_recv() {
                Ok(completion) => {
                    self.apply(completion);
                    applied += 1;
                }
                Err(_) => break,
            }
        }
        applied
    }

    /// 画面破棄。進行中の解析を中断し、以後の結果は反映しない。
    pub fn teardown(&mut self) {
        if !self.cancel.is_cancelled() {
            info!(property = %self.session.property_ref, "セッション破棄");
            self.cancel.cancel();
        }
    }

    fn dispatch_text(&self) {
        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        let cancel = self.cancel.clone();
        let delay = self.transcription_delay;

        tokio::spawn(async move {
            let call = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                service.analyze_text(PLACEHOLDER_TRANSCRIPT).await
            });
            let abort = call.abort_handle();
            tokio::select! {
                _ = cancel.cancelled() => {
                    abort.abort();
                    debug!("テキスト解析を中断");
                }
                joined = call => {
                    let _ = tx.send(Completion::Text(joined_result(joined)));
                }
            }
        });
    }

    fn dispatch_image(&self, image: ImageRef) {
        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        let cancel = self.cancel.clone();
        let image_id = image.id.clone();

        tokio::spawn(async move {
            let call = tokio::spawn(async move { service.analyze_image(&image).await });
            let abort = call.abort_handle();
            tokio::select! {
                _ = cancel.cancelled() => {
                    abort.abort();
                    debug!(image = %image_id, "画像解析を中断");
                }
                joined = call => {
                    let result = joined_result(joined);
                    let _ = tx.send(Completion::Image { image_id, result });
                }
            }
        });
    }

    fn apply(&mut self, completion: Completion) -> AnalysisKind {
        match completion {
            Completion::Text(result) => {
                if let Err(e) = &result {
                    warn!(error = %e, "テキスト解析失敗、既定キーワードを使用");
                }
                let resolved = self.fallback.resolve_keywords(result);
                let fallback = resolved.is_fallback();
                self.session.transcript = Some(PLACEHOLDER_TRANSCRIPT.to_string());
                self.session.extracted_keywords = resolved.into_labels();
                self.session.recording_state = RecordingState::Idle;
                self.session.text_in_flight = false;
                info!(
                    keywords = self.session.extracted_keywords.len(),
                    fallback, "文字起こし完了"
                );
                AnalysisKind::Text
            }
            Completion::Image { image_id, result } => {
                if let Err(e) = &result {
                    warn!(image = %image_id, error = %e, "画像解析失敗、既定の設備を使用");
                }
                let resolved = self.fallback.resolve_amenities(result);
                let fallback = resolved.is_fallback();
                self.session.detected_amenities = resolved.into_labels();
                self.session.image_in_flight = false;
                info!(
                    image = %image_id,
                    amenities = self.session.detected_amenities.len(),
                    fallback, "画像解析完了"
                );
                AnalysisKind::Image
            }
        }
    }
}

/// 解析タスクのpanicも失敗として扱う（フォールバックへ流す）
fn joined_result(joined: std::result::Result<LabelResult, JoinError>) -> LabelResult {
    joined.unwrap_or_else(|e| {
        warn!(error = %e, "解析タスクが異常終了");
        Err(AnalysisError::Command("analysis task panicked".to_string()))
    })
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
