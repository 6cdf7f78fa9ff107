//! インスペクション画面（端末版）
//!
//! コントローラの状態を描画し、メニュー選択を操作に変換する。

use crate::error::{InspectError, Result};
use crate::picker::{ImagePicker, PickerOptions};
use crate::session::SessionController;
use dialoguer::Select;
use indicatif::ProgressBar;
use property_inspect_common::{InspectionReport, InspectionSession, Property, RecordingState};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ToggleRecording,
    UploadPhoto,
    Wait,
    Complete,
    Back,
}

/// 物件ヘッダ
pub fn render_property(property: &Property) {
    println!("🏠 {} ({})", property.name, property.kind);
    println!("   📍 {}", property.location);
    println!("   ⭐ {}  [{}]", property.rating, property.status);
}

/// セッション状態を描画
pub fn render_session(session: &InspectionSession) {
    let recording = match session.recording_state {
        RecordingState::Idle => "🎤 待機中",
        RecordingState::Recording => "🔴 Recording...",
        RecordingState::Transcribing => "⏳ 文字起こし中",
    };
    println!("\n[音声] {}", recording);

    if let Some(transcript) = &session.transcript {
        println!("[AI Transcription]\n  {}", transcript);
    }
    if !session.extracted_keywords.is_empty() {
        println!("[Keywords] {}", session.extracted_keywords.join(" / "));
    }
    if let Some(image) = &session.selected_image {
        println!(
            "[写真] {} ({}x{})",
            image.path.display(),
            image.width,
            image.height
        );
    }
    if !session.detected_amenities.is_empty() {
        println!(
            "[Detected Features] {}",
            session.detected_amenities.join(" / ")
        );
    }
    if session.analysis_in_flight() {
        println!("… Processing...");
    }
}

fn menu(session: &InspectionSession) -> Vec<(Action, String)> {
    let busy = session.analysis_in_flight();
    let record_label = match (session.recording_state, busy) {
        (_, true) => "🎤 録音（処理中は操作できません）",
        (RecordingState::Recording, false) => "⏹ Stop Recording",
        _ => "🎤 Start Recording",
    };

    let mut items = vec![
        (Action::ToggleRecording, record_label.to_string()),
        (Action::UploadPhoto, "📷 Upload Photo".to_string()),
    ];
    if busy {
        items.push((Action::Wait, "⏳ 解析結果を待つ".to_string()));
    }
    items.push((Action::Complete, "✅ Complete Inspection".to_string()));
    items.push((Action::Back, "← 戻る".to_string()));
    items
}

/// 解析が終わるまでスピナーを出して待つ
pub async fn wait_for_analysis(controller: &mut SessionController) {
    if !controller.session().analysis_in_flight() {
        return;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Processing...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    controller.settle().await;
    spinner.finish_and_clear();
}

/// 対話式インスペクション
///
/// 完了すればレポート、戻る（破棄）なら None。
pub async fn run_interactive(
    controller: &mut SessionController,
    property: &Property,
    picker: &dyn ImagePicker,
    options: &PickerOptions,
) -> Result<Option<InspectionReport>> {
    render_property(property);

    loop {
        controller.apply_ready();
        render_session(controller.session());

        let items = menu(controller.session());
        let labels: Vec<&str> = items.iter().map(|(_, label)| label.as_str()).collect();
        let selection = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| InspectError::Dialog(e.to_string()))?;

        let action = selection.map(|idx| items[idx].0).unwrap_or(Action::Back);
        match action {
            Action::ToggleRecording => {
                controller.toggle_recording();
            }
            Action::UploadPhoto => {
                let response = picker.pick(options);
                controller.pick_image(response);
            }
            Action::Wait => wait_for_analysis(controller).await,
            Action::Complete => return Ok(controller.complete()),
            Action::Back => {
                controller.teardown();
                return Ok(None);
            }
        }
    }
}

/// 録音→停止→（写真）→待機→完了 を順に実行
pub async fn run_scripted(
    controller: &mut SessionController,
    picker: Option<&dyn ImagePicker>,
    options: &PickerOptions,
) -> Option<InspectionReport> {
    controller.toggle_recording();
    controller.toggle_recording();

    if let Some(picker) = picker {
        controller.pick_image(picker.pick(options));
    }

    wait_for_analysis(controller).await;
    render_session(controller.session());
    controller.complete()
}
