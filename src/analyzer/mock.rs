//! モック解析サービス
//!
//! 固定遅延のあと候補リストの先頭N件を返す。件数・失敗は呼び出し側で指定でき、
//! 乱数は使わない。

use super::{AnalysisError, AnalysisService, LabelResult};
use async_trait::async_trait;
use property_inspect_common::{
    ImageRef, AMENITY_CANDIDATES, KEYWORD_CANDIDATES, MAX_LABELS, MIN_LABELS,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug)]
pub struct MockAnalysisService {
    text_delay: Duration,
    image_delay: Duration,
    keyword_count: usize,
    amenity_count: usize,
    fail_text: bool,
    fail_image: bool,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalysisService {
    pub fn new() -> Self {
        Self {
            text_delay: Duration::from_millis(2000),
            image_delay: Duration::from_millis(3000),
            keyword_count: 5,
            amenity_count: 4,
            fail_text: false,
            fail_image: false,
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delays(mut self, text: Duration, image: Duration) -> Self {
        self.text_delay = text;
        self.image_delay = image;
        self
    }

    /// 返すラベル数（3〜9に丸める）
    pub fn with_counts(mut self, keywords: usize, amenities: usize) -> Self {
        self.keyword_count = keywords.clamp(MIN_LABELS, MAX_LABELS);
        self.amenity_count = amenities.clamp(MIN_LABELS, MAX_LABELS);
        self
    }

    pub fn failing_text(mut self) -> Self {
        self.fail_text = true;
        self
    }

    pub fn failing_image(mut self) -> Self {
        self.fail_image = true;
        self
    }

    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

fn take_labels(candidates: &[&str], count: usize) -> Vec<String> {
    candidates.iter().take(count).map(|s| s.to_string()).collect()
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze_text(&self, _text: &str) -> LabelResult {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.text_delay).await;

        if self.fail_text {
            return Err(AnalysisError::Unavailable("mock text analysis".into()));
        }
        Ok(take_labels(KEYWORD_CANDIDATES, self.keyword_count))
    }

    async fn analyze_image(&self, _image: &ImageRef) -> LabelResult {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.image_delay).await;

        if self.fail_image {
            return Err(AnalysisError::Unavailable("mock image analysis".into()));
        }
        Ok(take_labels(AMENITY_CANDIDATES, self.amenity_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_image() -> ImageRef {
        ImageRef {
            id: "abc".to_string(),
            path: PathBuf::from("kitchen.jpg"),
            width: 800,
            height: 600,
            captured_at: None,
        }
    }

    #[tokio::test]
    async fn test_mock_text_returns_prefix() {
        let service = MockAnalysisService::new()
            .with_delays(Duration::ZERO, Duration::ZERO)
            .with_counts(4, 3);
        let labels = service.analyze_text("note").await.unwrap();
        assert_eq!(
            labels,
            vec!["natural lighting", "modern appliances", "stainless steel", "spacious"]
        );
        assert_eq!(service.text_calls(), 1);
        assert_eq!(service.image_calls(), 0);
    }

    #[tokio::test]
    async fn test_mock_image_returns_prefix() {
        let service = MockAnalysisService::new().with_delays(Duration::ZERO, Duration::ZERO);
        let labels = service.analyze_image(&sample_image()).await.unwrap();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0], "Kitchen Island");
    }

    #[tokio::test]
    async fn test_mock_counts_are_clamped() {
        let service = MockAnalysisService::new()
            .with_delays(Duration::ZERO, Duration::ZERO)
            .with_counts(1, 50);
        assert_eq!(service.analyze_text("note").await.unwrap().len(), MIN_LABELS);
        assert_eq!(service.analyze_image(&sample_image()).await.unwrap().len(), MAX_LABELS);
    }

    #[tokio::test]
    async fn test_mock_forced_failures() {
        let service = MockAnalysisService::new()
            .with_delays(Duration::ZERO, Duration::ZERO)
            .failing_text()
            .failing_image();
        assert!(matches!(
            service.analyze_text("note").await,
            Err(AnalysisError::Unavailable(_))
        ));
        assert!(service.analyze_image(&sample_image()).await.is_err());
        assert_eq!(service.image_calls(), 1);
    }
}
