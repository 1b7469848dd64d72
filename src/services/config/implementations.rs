// 設定管理の具象実装

use crate::core::{OutcomeThresholds, PipelineConfig, PipelineError, PipelineResult};
use std::ops::RangeInclusive;
use std::time::Duration;

/// デフォルトの注文数
pub const DEFAULT_TARGET_COUNT: u32 = 10;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    target_count: u32,
    delay_range: RangeInclusive<u32>,
    roll_range: RangeInclusive<u32>,
    thresholds: OutcomeThresholds,
    delay_unit: Duration,
}

impl DefaultPipelineConfig {
    pub fn new(target_count: u32) -> Self {
        Self {
            target_count,
            ..Self::default()
        }
    }

    pub fn with_target_count(mut self, target_count: u32) -> Self {
        self.target_count = target_count;
        self
    }

    pub fn with_delay_range(mut self, delay_range: RangeInclusive<u32>) -> Self {
        self.delay_range = delay_range;
        self
    }

    pub fn with_roll_range(mut self, roll_range: RangeInclusive<u32>) -> Self {
        self.roll_range = roll_range;
        self
    }

    pub fn with_thresholds(mut self, thresholds: OutcomeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_delay_unit(mut self, delay_unit: Duration) -> Self {
        self.delay_unit = delay_unit;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            delay_range: 1..=5,
            roll_range: 0..=12,
            thresholds: OutcomeThresholds::default(),
            delay_unit: Duration::from_secs(1),
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn target_count(&self) -> u32 {
        self.target_count
    }

    fn delay_range(&self) -> RangeInclusive<u32> {
        self.delay_range.clone()
    }

    fn roll_range(&self) -> RangeInclusive<u32> {
        self.roll_range.clone()
    }

    fn thresholds(&self) -> OutcomeThresholds {
        self.thresholds
    }

    fn delay_unit(&self) -> Duration {
        self.delay_unit
    }
}

/// 設定値の検証
///
/// 番兵の番号（N+1）が表現できることもここで保証する。
pub fn validate_config<C: PipelineConfig + ?Sized>(config: &C) -> PipelineResult<()> {
    let target_count = config.target_count();
    if target_count == 0 {
        return Err(PipelineError::configuration(
            "target_count",
            "注文数は1以上である必要があります",
        ));
    }
    if target_count == u32::MAX {
        return Err(PipelineError::configuration(
            "target_count",
            "番兵の番号を表現できません",
        ));
    }

    if config.delay_range().is_empty() {
        return Err(PipelineError::configuration(
            "delay_range",
            "作業時間の範囲が空です",
        ));
    }

    let roll_range = config.roll_range();
    if roll_range.is_empty() {
        return Err(PipelineError::configuration(
            "roll_range",
            "抽選値の範囲が空です",
        ));
    }

    let thresholds = config.thresholds();
    if thresholds.resource_exhausted_max > thresholds.worker_aborted_max {
        return Err(PipelineError::configuration(
            "thresholds",
            format!(
                "閾値の順序が不正です: {} > {}",
                thresholds.resource_exhausted_max, thresholds.worker_aborted_max
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_config() {
        let config = DefaultPipelineConfig::default();

        assert_eq!(config.target_count(), 10);
        assert_eq!(config.delay_range(), 1..=5);
        assert_eq!(config.roll_range(), 0..=12);
        assert_eq!(config.thresholds(), OutcomeThresholds::new(2, 4));
        assert_eq!(config.delay_unit(), Duration::from_secs(1));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_pipeline_config_builder() {
        let config = DefaultPipelineConfig::new(3)
            .with_delay_range(2..=2)
            .with_roll_range(0..=20)
            .with_thresholds(OutcomeThresholds::new(1, 3))
            .with_delay_unit(Duration::from_millis(5));

        assert_eq!(config.target_count(), 3);
        assert_eq!(config.delay_range(), 2..=2);
        assert_eq!(config.roll_range(), 0..=20);
        assert_eq!(config.thresholds(), OutcomeThresholds::new(1, 3));
        assert_eq!(config.delay_unit(), Duration::from_millis(5));
    }

    #[test]
    fn test_validate_rejects_zero_target() {
        let config = DefaultPipelineConfig::default().with_target_count(0);

        let error = validate_config(&config).unwrap_err();
        assert!(matches!(
            error,
            PipelineError::ConfigurationError { ref field, .. } if field == "target_count"
        ));
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn test_validate_rejects_empty_ranges() {
        let config = DefaultPipelineConfig::default().with_delay_range(5..=1);
        assert!(validate_config(&config).is_err());

        let config = DefaultPipelineConfig::default().with_roll_range(12..=0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_unordered_thresholds() {
        let config = DefaultPipelineConfig::default().with_thresholds(OutcomeThresholds::new(4, 2));

        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("thresholds"));
    }
}
