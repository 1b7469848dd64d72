// 注文結果モデルの具象実装

use crate::core::{Item, Outcome, OutcomeDecider, PipelineConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::time::Duration;

/// 乱数による判定実装
#[derive(Debug, Clone)]
pub struct RandomOutcomeDecider {
    rng: StdRng,
}

impl RandomOutcomeDecider {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// シード指定（再現可能な実行用）
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOutcomeDecider {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeDecider for RandomOutcomeDecider {
    fn draw_delay(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.gen_range(range)
    }

    fn draw_roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.gen_range(range)
    }
}

/// 事前に決めた値を順に返す判定実装（テスト・再現用）
///
/// 値を使い切った後は、作業時間は範囲の下限、抽選値は範囲の上限を返す。
#[derive(Debug, Clone, Default)]
pub struct ScriptedOutcomeDecider {
    delays: VecDeque<u32>,
    rolls: VecDeque<u32>,
}

impl ScriptedOutcomeDecider {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            delays: VecDeque::new(),
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn with_delays(mut self, delays: impl IntoIterator<Item = u32>) -> Self {
        self.delays = delays.into_iter().collect();
        self
    }
}

impl OutcomeDecider for ScriptedOutcomeDecider {
    fn draw_delay(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.delays.pop_front().unwrap_or(*range.start())
    }

    fn draw_roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rolls.pop_front().unwrap_or(*range.end())
    }
}

/// 1件分の作業計画
///
/// 抽選（`draw`）と実行（`perform`）を分け、作業時間を実行前に報告できるようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderWork {
    sequence_number: u32,
    delay: u32,
    outcome: Outcome,
}

impl OrderWork {
    /// 作業時間と結果を抽選
    pub fn draw<C, D>(sequence_number: u32, config: &C, decider: &mut D) -> Self
    where
        C: PipelineConfig + ?Sized,
        D: OutcomeDecider + ?Sized,
    {
        let delay = decider.draw_delay(config.delay_range());
        let roll = decider.draw_roll(config.roll_range());

        Self {
            sequence_number,
            delay,
            outcome: config.thresholds().classify(roll),
        }
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn delay(&self) -> u32 {
        self.delay
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// 作業時間だけ実際に待機してから注文を完成させる
    pub async fn perform(self, delay_unit: Duration) -> Item {
        tokio::time::sleep(delay_unit * self.delay).await;
        Item::from_outcome(self.sequence_number, self.outcome)
    }
}
