// 注文結果モデル
// 作業時間の抽選、結果の判定、実際の待機

pub mod implementations;

// 公開API
pub use implementations::{OrderWork, RandomOutcomeDecider, ScriptedOutcomeDecider};
