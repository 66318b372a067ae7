//! CDR 风险分级.

use crate::consts::cdr::{CDR_HIGH_THRESHOLD, CDR_MODERATE_THRESHOLD};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 基于 CDR 的青光眼风险等级.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RiskLevel {
    /// `cdr < moderate`.
    Low = 0,

    /// `moderate <= cdr < high`.
    Moderate = 1,

    /// `cdr >= high`.
    High = 2,
}

impl RiskLevel {
    /// 所有取值, 按风险从低到高.
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Moderate, Self::High];
}

/// CDR 风险分级阈值. 区间下界闭合.
///
/// 该结构是只读的. 若要重新标定, 你应该创建新的实例.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CdrThresholds {
    moderate: f64,
    high: f64,
}

impl CdrThresholds {
    /// 构建阈值.
    ///
    /// 需要 `0 <= moderate < high` 且两者有限, 否则返回 `None`.
    pub fn new(moderate: f64, high: f64) -> Option<Self> {
        if moderate.is_finite() && high.is_finite() && 0.0 <= moderate && moderate < high {
            Some(Self { moderate, high })
        } else {
            None
        }
    }

    /// 临床惯用阈值: 0.3 与 0.6.
    #[inline]
    pub const fn clinical() -> Self {
        Self {
            moderate: CDR_MODERATE_THRESHOLD,
            high: CDR_HIGH_THRESHOLD,
        }
    }

    /// 中度风险下界.
    #[inline]
    pub fn moderate(&self) -> f64 {
        self.moderate
    }

    /// 高度风险下界.
    #[inline]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// 对 `cdr` 分级.
    ///
    /// `NaN` 不满足任何下界, 被分为 `Low`; 调用者不应传入无意义的值.
    pub fn classify(&self, cdr: f64) -> RiskLevel {
        if cdr >= self.high {
            RiskLevel::High
        } else if cdr >= self.moderate {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl Default for CdrThresholds {
    fn default() -> Self {
        Self::clinical()
    }
}

/// 以临床惯用阈值对 `cdr` 分级: `< 0.3` 低, `[0.3, 0.6)` 中, `>= 0.6` 高.
#[inline]
pub fn classify_cdr_risk(cdr: f64) -> RiskLevel {
    CdrThresholds::clinical().classify(cdr)
}
