//! 视盘/视杯分割分析.
//!
//! 从一只眼的视盘与视杯分割轮廓出发, 计算杯盘比 (CDR) 及其它与青光眼相关的几何指标.
//! 该模块的函数都是纯函数, 可以脱离数据集单独使用.

mod cdr;
mod risk;

use crate::geometry::Polygon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use cdr::{
    analyze, compute_cdr, compute_cdr_with, is_cup_within_disc, rim_to_disc_ratio, CdrMethod,
    SegmentationReport,
};
pub use risk::{classify_cdr_risk, CdrThresholds, RiskLevel};

/// 一只眼的分割结果: 视盘边界和视杯边界.
///
/// 视杯通常位于视盘之内, 但结构上不做保证 (见 [`is_cup_within_disc`]).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segmentation {
    disc_boundary: Polygon,
    cup_boundary: Polygon,
}

impl Segmentation {
    /// 初始化. 不检查多边形的合法性, 错误在计算时报告.
    #[inline]
    pub fn new(disc_boundary: Polygon, cup_boundary: Polygon) -> Self {
        Self {
            disc_boundary,
            cup_boundary,
        }
    }

    /// 视盘边界.
    #[inline]
    pub fn disc_boundary(&self) -> &Polygon {
        &self.disc_boundary
    }

    /// 视杯边界.
    #[inline]
    pub fn cup_boundary(&self) -> &Polygon {
        &self.cup_boundary
    }

    /// 以默认方法 (面积比) 计算 CDR. 见 [`compute_cdr`].
    #[inline]
    pub fn cdr(&self) -> crate::GeometryResult<f64> {
        compute_cdr(self)
    }
}
