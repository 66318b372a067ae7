//! 通用常量.
//!
//! 临床分级阈值统一放在这里, 以便重新标定. 分级代码不应内联这些数值.

/// 杯盘比 (CDR) 风险阈值.
pub mod cdr {
    /// `cdr` 不小于该值时为中度风险 (`RiskLevel::Moderate`).
    pub const CDR_MODERATE_THRESHOLD: f64 = 0.3;

    /// `cdr` 不小于该值时为高度风险 (`RiskLevel::High`).
    pub const CDR_HIGH_THRESHOLD: f64 = 0.6;
}

/// 视野平均缺损 (Mean Defect, 单位 dB) 的青光眼分期阈值.
///
/// 区间均为左闭右开: `[-6, -3)` 为轻度, `[-12, -6)` 为中度, `(-inf, -12)` 为重度.
pub mod mean_defect {
    /// 轻度青光眼的上界 (不含).
    pub const MILD_UPPER: f64 = -3.0;

    /// 轻度青光眼的下界 (含), 同时是中度青光眼的上界 (不含).
    pub const MODERATE_UPPER: f64 = -6.0;

    /// 中度青光眼的下界 (含). 低于该值为重度青光眼.
    pub const SEVERE_UPPER: f64 = -12.0;
}

/// 一个多边形 (分割轮廓) 至少需要的顶点数.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// 面积、长度的绝对值小于等于该值时视为 0 (退化几何).
///
/// 这是绝对容差, 针对像素坐标标定. 归一化坐标下边长约 `1e-6` 以下的轮廓会被视为退化.
pub const AREA_EPSILON: f64 = 1e-12;

/// 点在凸包边界上的判定容差 (叉积).
pub const HULL_EPSILON: f64 = 1e-9;

/// 环境变量名. 若非空, 则作为 PAPILA 数据集根目录.
pub const PAPILA_DIR_ENV: &str = "PAPILA_DIR";
