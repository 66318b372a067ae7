//! 几何运算错误.

use thiserror::Error;

/// 多边形运算或比值计算的运行时错误.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// 多边形顶点不足.
    ///
    /// `vertices` 是实际顶点数, `required` 是运算需要的最少顶点数.
    /// 调用者应当丢弃或修复该分割轮廓后再重试.
    #[error("多边形至少需要 {required} 个顶点, 实际只有 {vertices} 个")]
    InvalidGeometry {
        /// 实际顶点数.
        vertices: usize,
        /// 需要的最少顶点数.
        required: usize,
    },

    /// 第 `index` 个顶点的坐标不是有限数 (NaN 或 inf).
    #[error("第 {index} 个顶点的坐标不是有限数")]
    NonFiniteVertex {
        /// 顶点下标.
        index: usize,
    },

    /// 比值的分母为 0 (例如面积为 0 的视盘轮廓).
    ///
    /// 此时相应指标应视为未定义, 而不是用哨兵值代替.
    #[error("退化几何: 比值的分母为 0")]
    DegenerateGeometry,
}
