//! 杯盘比 (Cup-to-Disc Ratio) 及其它轮廓指标.

use crate::consts::AREA_EPSILON;
use crate::geometry::{GeometryError, GeometryResult};
use crate::segmentation::{CdrThresholds, RiskLevel, Segmentation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// CDR 的定义方式.
///
/// 临床文献中 "垂直径比" 与 "面积比" 两种定义并存, 本 crate 默认使用面积比.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CdrMethod {
    /// `sqrt(视杯面积 / 视盘面积)`.
    #[default]
    Area,

    /// `视杯直径 / 视盘直径`, 直径为任意两顶点间的最大距离.
    Diameter,

    /// `视杯垂直跨度 / 视盘垂直跨度`.
    Vertical,
}

/// 以默认方法 (面积比) 计算 CDR: `sqrt(area(cup) / area(disc))`.
///
/// # 返回值
///
/// - 任一轮廓顶点少于 3 个时, 返回 `Err(GeometryError::InvalidGeometry)`;
/// - 视盘面积为 0 (绝对值不超过 [`AREA_EPSILON`]) 时, 返回 `Err(GeometryError::DegenerateGeometry)`;
/// - 任一轮廓的顶点坐标含 NaN 或 inf 时, 返回 `Err(GeometryError::NonFiniteVertex)`;
/// - 比值溢出为非有限数时, 返回 `Err(GeometryError::DegenerateGeometry)`;
/// - 其他情况返回 `Ok(cdr)`, 且 `cdr` 一定是有限数.
///
/// # 注意
///
/// 1. 退化判定使用绝对容差 `AREA_EPSILON = 1e-12`, 与坐标单位无关.
///   像素坐标下的轮廓面积远大于该值; 归一化坐标下, 边长约 `1e-6` 以下的轮廓会被视为退化.
/// 2. 结果不会被截断到 `[0, 1]`. 视杯面积大于视盘面积 (错误的分割) 时结果大于 1,
/// 由调用者自行判断, 这样坏数据不会被掩盖.
#[inline]
pub fn compute_cdr(segmentation: &Segmentation) -> GeometryResult<f64> {
    compute_cdr_with(segmentation, CdrMethod::Area)
}

/// 以指定方法计算 CDR. 返回值规则与 [`compute_cdr`] 相同.
pub fn compute_cdr_with(segmentation: &Segmentation, method: CdrMethod) -> GeometryResult<f64> {
    let disc = segmentation.disc_boundary();
    let cup = segmentation.cup_boundary();
    let cdr = match method {
        CdrMethod::Area => ratio(cup.area()?, disc.area()?)?.sqrt(),
        CdrMethod::Diameter => ratio(cup.diameter()?, disc.diameter()?)?,
        CdrMethod::Vertical => ratio(cup.vertical_extent()?, disc.vertical_extent()?)?,
    };
    log::trace!("CDR ({method:?}) = {cdr:.4}");
    Ok(cdr)
}

/// 盘沿面积占视盘面积的比例: `(area(disc) - area(cup)) / area(disc)`.
///
/// 错误规则与 [`compute_cdr`] 相同. 视杯大于视盘时结果为负.
pub fn rim_to_disc_ratio(segmentation: &Segmentation) -> GeometryResult<f64> {
    let cup_area = segmentation.cup_boundary().area()?;
    let disc_area = segmentation.disc_boundary().area()?;
    ratio(disc_area - cup_area, disc_area)
}

/// 视杯的每个顶点是否都落在视盘的凸包之内 (边界上也算)?
///
/// 这是一个数据质量信号, 不会阻止 CDR 的计算.
/// 任一轮廓顶点不足或含非有限坐标, 或视盘凸包退化时返回 `false`.
pub fn is_cup_within_disc(segmentation: &Segmentation) -> bool {
    let cup = segmentation.cup_boundary();
    let Ok(hull) = segmentation.disc_boundary().convex_hull() else {
        return false;
    };
    cup.is_valid()
        && cup
            .vertices()
            .iter()
            .all(|p| p.is_finite() && hull.contains(p))
}

/// 一只眼分割的分析结果.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentationReport {
    /// 面积比 CDR.
    pub cdr: f64,

    /// `cdr` 的风险等级.
    pub risk: RiskLevel,

    /// 盘沿面积占比.
    pub rim_to_disc: f64,

    /// 视杯是否在视盘凸包内.
    pub cup_within_disc: bool,
}

/// 计算一只眼分割的全部指标. 错误规则与 [`compute_cdr`] 相同.
pub fn analyze(
    segmentation: &Segmentation,
    thresholds: &CdrThresholds,
) -> GeometryResult<SegmentationReport> {
    let cdr = compute_cdr(segmentation)?;
    Ok(SegmentationReport {
        cdr,
        risk: thresholds.classify(cdr),
        rim_to_disc: rim_to_disc_ratio(segmentation)?,
        cup_within_disc: is_cup_within_disc(segmentation),
    })
}

/// `num / den`.
///
/// `den` 为 0 (容差内), 或任一操作数及结果不是有限数时, 返回 `Err(GeometryError::DegenerateGeometry)`.
#[inline]
fn ratio(num: f64, den: f64) -> GeometryResult<f64> {
    if !num.is_finite() || !den.is_finite() || den.abs() <= AREA_EPSILON {
        return Err(GeometryError::DegenerateGeometry);
    }
    let ans = num / den;
    if ans.is_finite() {
        Ok(ans)
    } else {
        Err(GeometryError::DegenerateGeometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// 以 `(cx, cy)` 为中心, 边长为 `side` 的正方形 (逆时针).
    fn square(cx: f64, cy: f64, side: f64) -> Polygon {
        let h = side / 2.0;
        Polygon::from_xy([
            (cx - h, cy - h),
            (cx + h, cy - h),
            (cx + h, cy + h),
            (cx - h, cy + h),
        ])
    }

    /// 视盘面积 100, 视杯面积 25, CDR 为 0.5.
    #[test]
    fn test_cdr_area_ratio() {
        let seg = Segmentation::new(square(50.0, 50.0, 10.0), square(50.0, 50.0, 5.0));
        assert!(f64_eq(compute_cdr(&seg).unwrap(), 0.5));
        assert!(f64_eq(seg.cdr().unwrap(), 0.5));
        assert!(f64_eq(rim_to_disc_ratio(&seg).unwrap(), 0.75));
        assert!(is_cup_within_disc(&seg));
    }

    #[test]
    fn test_cdr_other_methods() {
        let seg = Segmentation::new(square(0.0, 0.0, 10.0), square(0.0, 0.0, 4.0));
        assert!(f64_eq(compute_cdr_with(&seg, CdrMethod::Diameter).unwrap(), 0.4));
        assert!(f64_eq(compute_cdr_with(&seg, CdrMethod::Vertical).unwrap(), 0.4));
        assert_eq!(CdrMethod::default(), CdrMethod::Area);
    }

    /// 视盘顶点共线, 面积为 0.
    #[test]
    fn test_cdr_degenerate_disc() {
        let disc = Polygon::from_xy([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let seg = Segmentation::new(disc, square(1.0, 1.0, 0.5));
        assert_eq!(compute_cdr(&seg), Err(GeometryError::DegenerateGeometry));
        assert!(!is_cup_within_disc(&seg));

        // 垂直跨度为 0 的视盘.
        let flat = Polygon::from_xy([(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
        let seg = Segmentation::new(flat, square(1.0, 1.0, 0.5));
        assert_eq!(
            compute_cdr_with(&seg, CdrMethod::Vertical),
            Err(GeometryError::DegenerateGeometry)
        );
    }

    #[test]
    fn test_cdr_invalid_polygon() {
        let cup = Polygon::from_xy([(0.0, 0.0), (1.0, 0.0)]);
        let seg = Segmentation::new(square(0.0, 0.0, 10.0), cup);
        assert_eq!(
            compute_cdr(&seg),
            Err(GeometryError::InvalidGeometry {
                vertices: 2,
                required: 3
            })
        );
        assert!(!is_cup_within_disc(&seg));
    }

    /// 视杯大于视盘时不截断.
    #[test]
    fn test_cdr_not_clamped() {
        let seg = Segmentation::new(square(0.0, 0.0, 4.0), square(0.0, 0.0, 8.0));
        assert!(f64_eq(compute_cdr(&seg).unwrap(), 2.0));
        assert!(rim_to_disc_ratio(&seg).unwrap() < 0.0);
        assert!(!is_cup_within_disc(&seg));
    }

    /// 顶点顺序 (顺时针/逆时针) 不影响 CDR.
    #[test]
    fn test_cdr_orientation_independent() {
        let seg = Segmentation::new(square(0.0, 0.0, 10.0).reversed(), square(0.0, 0.0, 5.0));
        assert!(f64_eq(compute_cdr(&seg).unwrap(), 0.5));
    }

    #[test]
    fn test_analyze() {
        let seg = Segmentation::new(square(0.0, 0.0, 10.0), square(3.0, 0.0, 7.0));
        let report = analyze(&seg, &CdrThresholds::clinical()).unwrap();
        assert!(f64_eq(report.cdr, 0.7));
        assert_eq!(report.risk, RiskLevel::High);
        assert!(f64_eq(report.rim_to_disc, 0.51));
        // 视杯右边缘 x = 6.5 超出视盘 x = 5.
        assert!(!report.cup_within_disc);
    }

    /// 含 NaN 顶点的轮廓不产生 NaN 形式的 CDR.
    #[test]
    fn test_cdr_non_finite_vertex() {
        let disc = Polygon::from_xy([(0.0, 0.0), (f64::NAN, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let seg = Segmentation::new(disc, square(5.0, 5.0, 2.0));
        let expected = GeometryError::NonFiniteVertex { index: 1 };
        for method in [CdrMethod::Area, CdrMethod::Diameter, CdrMethod::Vertical] {
            assert_eq!(compute_cdr_with(&seg, method), Err(expected));
        }
        assert_eq!(rim_to_disc_ratio(&seg), Err(expected));
        assert_eq!(analyze(&seg, &CdrThresholds::clinical()), Err(expected));
        assert!(!is_cup_within_disc(&seg));

        // 视杯含无穷大坐标.
        let cup = Polygon::from_xy([(0.0, 0.0), (1.0, 1.0), (f64::INFINITY, 0.0)]);
        let seg = Segmentation::new(square(0.0, 0.0, 10.0), cup);
        assert_eq!(
            compute_cdr(&seg),
            Err(GeometryError::NonFiniteVertex { index: 2 })
        );
        assert!(!is_cup_within_disc(&seg));
    }

    #[test]
    fn test_ratio_overflow() {
        assert_eq!(ratio(f64::MAX, 1e-10), Err(GeometryError::DegenerateGeometry));
        assert_eq!(ratio(f64::NAN, 1.0), Err(GeometryError::DegenerateGeometry));
        assert!(f64_eq(ratio(1.0, 4.0).unwrap(), 0.25));
    }

    /// 归一化坐标下的小轮廓不会被误判为退化.
    #[test]
    fn test_cdr_normalised_coordinates() {
        let seg = Segmentation::new(square(0.0, 0.0, 1e-4), square(0.0, 0.0, 5e-5));
        assert!(f64_eq(compute_cdr(&seg).unwrap(), 0.5));

        let tiny = Segmentation::new(square(0.0, 0.0, 1e-7), square(0.0, 0.0, 5e-8));
        assert_eq!(compute_cdr(&tiny), Err(GeometryError::DegenerateGeometry));
    }
}
