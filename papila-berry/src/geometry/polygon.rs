//! 闭合多边形 (分割轮廓).

use crate::consts::MIN_POLYGON_VERTICES;
use crate::geometry::{ConvexHull, GeometryError, GeometryResult, Point};
use itertools::{Itertools, MinMaxResult};
use ordered_float::OrderedFloat;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 有序、首尾相接的顶点序列, 表示视盘或视杯的边界.
///
/// 顶点顺序决定了遍历方向 (从而决定有向面积的符号), 不仅仅是成员关系.
/// 最后一个顶点隐式地连回第一个顶点, 所以不需要重复首顶点.
///
/// # 注意
///
/// 1. 构造时不检查顶点个数. 顶点少于 3 个的多边形在几何运算时返回
///   `Err(GeometryError::InvalidGeometry)`.
/// 2. 多边形不应自交. 该前提不做检查, 自交时面积没有意义.
/// 3. 顶点坐标含 NaN 或 inf 时, 几何运算返回 `Err(GeometryError::NonFiniteVertex)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// 初始化.
    #[inline]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// 从一组 `(x, y)` 构建多边形.
    pub fn from_xy<I: IntoIterator<Item = (f64, f64)>>(it: I) -> Self {
        it.into_iter().map(Point::from).collect()
    }

    /// 所有顶点.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        self.vertices.as_slice()
    }

    /// 顶点个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// 是否没有任何顶点?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 顶点数是否足以进行几何运算? 不检查坐标是否有限.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.len() >= MIN_POLYGON_VERTICES
    }

    /// 有向面积 (shoelace 公式). 逆时针为正, 顺时针为负.
    ///
    /// `0.5 * sum(x_i * y_{i+1} - x_{i+1} * y_i)`, 末顶点与首顶点相连.
    pub fn signed_area(&self) -> GeometryResult<f64> {
        let sum = self
            .checked()?
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.x() * b.y() - b.x() * a.y())
            .sum::<f64>();
        Ok(0.5 * sum)
    }

    /// 面积, 即有向面积的绝对值.
    #[inline]
    pub fn area(&self) -> GeometryResult<f64> {
        self.signed_area().map(f64::abs)
    }

    /// 顶点坐标的算术平均.
    ///
    /// 对接近凸形的视盘/视杯轮廓, 这是对真实质心足够好的近似.
    pub fn centroid(&self) -> GeometryResult<Point> {
        let vertices = self.checked()?;
        let n = vertices.len() as f64;
        let (sx, sy) = vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x(), sy + p.y()));
        Ok(Point::new(sx / n, sy / n))
    }

    /// 任意两顶点间的最大欧几里得距离.
    pub fn diameter(&self) -> GeometryResult<f64> {
        Ok(self
            .checked()?
            .iter()
            .tuple_combinations()
            .map(|(a, b)| a.distance(b))
            .fold(0.0, f64::max))
    }

    /// 周长.
    pub fn perimeter(&self) -> GeometryResult<f64> {
        Ok(self
            .checked()?
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.distance(b))
            .sum())
    }

    /// 垂直方向 (y 轴) 跨度.
    #[inline]
    pub fn vertical_extent(&self) -> GeometryResult<f64> {
        Self::extent(self.checked()?.iter().map(Point::y))
    }

    /// 水平方向 (x 轴) 跨度.
    #[inline]
    pub fn horizontal_extent(&self) -> GeometryResult<f64> {
        Self::extent(self.checked()?.iter().map(Point::x))
    }

    /// 凸包.
    #[inline]
    pub fn convex_hull(&self) -> GeometryResult<ConvexHull> {
        Ok(ConvexHull::from_points(self.checked()?))
    }

    /// 顶点顺序反转后的多边形 (有向面积变号).
    pub fn reversed(&self) -> Self {
        self.vertices.iter().rev().copied().collect()
    }

    fn extent<I: Iterator<Item = f64>>(it: I) -> GeometryResult<f64> {
        match it.map(OrderedFloat).minmax() {
            MinMaxResult::MinMax(lo, hi) => Ok(hi.0 - lo.0),
            // `checked` 保证了至少 3 个顶点.
            MinMaxResult::OneElement(_) | MinMaxResult::NoElements => Ok(0.0),
        }
    }

    /// 顶点不足时返回 `Err(GeometryError::InvalidGeometry)`,
    /// 有顶点坐标不是有限数时返回 `Err(GeometryError::NonFiniteVertex)`.
    fn checked(&self) -> GeometryResult<&[Point]> {
        if !self.is_valid() {
            return Err(GeometryError::InvalidGeometry {
                vertices: self.len(),
                required: MIN_POLYGON_VERTICES,
            });
        }
        match self.vertices.iter().position(|p| !p.is_finite()) {
            Some(index) => Err(GeometryError::NonFiniteVertex { index }),
            None => Ok(self.vertices()),
        }
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Point>> for Polygon {
    #[inline]
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}
