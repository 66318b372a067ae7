//! 二维几何基础.
//!
//! 所有运算都是纯函数, 无副作用. 除直径 (`O(n^2)`) 外, 复杂度均为 `O(n)`.
//! 分割轮廓一般只有几十个顶点, 所以直径保持最朴素的两两比较.

mod error;
mod hull;
mod point;
mod polygon;

pub use error::GeometryError;
pub use hull::ConvexHull;
pub use point::Point;
pub use polygon::Polygon;

/// 几何运算结果.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// 多边形面积 (shoelace 公式的绝对值).
///
/// 顶点少于 3 个时返回 `Err(GeometryError::InvalidGeometry)`.
#[inline]
pub fn polygon_area(polygon: &Polygon) -> GeometryResult<f64> {
    polygon.area()
}

/// 多边形有向面积. 逆时针为正, 顺时针为负.
#[inline]
pub fn polygon_signed_area(polygon: &Polygon) -> GeometryResult<f64> {
    polygon.signed_area()
}

/// 多边形顶点的算术平均 (近似质心).
#[inline]
pub fn polygon_centroid(polygon: &Polygon) -> GeometryResult<Point> {
    polygon.centroid()
}

/// 多边形任意两顶点间的最大欧几里得距离.
#[inline]
pub fn polygon_diameter(polygon: &Polygon) -> GeometryResult<f64> {
    polygon.diameter()
}

/// 多边形周长 (含末顶点到首顶点的边).
#[inline]
pub fn polygon_perimeter(polygon: &Polygon) -> GeometryResult<f64> {
    polygon.perimeter()
}
