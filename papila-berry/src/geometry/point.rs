//! 图像坐标系中的二维点.

use ordered_float::OrderedFloat;
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 图像坐标系中的一个点 `(x, y)`.
///
/// 该结构是只读的值类型. 相等与哈希均按坐标值进行 (借助 [`OrderedFloat`],
/// 因此 `NaN` 与自身相等, `0.0` 与 `-0.0` 相等).
#[derive(Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// 初始化.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 横坐标.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// 纵坐标.
    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// 两个坐标是否都是有限数?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// 到 `other` 的欧几里得距离.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// 向量 `o -> a` 与 `o -> b` 的叉积 (z 分量).
    ///
    /// 大于 0 时 `o, a, b` 为逆时针方向.
    #[inline]
    pub(crate) fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }

    #[inline]
    fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.x), OrderedFloat(self.y))
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// 压缩到一行.
impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({:.4}, {:.4})", self.x, self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::Point;
    use std::collections::HashSet;

    #[test]
    fn test_point_eq_and_hash() {
        let mut set = HashSet::new();
        set.insert(Point::new(1.0, 2.0));
        set.insert(Point::new(1.0, 2.0));
        set.insert(Point::new(-0.0, 2.0));
        set.insert(Point::new(0.0, 2.0));
        assert_eq!(set.len(), 2);

        assert_eq!(Point::new(f64::NAN, 1.0), Point::new(f64::NAN, 1.0));
        assert_ne!(Point::new(1.0, 2.0), Point::new(2.0, 1.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::from((0.0, 0.0));
        let b = Point::from((3.0, 4.0));
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!(Point::cross(&a, &Point::new(1.0, 0.0), &Point::new(0.0, 1.0)) > 0.0);
    }
}
