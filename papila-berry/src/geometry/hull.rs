//! 凸包 (Andrew monotone chain).

use crate::consts::HULL_EPSILON;
use crate::geometry::{Point, Polygon};
use itertools::Itertools;
use ordered_float::OrderedFloat;

/// 一组点的凸包, 顶点按逆时针排列, 不含共线的中间点.
///
/// 所有输入点共线 (或不足 3 个不同点) 时, 凸包退化, 不包含任何点.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexHull {
    vertices: Vec<Point>,
}

impl ConvexHull {
    /// 计算 `points` 的凸包. 复杂度 `O(n log n)`.
    pub fn from_points(points: &[Point]) -> Self {
        let sorted: Vec<Point> = points
            .iter()
            .copied()
            .sorted_by_key(|p| (OrderedFloat(p.x()), OrderedFloat(p.y())))
            .dedup()
            .collect();
        if sorted.len() < 3 {
            return Self { vertices: sorted };
        }

        let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
        for p in sorted.iter() {
            Self::push_turning_left(&mut lower, *p);
        }
        let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
        for p in sorted.iter().rev() {
            Self::push_turning_left(&mut upper, *p);
        }

        // 两条链的末端分别是对方的起点.
        lower.pop();
        upper.pop();
        lower.extend(upper);
        Self { vertices: lower }
    }

    /// 保证链上最后三个点严格左转.
    fn push_turning_left(chain: &mut Vec<Point>, p: Point) {
        while chain.len() >= 2 {
            let n = chain.len();
            if Point::cross(&chain[n - 2], &chain[n - 1], &p) > 0.0 {
                break;
            }
            chain.pop();
        }
        chain.push(p);
    }

    /// 凸包顶点 (逆时针).
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        self.vertices.as_slice()
    }

    /// 凸包是否退化 (所有点共线)?
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// 判断点 `p` 是否在凸包内. 落在边界上 (容差内) 也视为在内部.
    ///
    /// 退化凸包不包含任何点.
    pub fn contains(&self, p: &Point) -> bool {
        if self.is_degenerate() {
            return false;
        }
        // 逆时针凸多边形: 点需要位于每条边的左侧 (或边上).
        self.vertices
            .iter()
            .circular_tuple_windows()
            .all(|(a, b)| Point::cross(a, b, p) >= -HULL_EPSILON * a.distance(b).max(1.0))
    }

    /// 转换为多边形.
    #[inline]
    pub fn into_polygon(self) -> Polygon {
        Polygon::new(self.vertices)
    }
}
