//! 屈光不正.

use std::fmt::Formatter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 屈光不正: 球镜 (sphere, D), 柱镜 (cylinder, D), 轴位 (axis, 度, 预期位于 `[0, 180]`).
///
/// 只读值类型. 不带散光的验光结果用 [`RefractiveError::spherical`] 构建.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RefractiveError {
    sphere: f64,
    cylinder: f64,
    axis: f64,
}

impl RefractiveError {
    /// 初始化.
    #[inline]
    pub const fn new(sphere: f64, cylinder: f64, axis: f64) -> Self {
        Self {
            sphere,
            cylinder,
            axis,
        }
    }

    /// 只有球镜分量 (柱镜与轴位为 0).
    #[inline]
    pub const fn spherical(sphere: f64) -> Self {
        Self::new(sphere, 0.0, 0.0)
    }

    /// 球镜.
    #[inline]
    pub fn sphere(&self) -> f64 {
        self.sphere
    }

    /// 柱镜.
    #[inline]
    pub fn cylinder(&self) -> f64 {
        self.cylinder
    }

    /// 轴位.
    #[inline]
    pub fn axis(&self) -> f64 {
        self.axis
    }

    /// 是否带有散光分量?
    #[inline]
    pub fn is_astigmatic(&self) -> bool {
        self.cylinder != 0.0
    }

    /// 等效球镜度: `sphere + cylinder / 2`.
    #[inline]
    pub fn spherical_equivalent(&self) -> f64 {
        self.sphere + self.cylinder / 2.0
    }
}

impl std::fmt::Display for RefractiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_astigmatic() {
            write!(
                f,
                "Sphere: {}, Cylinder: {}, Axis: {}°",
                self.sphere, self.cylinder, self.axis
            )
        } else {
            write!(f, "Sphere: {}", self.sphere)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RefractiveError;

    #[test]
    fn test_refraction_display() {
        let r = RefractiveError::new(-1.5, -0.75, 180.0);
        assert_eq!(r.to_string(), "Sphere: -1.5, Cylinder: -0.75, Axis: 180°");
        assert!((r.spherical_equivalent() + 1.875).abs() < 1e-12);

        let s = RefractiveError::spherical(-1.25);
        assert!(!s.is_astigmatic());
        assert_eq!(s.to_string(), "Sphere: -1.25");
    }
}
