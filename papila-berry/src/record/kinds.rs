//! 记录中使用的有限枚举.

use std::fmt::Formatter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 性别.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gender {
    /// 男性.
    Male = 0,

    /// 女性.
    Female = 1,
}

impl Gender {
    /// 所有取值.
    pub const ALL: [Gender; 2] = [Self::Male, Self::Female];
}

/// 眼别.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Eye {
    /// 右眼 (OD, oculus dexter).
    Right = 0,

    /// 左眼 (OS, oculus sinister).
    Left = 1,
}

impl Eye {
    /// 所有取值. 右眼在前, 与数据集文件的组织方式一致.
    pub const ALL: [Eye; 2] = [Self::Right, Self::Left];

    /// 临床缩写: `"OD"` 或 `"OS"`.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Right => "OD",
            Self::Left => "OS",
        }
    }

    /// 另一只眼.
    #[inline]
    pub const fn other(&self) -> Eye {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }
}

impl std::fmt::Display for Eye {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 单眼诊断.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosisStatus {
    /// 健康.
    Healthy = 0,

    /// 青光眼.
    Glaucoma = 1,

    /// 可疑.
    Suspect = 2,
}

impl DiagnosisStatus {
    /// 所有取值.
    pub const ALL: [DiagnosisStatus; 3] = [Self::Healthy, Self::Glaucoma, Self::Suspect];

    /// 是否为青光眼?
    #[inline]
    pub fn is_glaucoma(&self) -> bool {
        matches!(self, Self::Glaucoma)
    }
}

/// 晶状体状态.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CrystallineStatus {
    /// 有晶状体 (自然晶状体).
    Phakic = 0,

    /// 人工晶状体.
    Pseudophakic = 1,
}

impl CrystallineStatus {
    /// 所有取值.
    pub const ALL: [CrystallineStatus; 2] = [Self::Phakic, Self::Pseudophakic];
}

#[cfg(test)]
mod tests {
    use super::Eye;

    #[test]
    fn test_eye_code() {
        assert_eq!(Eye::Right.code(), "OD");
        assert_eq!(Eye::Left.to_string(), "OS");
        assert_eq!(Eye::Left.other(), Eye::Right);
    }
}
