//! 单眼临床数据.

use crate::consts::mean_defect::{MILD_UPPER, MODERATE_UPPER, SEVERE_UPPER};
use crate::geometry::GeometryResult;
use crate::record::{CrystallineStatus, DiagnosisStatus, Eye, RefractiveError};
use crate::segmentation::{compute_cdr_with, CdrMethod, CdrThresholds, RiskLevel, Segmentation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 单眼的数值型临床测量. 未测量的项为 `None`, 统计时被排除 (而不是视为 0).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurements {
    /// 非接触 (气动) 眼压, mmHg.
    pub pneumatic_iop: Option<f64>,

    /// Perkins 眼压计眼压, mmHg.
    pub perkins_iop: Option<f64>,

    /// 中央角膜厚度, μm.
    pub pachymetry: Option<f64>,

    /// 眼轴长度, mm.
    pub axial_length: Option<f64>,

    /// 视野平均缺损, dB. 一般不大于 0.
    pub mean_defect: Option<f64>,
}

/// 基于视野平均缺损 (MD) 的青光眼分期.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GlaucomaSeverity {
    /// `-6 <= md < -3`.
    Mild,

    /// `-12 <= md < -6`.
    Moderate,

    /// `md < -12`.
    Severe,

    /// `md >= -3`, 或 `md` 无意义.
    Unclassifiable,
}

impl GlaucomaSeverity {
    /// 对平均缺损值 `md` (dB) 分期.
    pub fn from_mean_defect(md: f64) -> Self {
        if (MODERATE_UPPER..MILD_UPPER).contains(&md) {
            Self::Mild
        } else if (SEVERE_UPPER..MODERATE_UPPER).contains(&md) {
            Self::Moderate
        } else if md < SEVERE_UPPER {
            Self::Severe
        } else {
            Self::Unclassifiable
        }
    }
}

/// 一位患者一只眼的数据.
///
/// CDR 是派生属性, 不会被存储, 每次都从当前的 [`Segmentation`] 重新计算.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EyeData {
    eye: Eye,
    diagnosis: DiagnosisStatus,
    crystalline_status: Option<CrystallineStatus>,
    refractive_error: Option<RefractiveError>,
    measurements: Measurements,
    segmentation: Option<Segmentation>,
}

impl EyeData {
    /// 以眼别和诊断初始化. 其余字段为空, 可以通过 `with_*` 方法补充.
    pub fn new(eye: Eye, diagnosis: DiagnosisStatus) -> Self {
        Self {
            eye,
            diagnosis,
            crystalline_status: None,
            refractive_error: None,
            measurements: Measurements::default(),
            segmentation: None,
        }
    }

    /// 设置晶状体状态.
    #[inline]
    pub fn with_crystalline_status(mut self, status: CrystallineStatus) -> Self {
        self.crystalline_status = Some(status);
        self
    }

    /// 设置屈光不正.
    #[inline]
    pub fn with_refractive_error(mut self, refraction: RefractiveError) -> Self {
        self.refractive_error = Some(refraction);
        self
    }

    /// 设置数值型测量.
    #[inline]
    pub fn with_measurements(mut self, measurements: Measurements) -> Self {
        self.measurements = measurements;
        self
    }

    /// 设置分割结果.
    #[inline]
    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.segmentation = Some(segmentation);
        self
    }

    /// 附加 (或替换) 分割结果, 返回原有的分割结果.
    #[inline]
    pub fn attach_segmentation(&mut self, segmentation: Segmentation) -> Option<Segmentation> {
        self.segmentation.replace(segmentation)
    }

    /// 移除分割结果.
    #[inline]
    pub fn detach_segmentation(&mut self) -> Option<Segmentation> {
        self.segmentation.take()
    }

    /// 眼别.
    #[inline]
    pub fn eye(&self) -> Eye {
        self.eye
    }

    /// 诊断.
    #[inline]
    pub fn diagnosis(&self) -> DiagnosisStatus {
        self.diagnosis
    }

    /// 晶状体状态.
    #[inline]
    pub fn crystalline_status(&self) -> Option<CrystallineStatus> {
        self.crystalline_status
    }

    /// 屈光不正.
    #[inline]
    pub fn refractive_error(&self) -> Option<&RefractiveError> {
        self.refractive_error.as_ref()
    }

    /// 数值型测量.
    #[inline]
    pub fn measurements(&self) -> &Measurements {
        &self.measurements
    }

    /// 分割结果.
    #[inline]
    pub fn segmentation(&self) -> Option<&Segmentation> {
        self.segmentation.as_ref()
    }

    /// 以默认方法 (面积比) 计算 CDR.
    ///
    /// 没有分割结果时返回 `None`; 分割几何非法时返回 `Some(Err(_))`.
    #[inline]
    pub fn cdr(&self) -> Option<GeometryResult<f64>> {
        self.cdr_with(CdrMethod::default())
    }

    /// 以指定方法计算 CDR. 返回值规则与 [`EyeData::cdr`] 相同.
    #[inline]
    pub fn cdr_with(&self, method: CdrMethod) -> Option<GeometryResult<f64>> {
        self.segmentation
            .as_ref()
            .map(|seg| compute_cdr_with(seg, method))
    }

    /// 以 `thresholds` 对默认 CDR 分级. 返回值规则与 [`EyeData::cdr`] 相同.
    #[inline]
    pub fn cdr_risk(&self, thresholds: &CdrThresholds) -> Option<GeometryResult<RiskLevel>> {
        self.cdr().map(|r| r.map(|cdr| thresholds.classify(cdr)))
    }

    /// 青光眼分期.
    ///
    /// 只有诊断为青光眼且测量了平均缺损的眼才有分期, 否则返回 `None`.
    pub fn glaucoma_severity(&self) -> Option<GlaucomaSeverity> {
        if !self.diagnosis.is_glaucoma() {
            return None;
        }
        self.measurements
            .mean_defect
            .map(GlaucomaSeverity::from_mean_defect)
    }
}
