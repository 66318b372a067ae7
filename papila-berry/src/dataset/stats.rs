//! 数据集描述统计.
//!
//! 所有统计量在一次遍历中累积. 缺失的字段 (例如没有分割结果就没有 CDR)
//! 不参与对应字段的统计, 而不是被当作 0; 每个字段都同时报告参与统计的个数.

use crate::record::{CrystallineStatus, DiagnosisStatus, Gender, Measurements};
use crate::segmentation::{CdrThresholds, RiskLevel};
use crate::Patient;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 单个数值字段的在线统计量 (Welford 算法).
///
/// 支持 `update` 逐个累积, 也支持 `merge` 合并两个独立累积的结果.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunningStats {
    count: usize,
    mean: f64,
    /// 与均值之差的平方和.
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 累积一个值. 非有限值 (inf, NaN) 被忽略.
    pub fn update(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// 如果 `value` 存在, 则累积之.
    #[inline]
    pub fn update_opt(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.update(v);
        }
    }

    /// 合并另一个独立累积的结果.
    pub fn merge(&mut self, other: &Self) {
        match (self.count, other.count) {
            (_, 0) => {}
            (0, _) => *self = *other,
            (na, nb) => {
                let n = (na + nb) as f64;
                let delta = other.mean - self.mean;
                self.mean += delta * nb as f64 / n;
                self.m2 += other.m2 + delta * delta * (na as f64) * (nb as f64) / n;
                self.min = self.min.min(other.min);
                self.max = self.max.max(other.max);
                self.count = na + nb;
            }
        }
    }

    /// 参与统计的值的个数.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// 生成统计摘要.
    pub fn summary(&self) -> FieldSummary {
        match self.count {
            0 => FieldSummary::default(),
            n => FieldSummary {
                count: n,
                mean: Some(self.mean),
                std_dev: Some((self.m2 / n as f64).sqrt()),
                min: Some(self.min),
                max: Some(self.max),
            },
        }
    }
}

/// 单个数值字段的统计摘要. `count` 为 0 时其余字段均为 `None`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldSummary {
    /// 参与统计的值的个数.
    pub count: usize,

    /// 均值.
    pub mean: Option<f64>,

    /// 总体标准差 (ddof = 0).
    pub std_dev: Option<f64>,

    /// 最小值.
    pub min: Option<f64>,

    /// 最大值.
    pub max: Option<f64>,
}

/// 患者层面的诊断分布.
///
/// 两只眼诊断一致 (或只有一只眼) 时按该诊断计数, 不一致时计为 `mixed`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatientDiagnosisDistribution {
    /// 健康.
    pub healthy: usize,
    /// 青光眼.
    pub glaucoma: usize,
    /// 可疑.
    pub suspect: usize,
    /// 两眼诊断不一致.
    pub mixed: usize,
    /// 没有眼别数据.
    pub no_data: usize,
}

impl PatientDiagnosisDistribution {
    fn update(&mut self, patient: &Patient) {
        let mut diagnoses = patient.eyes().map(|e| e.diagnosis());
        let Some(first) = diagnoses.next() else {
            self.no_data += 1;
            return;
        };
        if diagnoses.any(|d| d != first) {
            self.mixed += 1;
            return;
        }
        match first {
            DiagnosisStatus::Healthy => self.healthy += 1,
            DiagnosisStatus::Glaucoma => self.glaucoma += 1,
            DiagnosisStatus::Suspect => self.suspect += 1,
        }
    }

    fn merge(&mut self, other: &Self) {
        self.healthy += other.healthy;
        self.glaucoma += other.glaucoma;
        self.suspect += other.suspect;
        self.mixed += other.mixed;
        self.no_data += other.no_data;
    }
}

/// 数据集描述统计.
///
/// 通过 [`PapilaDataset::get_statistics`](crate::PapilaDataset::get_statistics) 获得.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statistics {
    total_patients: usize,
    total_eyes: usize,

    /// 以 `DiagnosisStatus as usize` 索引, 按眼计数.
    diagnosis: [usize; 3],
    /// 以 `Gender as usize` 索引, 按患者计数.
    gender: [usize; 2],
    /// 以 `CrystallineStatus as usize` 索引, 按眼计数.
    crystalline: [usize; 2],
    /// 以 `RiskLevel as usize` 索引, 按 (可计算 CDR 的) 眼计数.
    risk: [usize; 3],
    patient_diagnosis: PatientDiagnosisDistribution,

    age: RunningStats,
    pneumatic_iop: RunningStats,
    perkins_iop: RunningStats,
    pachymetry: RunningStats,
    axial_length: RunningStats,
    mean_defect: RunningStats,
    cdr: RunningStats,

    /// 有分割结果但 CDR 无法计算的眼.
    cdr_skipped: usize,

    thresholds: CdrThresholds,
}

impl Statistics {
    /// 创建空统计, CDR 风险以 `thresholds` 分级.
    pub fn new(thresholds: CdrThresholds) -> Self {
        Self {
            total_patients: 0,
            total_eyes: 0,
            diagnosis: [0; 3],
            gender: [0; 2],
            crystalline: [0; 2],
            risk: [0; 3],
            patient_diagnosis: PatientDiagnosisDistribution::default(),
            age: RunningStats::default(),
            pneumatic_iop: RunningStats::default(),
            perkins_iop: RunningStats::default(),
            pachymetry: RunningStats::default(),
            axial_length: RunningStats::default(),
            mean_defect: RunningStats::default(),
            cdr: RunningStats::default(),
            cdr_skipped: 0,
            thresholds,
        }
    }

    /// 累积一位患者 (及其所有眼).
    ///
    /// 分割几何非法的眼只是不计入 CDR 相关统计, 不会中断累积.
    pub fn update(&mut self, patient: &Patient) {
        self.total_patients += 1;
        self.gender[patient.gender() as usize] += 1;
        self.age.update(f64::from(patient.age()));
        self.patient_diagnosis.update(patient);

        for eye in patient.eyes() {
            self.total_eyes += 1;
            self.diagnosis[eye.diagnosis() as usize] += 1;
            if let Some(c) = eye.crystalline_status() {
                self.crystalline[c as usize] += 1;
            }
            self.update_measurements(eye.measurements());

            match eye.cdr() {
                Some(Ok(cdr)) => {
                    let risk = self.thresholds.classify(cdr);
                    self.cdr.update(cdr);
                    self.risk[risk as usize] += 1;
                }
                Some(Err(e)) => {
                    log::warn!(
                        "patient `{}` {}: CDR skipped: {e}",
                        patient.patient_id(),
                        eye.eye()
                    );
                    self.cdr_skipped += 1;
                }
                None => {}
            }
        }
    }

    fn update_measurements(&mut self, m: &Measurements) {
        self.pneumatic_iop.update_opt(m.pneumatic_iop);
        self.perkins_iop.update_opt(m.perkins_iop);
        self.pachymetry.update_opt(m.pachymetry);
        self.axial_length.update_opt(m.axial_length);
        self.mean_defect.update_opt(m.mean_defect);
    }

    /// 合并另一份独立累积的统计. 两者应使用相同的风险阈值.
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.thresholds, other.thresholds);

        fn add<const N: usize>(a: &mut [usize; N], b: &[usize; N]) {
            a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
        }

        self.total_patients += other.total_patients;
        self.total_eyes += other.total_eyes;
        add(&mut self.diagnosis, &other.diagnosis);
        add(&mut self.gender, &other.gender);
        add(&mut self.crystalline, &other.crystalline);
        add(&mut self.risk, &other.risk);
        self.patient_diagnosis.merge(&other.patient_diagnosis);
        self.age.merge(&other.age);
        self.pneumatic_iop.merge(&other.pneumatic_iop);
        self.perkins_iop.merge(&other.perkins_iop);
        self.pachymetry.merge(&other.pachymetry);
        self.axial_length.merge(&other.axial_length);
        self.mean_defect.merge(&other.mean_defect);
        self.cdr.merge(&other.cdr);
        self.cdr_skipped += other.cdr_skipped;
    }

    /// 患者总数.
    #[inline]
    pub fn total_patients(&self) -> usize {
        self.total_patients
    }

    /// 眼总数.
    #[inline]
    pub fn total_eyes(&self) -> usize {
        self.total_eyes
    }

    /// 诊断为 `d` 的眼的个数.
    #[inline]
    pub fn diagnosis_count(&self, d: DiagnosisStatus) -> usize {
        self.diagnosis[d as usize]
    }

    /// 性别为 `g` 的患者个数.
    #[inline]
    pub fn gender_count(&self, g: Gender) -> usize {
        self.gender[g as usize]
    }

    /// 晶状体状态为 `c` 的眼的个数. 未记录晶状体状态的眼不计入.
    #[inline]
    pub fn crystalline_count(&self, c: CrystallineStatus) -> usize {
        self.crystalline[c as usize]
    }

    /// CDR 风险等级为 `r` 的眼的个数.
    #[inline]
    pub fn risk_count(&self, r: RiskLevel) -> usize {
        self.risk[r as usize]
    }

    /// 患者层面的诊断分布.
    #[inline]
    pub fn patient_diagnosis(&self) -> &PatientDiagnosisDistribution {
        &self.patient_diagnosis
    }

    /// 年龄 (按患者).
    #[inline]
    pub fn age(&self) -> FieldSummary {
        self.age.summary()
    }

    /// 非接触眼压 (按眼).
    #[inline]
    pub fn pneumatic_iop(&self) -> FieldSummary {
        self.pneumatic_iop.summary()
    }

    /// Perkins 眼压 (按眼).
    #[inline]
    pub fn perkins_iop(&self) -> FieldSummary {
        self.perkins_iop.summary()
    }

    /// 角膜厚度 (按眼).
    #[inline]
    pub fn pachymetry(&self) -> FieldSummary {
        self.pachymetry.summary()
    }

    /// 眼轴长度 (按眼).
    #[inline]
    pub fn axial_length(&self) -> FieldSummary {
        self.axial_length.summary()
    }

    /// 视野平均缺损 (按眼).
    #[inline]
    pub fn mean_defect(&self) -> FieldSummary {
        self.mean_defect.summary()
    }

    /// 面积比 CDR (按有可计算分割的眼).
    #[inline]
    pub fn cdr(&self) -> FieldSummary {
        self.cdr.summary()
    }

    /// 有分割结果但 CDR 无法计算 (几何非法或退化) 的眼的个数.
    #[inline]
    pub fn cdr_skipped(&self) -> usize {
        self.cdr_skipped
    }

    /// 风险分级使用的阈值.
    #[inline]
    pub fn thresholds(&self) -> &CdrThresholds {
        &self.thresholds
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new(CdrThresholds::clinical())
    }
}
