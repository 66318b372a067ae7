//! 数据集操作.
//!
//! [`PapilaDataset`] 持有全部患者, 提供筛选与描述统计查询. 查询从不修改已存储的记录.

use crate::consts::PAPILA_DIR_ENV;
use crate::segmentation::CdrThresholds;
use crate::Patient;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

mod error;
mod filter;
mod stats;

pub use error::DatasetError;
pub use filter::PatientFilter;
pub use stats::{FieldSummary, PatientDiagnosisDistribution, RunningStats, Statistics};

/// 数据集操作结果.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 获取 PAPILA 数据集根目录.
///
/// 1. 若环境变量 `$PAPILA_DIR` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/papila`;
/// 3. 无法确定用户主目录时返回 `None`.
pub fn dataset_dir_from_env_or_home() -> Option<PathBuf> {
    match env::var(PAPILA_DIR_ENV) {
        Ok(d) if !d.is_empty() => Some(PathBuf::from(d)),
        _ => home_dataset_dir_with(["papila"]),
    }
}

/// PAPILA 数据集: 以患者编号为键的患者集合.
///
/// 迭代、筛选结果均按插入顺序排列. 患者编号在数据集中唯一.
///
/// # 并发
///
/// 该结构不提供内部锁. 数据集一般在装载阶段单线程写入, 之后只读;
/// 并发读取 (`&self` 查询) 是安全的, 写入期间的并发读取由调用方负责同步.
#[derive(Clone, Debug, Default)]
pub struct PapilaDataset {
    /// 插入顺序.
    patients: Vec<Patient>,

    /// `patient_id` -> `patients` 中的下标.
    index: HashMap<String, usize>,

    /// 外部加载器找到数据集的目录. 本 crate 从不读取其内容.
    base_dir: Option<PathBuf>,
}

impl PapilaDataset {
    /// 创建空数据集.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加患者.
    ///
    /// 若编号已存在, 返回 `Err(DatasetError::DuplicatePatient)`, 数据集保持不变.
    pub fn add_patient(&mut self, patient: Patient) -> DatasetResult<()> {
        if self.index.contains_key(patient.patient_id()) {
            return Err(DatasetError::DuplicatePatient(
                patient.patient_id().to_owned(),
            ));
        }
        log::debug!(
            "add patient `{}` ({} eye(s))",
            patient.patient_id(),
            patient.eye_count()
        );
        self.index
            .insert(patient.patient_id().to_owned(), self.patients.len());
        self.patients.push(patient);
        Ok(())
    }

    /// 通过编号获取患者.
    #[inline]
    pub fn get_patient(&self, patient_id: &str) -> Option<&Patient> {
        self.index.get(patient_id).map(|&i| &self.patients[i])
    }

    /// 通过编号获取可变患者 (例如稍后附加分割结果). 编号不可修改.
    #[inline]
    pub fn get_patient_mut(&mut self, patient_id: &str) -> Option<&mut Patient> {
        self.index.get(patient_id).map(|&i| &mut self.patients[i])
    }

    /// 数据集是否包含编号为 `patient_id` 的患者?
    #[inline]
    pub fn contains(&self, patient_id: &str) -> bool {
        self.index.contains_key(patient_id)
    }

    /// 移除患者, 并将其 (连同其眼别数据) 的所有权交还调用者.
    ///
    /// 剩余患者的相对顺序不变. 复杂度 `O(n)`.
    pub fn remove_patient(&mut self, patient_id: &str) -> Option<Patient> {
        let pos = self.index.remove(patient_id)?;
        let patient = self.patients.remove(pos);
        for i in self.index.values_mut().filter(|i| **i > pos) {
            *i -= 1;
        }
        log::debug!("remove patient `{patient_id}`");
        Some(patient)
    }

    /// 患者个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// 数据集是否为空?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// 按插入顺序迭代所有患者.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Patient> {
        self.patients.iter()
    }

    /// 按插入顺序返回所有满足 `predicate` 的患者.
    pub fn filter<F: Fn(&Patient) -> bool>(&self, predicate: F) -> Vec<&Patient> {
        self.patients.iter().filter(|&p| predicate(p)).collect()
    }

    /// 按插入顺序返回所有满足 `filter` 的患者.
    #[inline]
    pub fn select(&self, filter: &PatientFilter<'_>) -> Vec<&Patient> {
        self.filter(|p| filter.matches(p))
    }

    /// 对全部患者单次遍历, 计算描述统计. CDR 风险以临床惯用阈值分级.
    #[inline]
    pub fn get_statistics(&self) -> Statistics {
        self.get_statistics_with(CdrThresholds::clinical())
    }

    /// 对全部患者单次遍历, 计算描述统计. CDR 风险以 `thresholds` 分级.
    pub fn get_statistics_with(&self, thresholds: CdrThresholds) -> Statistics {
        let mut stats = Statistics::new(thresholds);
        for patient in self.patients.iter() {
            stats.update(patient);
        }
        stats
    }

    /// 记录数据集所在目录.
    ///
    /// 若 `dir` 不是已存在的目录, 返回 `Err(DatasetError::NotADirectory)`, 原有记录保持不变.
    pub fn set_base_directory<P: AsRef<Path>>(&mut self, dir: P) -> DatasetResult<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(DatasetError::NotADirectory(dir.to_owned()));
        }
        self.base_dir = Some(dir.to_owned());
        Ok(())
    }

    /// 数据集所在目录.
    #[inline]
    pub fn base_directory(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::prelude::*;

        impl PapilaDataset {
            /// 借助 `rayon`, 并行地筛选患者. 结果仍按插入顺序排列.
            pub fn par_filter<F>(&self, predicate: F) -> Vec<&Patient>
            where
                F: Fn(&Patient) -> bool + Sync,
            {
                self.patients.par_iter().filter(|&p| predicate(p)).collect()
            }

            /// 借助 `rayon`, 并行地计算描述统计. CDR 风险以临床惯用阈值分级.
            ///
            /// 结果与 [`PapilaDataset::get_statistics`] 相同, 浮点数仅因求和顺序不同而可能有微小差异.
            #[inline]
            pub fn par_statistics(&self) -> Statistics {
                self.par_statistics_with(CdrThresholds::clinical())
            }

            /// 借助 `rayon`, 并行地计算描述统计. CDR 风险以 `thresholds` 分级.
            pub fn par_statistics_with(&self, thresholds: CdrThresholds) -> Statistics {
                self.patients
                    .par_iter()
                    .fold(
                        || Statistics::new(thresholds),
                        |mut acc, p| {
                            acc.update(p);
                            acc
                        },
                    )
                    .reduce(
                        || Statistics::new(thresholds),
                        |mut a, b| {
                            a.merge(&b);
                            a
                        },
                    )
            }
        }
    }
}

impl<'a> IntoIterator for &'a PapilaDataset {
    type Item = &'a Patient;
    type IntoIter = std::slice::Iter<'a, Patient>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiagnosisStatus, Eye, EyeData, Gender};

    fn patient(id: &str, age: u32, diagnosis: DiagnosisStatus) -> Patient {
        Patient::new(id, age, Gender::Female)
            .with_eye_data(EyeData::new(Eye::Right, diagnosis))
            .unwrap()
    }

    #[test]
    fn test_dataset_duplicate_patient() {
        let mut ds = PapilaDataset::new();
        ds.add_patient(patient("P001", 50, DiagnosisStatus::Healthy))
            .unwrap();
        let err = ds
            .add_patient(patient("P001", 80, DiagnosisStatus::Glaucoma))
            .unwrap_err();
        assert_eq!(err, DatasetError::DuplicatePatient("P001".to_string()));
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get_patient("P001").unwrap().age(), 50);
    }

    #[test]
    fn test_dataset_remove_keeps_order() {
        let mut ds = PapilaDataset::new();
        for (i, id) in ["a", "b", "c", "d"].into_iter().enumerate() {
            ds.add_patient(patient(id, 40 + i as u32, DiagnosisStatus::Healthy))
                .unwrap();
        }
        let removed = ds.remove_patient("b").unwrap();
        assert_eq!(removed.patient_id(), "b");
        assert!(ds.remove_patient("b").is_none());
        assert!(!ds.contains("b"));

        let ids: Vec<&str> = ds.iter().map(Patient::patient_id).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
        assert_eq!(ds.get_patient("d").unwrap().age(), 43);

        // 重新添加后排在最后.
        ds.add_patient(patient("b", 99, DiagnosisStatus::Suspect))
            .unwrap();
        let ids: Vec<&str> = (&ds).into_iter().map(Patient::patient_id).collect();
        assert_eq!(ids, vec!["a", "c", "d", "b"]);
        assert_eq!(ds.get_patient("b").unwrap().age(), 99);
    }

    #[test]
    fn test_dataset_get_patient_mut() {
        let mut ds = PapilaDataset::new();
        ds.add_patient(Patient::new("P9", 30, Gender::Male)).unwrap();
        assert!(ds.get_patient("nope").is_none());

        ds.get_patient_mut("P9")
            .unwrap()
            .set_eye_data(EyeData::new(Eye::Left, DiagnosisStatus::Suspect))
            .unwrap();
        assert_eq!(ds.get_patient("P9").unwrap().eye_count(), 1);
    }

    #[test]
    fn test_dataset_base_directory() {
        let mut ds = PapilaDataset::new();
        assert!(ds.base_directory().is_none());

        let tmp = env::temp_dir();
        ds.set_base_directory(&tmp).unwrap();
        assert_eq!(ds.base_directory(), Some(tmp.as_path()));

        let missing = tmp.join("papila-berry-surely-missing-dir");
        let err = ds.set_base_directory(&missing).unwrap_err();
        assert_eq!(err, DatasetError::NotADirectory(missing));
        assert_eq!(ds.base_directory(), Some(tmp.as_path()));
    }

    #[test]
    fn test_home_dataset_dir_with() {
        if let Some(d) = home_dataset_dir_with(["papila", "ClinicalData"]) {
            assert!(d.ends_with("dataset/papila/ClinicalData"));
        }
    }
}
