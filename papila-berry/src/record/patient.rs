//! 患者.

use crate::record::{DiagnosisStatus, Eye, EyeData, Gender, RecordError, RecordResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 患者层面的综合诊断.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PatientDiagnosis {
    /// 没有任何眼别数据.
    NoData,

    /// 所有已知眼别均健康.
    Healthy,

    /// 没有青光眼, 但至少一只眼可疑.
    Suspect,

    /// 至少一只眼为青光眼.
    Glaucoma,
}

/// 一位患者: 人口学信息和至多两只眼的数据 (每个眼别至多一份).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Patient {
    patient_id: String,
    age: u32,
    gender: Gender,
    /// 以 `Eye as usize` 索引.
    eyes: [Option<EyeData>; 2],
}

impl Patient {
    /// 以人口学信息初始化, 不含任何眼别数据.
    pub fn new<S: Into<String>>(patient_id: S, age: u32, gender: Gender) -> Self {
        Self {
            patient_id: patient_id.into(),
            age,
            gender,
            eyes: [None, None],
        }
    }

    /// 患者编号.
    #[inline]
    pub fn patient_id(&self) -> &str {
        self.patient_id.as_str()
    }

    /// 年龄.
    #[inline]
    pub fn age(&self) -> u32 {
        self.age
    }

    /// 性别.
    #[inline]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// 设置一只眼的数据. 眼别由 `eye_data.eye()` 决定.
    ///
    /// 若该眼别已有数据, 返回 `Err(RecordError::DuplicateEyeAssignment)`,
    /// 原有数据保持不变.
    pub fn set_eye_data(&mut self, eye_data: EyeData) -> RecordResult<()> {
        let slot = &mut self.eyes[eye_data.eye() as usize];
        if slot.is_some() {
            return Err(RecordError::DuplicateEyeAssignment(eye_data.eye()));
        }
        *slot = Some(eye_data);
        Ok(())
    }

    /// 消费自我, 设置一只眼的数据. 规则与 [`Patient::set_eye_data`] 相同.
    #[inline]
    pub fn with_eye_data(mut self, eye_data: EyeData) -> RecordResult<Self> {
        self.set_eye_data(eye_data)?;
        Ok(self)
    }

    /// 显式地覆盖一只眼的数据, 返回原有的数据.
    #[inline]
    pub fn replace_eye_data(&mut self, eye_data: EyeData) -> Option<EyeData> {
        self.eyes[eye_data.eye() as usize].replace(eye_data)
    }

    /// 移除一只眼的数据.
    #[inline]
    pub fn remove_eye_data(&mut self, eye: Eye) -> Option<EyeData> {
        self.eyes[eye as usize].take()
    }

    /// 获取一只眼的数据.
    #[inline]
    pub fn eye(&self, eye: Eye) -> Option<&EyeData> {
        self.eyes[eye as usize].as_ref()
    }

    /// 获取一只眼的可变数据 (例如稍后附加分割结果).
    #[inline]
    pub fn eye_mut(&mut self, eye: Eye) -> Option<&mut EyeData> {
        self.eyes[eye as usize].as_mut()
    }

    /// 右眼数据.
    #[inline]
    pub fn right_eye(&self) -> Option<&EyeData> {
        self.eye(Eye::Right)
    }

    /// 左眼数据.
    #[inline]
    pub fn left_eye(&self) -> Option<&EyeData> {
        self.eye(Eye::Left)
    }

    /// 按右眼、左眼的顺序迭代已有的眼别数据.
    #[inline]
    pub fn eyes(&self) -> impl Iterator<Item = &EyeData> + '_ {
        self.eyes.iter().flatten()
    }

    /// 已有眼别数据的个数 (0 ~ 2).
    #[inline]
    pub fn eye_count(&self) -> usize {
        self.eyes().count()
    }

    /// 任意一只眼的诊断为 `diagnosis`?
    #[inline]
    pub fn has_diagnosis(&self, diagnosis: DiagnosisStatus) -> bool {
        self.eyes().any(|e| e.diagnosis() == diagnosis)
    }

    /// 患者层面的综合诊断. 青光眼优先于可疑, 可疑优先于健康.
    pub fn diagnosis(&self) -> PatientDiagnosis {
        if self.eye_count() == 0 {
            PatientDiagnosis::NoData
        } else if self.has_diagnosis(DiagnosisStatus::Glaucoma) {
            PatientDiagnosis::Glaucoma
        } else if self.has_diagnosis(DiagnosisStatus::Suspect) {
            PatientDiagnosis::Suspect
        } else {
            PatientDiagnosis::Healthy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Measurements;

    #[test]
    fn test_patient_duplicate_eye() {
        let mut p = Patient::new("P001", 65, Gender::Male);
        let md = Measurements {
            mean_defect: Some(-8.5),
            ..Default::default()
        };
        p.set_eye_data(EyeData::new(Eye::Right, DiagnosisStatus::Glaucoma).with_measurements(md))
            .unwrap();

        let err = p
            .set_eye_data(EyeData::new(Eye::Right, DiagnosisStatus::Healthy))
            .unwrap_err();
        assert_eq!(err, RecordError::DuplicateEyeAssignment(Eye::Right));

        // 原有数据不变.
        let right = p.right_eye().unwrap();
        assert_eq!(right.diagnosis(), DiagnosisStatus::Glaucoma);
        assert_eq!(right.measurements().mean_defect, Some(-8.5));
        assert_eq!(p.eye_count(), 1);
        assert!(p.left_eye().is_none());
    }

    #[test]
    fn test_patient_replace_and_remove() {
        let mut p = Patient::new("P002", 40, Gender::Female)
            .with_eye_data(EyeData::new(Eye::Left, DiagnosisStatus::Suspect))
            .unwrap();
        let old = p.replace_eye_data(EyeData::new(Eye::Left, DiagnosisStatus::Healthy));
        assert_eq!(old.unwrap().diagnosis(), DiagnosisStatus::Suspect);
        assert_eq!(p.left_eye().unwrap().diagnosis(), DiagnosisStatus::Healthy);

        assert!(p.remove_eye_data(Eye::Left).is_some());
        assert!(p.remove_eye_data(Eye::Left).is_none());
        assert_eq!(p.eye_count(), 0);
    }

    #[test]
    fn test_patient_diagnosis() {
        let mut p = Patient::new("P003", 70, Gender::Male);
        assert_eq!(p.diagnosis(), PatientDiagnosis::NoData);

        p.set_eye_data(EyeData::new(Eye::Right, DiagnosisStatus::Healthy))
            .unwrap();
        assert_eq!(p.diagnosis(), PatientDiagnosis::Healthy);

        p.set_eye_data(EyeData::new(Eye::Left, DiagnosisStatus::Suspect))
            .unwrap();
        assert_eq!(p.diagnosis(), PatientDiagnosis::Suspect);

        p.replace_eye_data(EyeData::new(Eye::Right, DiagnosisStatus::Glaucoma));
        assert_eq!(p.diagnosis(), PatientDiagnosis::Glaucoma);

        let order: Vec<Eye> = p.eyes().map(EyeData::eye).collect();
        assert_eq!(order, vec![Eye::Right, Eye::Left]);
    }
}
