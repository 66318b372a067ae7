//! 可组合的患者筛选谓词.
//!
//! 这里只提供常用列上的谓词构建器, 以逻辑与组合. 不是通用查询语言.

use crate::segmentation::{CdrMethod, CdrThresholds, RiskLevel};
use crate::{DiagnosisStatus, Gender, Patient};
use std::fmt::Formatter;
use std::ops::RangeBounds;

type Predicate<'a> = Box<dyn Fn(&Patient) -> bool + Send + Sync + 'a>;

/// 一组以逻辑与组合的患者谓词. 空筛选器接受所有患者.
///
/// ```
/// use papila_berry::{DiagnosisStatus, PatientFilter};
///
/// let f = PatientFilter::new()
///     .diagnosis(DiagnosisStatus::Glaucoma)
///     .age_range(61..);
/// ```
#[derive(Default)]
pub struct PatientFilter<'a> {
    predicates: Vec<Predicate<'a>>,
}

impl<'a> PatientFilter<'a> {
    /// 创建空筛选器.
    #[inline]
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// 追加任意谓词.
    pub fn matching<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Patient) -> bool + Send + Sync + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// 年龄位于 `range` 内. 例如 `61..` 即 "年龄大于 60".
    #[inline]
    pub fn age_range<R>(self, range: R) -> Self
    where
        R: RangeBounds<u32> + Send + Sync + 'a,
    {
        self.matching(move |p| range.contains(&p.age()))
    }

    /// 性别为 `gender`.
    #[inline]
    pub fn gender(self, gender: Gender) -> Self {
        self.matching(move |p| p.gender() == gender)
    }

    /// 任意一只眼的诊断为 `diagnosis`.
    #[inline]
    pub fn diagnosis(self, diagnosis: DiagnosisStatus) -> Self {
        self.matching(move |p| p.has_diagnosis(diagnosis))
    }

    /// 任意一只眼的 (面积比) CDR 位于 `range` 内.
    ///
    /// 没有分割结果或分割几何非法的眼不参与比较.
    #[inline]
    pub fn cdr_range<R>(self, range: R) -> Self
    where
        R: RangeBounds<f64> + Send + Sync + 'a,
    {
        self.cdr_range_with(CdrMethod::Area, range)
    }

    /// 任意一只眼以 `method` 计算的 CDR 位于 `range` 内.
    pub fn cdr_range_with<R>(self, method: CdrMethod, range: R) -> Self
    where
        R: RangeBounds<f64> + Send + Sync + 'a,
    {
        self.matching(move |p| {
            p.eyes()
                .filter_map(|e| e.cdr_with(method)?.ok())
                .any(|cdr| range.contains(&cdr))
        })
    }

    /// 任意一只眼的 CDR 风险等级为 `risk` (以 `thresholds` 分级).
    pub fn risk(self, risk: RiskLevel, thresholds: CdrThresholds) -> Self {
        self.matching(move |p| {
            p.eyes()
                .filter_map(|e| e.cdr_risk(&thresholds)?.ok())
                .any(|r| r == risk)
        })
    }

    /// 与另一个筛选器以逻辑与组合.
    pub fn and(mut self, other: PatientFilter<'a>) -> Self {
        self.predicates.extend(other.predicates);
        self
    }

    /// 谓词个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// 是否没有任何谓词?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// `patient` 是否满足所有谓词?
    #[inline]
    pub fn matches(&self, patient: &Patient) -> bool {
        self.predicates.iter().all(|f| f(patient))
    }
}

impl std::fmt::Debug for PatientFilter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "PatientFilter {{ predicates: {} }}",
            self.predicates.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::PatientFilter;
    use crate::geometry::Polygon;
    use crate::segmentation::{CdrThresholds, RiskLevel, Segmentation};
    use crate::{DiagnosisStatus, Eye, EyeData, Gender, PapilaDataset, Patient};

    fn square(side: f64) -> Polygon {
        Polygon::from_xy([(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)])
    }

    /// 年龄 50/65/70, 诊断 健康/青光眼/青光眼.
    fn dataset() -> PapilaDataset {
        let mut ds = PapilaDataset::new();
        let rows = [
            ("P1", 50, Gender::Male, DiagnosisStatus::Healthy, 2.0),
            ("P2", 65, Gender::Female, DiagnosisStatus::Glaucoma, 5.0),
            ("P3", 70, Gender::Male, DiagnosisStatus::Glaucoma, 8.0),
        ];
        for (id, age, gender, diagnosis, cup) in rows {
            let eye = EyeData::new(Eye::Right, diagnosis)
                .with_segmentation(Segmentation::new(square(10.0), square(cup)));
            let p = Patient::new(id, age, gender).with_eye_data(eye).unwrap();
            ds.add_patient(p).unwrap();
        }
        ds
    }

    fn ids(v: Vec<&Patient>) -> Vec<&str> {
        v.into_iter().map(Patient::patient_id).collect()
    }

    #[test]
    fn test_filter_glaucoma_over_60() {
        let ds = dataset();
        let f = PatientFilter::new()
            .diagnosis(DiagnosisStatus::Glaucoma)
            .age_range(61..);
        assert_eq!(f.len(), 2);
        assert_eq!(ids(ds.select(&f)), vec!["P2", "P3"]);

        // 与任意谓词组合.
        let f = PatientFilter::new()
            .diagnosis(DiagnosisStatus::Glaucoma)
            .matching(|p| p.age() > 66);
        assert_eq!(ids(ds.select(&f)), vec!["P3"]);

        let older = |p: &Patient| p.age() > 60 && p.has_diagnosis(DiagnosisStatus::Glaucoma);
        assert_eq!(ids(ds.filter(older)), vec!["P2", "P3"]);
    }

    #[test]
    fn test_filter_empty_accepts_all() {
        let ds = dataset();
        let f = PatientFilter::new();
        assert!(f.is_empty());
        assert_eq!(ds.select(&f).len(), 3);
    }

    #[test]
    fn test_filter_gender_and_compose() {
        let ds = dataset();
        let males = PatientFilter::new().gender(Gender::Male);
        let young = PatientFilter::new().age_range(..=60);
        assert_eq!(ids(ds.select(&males.and(young))), vec!["P1"]);
    }

    #[test]
    fn test_filter_cdr_and_risk() {
        let ds = dataset();
        // CDR: 0.2, 0.5, 0.8.
        let f = PatientFilter::new().cdr_range(0.3..0.6);
        assert_eq!(ids(ds.select(&f)), vec!["P2"]);

        let f = PatientFilter::new().risk(RiskLevel::High, CdrThresholds::clinical());
        assert_eq!(ids(ds.select(&f)), vec!["P3"]);

        let f = PatientFilter::new().risk(RiskLevel::Low, CdrThresholds::clinical());
        assert_eq!(ids(ds.select(&f)), vec!["P1"]);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_filter_keeps_order() {
        let ds = dataset();
        let f = PatientFilter::new().age_range(60..);
        let got = ds.par_filter(|p| f.matches(p));
        assert_eq!(ids(got), vec!["P2", "P3"]);
    }
}
