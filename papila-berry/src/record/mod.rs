//! 临床记录模型.
//!
//! 所有权严格呈树状: 患者 -> 眼别数据 -> 分割/屈光不正. 没有共享所有权, 也没有环.

mod error;
mod eye;
mod kinds;
mod patient;
mod refraction;

pub use error::RecordError;
pub use eye::{EyeData, GlaucomaSeverity, Measurements};
pub use kinds::{CrystallineStatus, DiagnosisStatus, Eye, Gender};
pub use patient::{Patient, PatientDiagnosis};
pub use refraction::RefractiveError;

/// 记录操作结果.
pub type RecordResult<T> = Result<T, RecordError>;
