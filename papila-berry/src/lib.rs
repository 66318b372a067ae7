#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 提供 PAPILA 眼底数据集的患者/眼别临床记录的结构化表示,
//! 视盘 (optic disc) 与视杯 (optic cup) 分割轮廓的几何分析, 以及数据集范围内的筛选与描述统计.
//!
//! 该 crate 只提供 `safe` 接口, 且不做任何图像像素层面的处理.
//!
//! # 注意
//!
//! 1. 记录的构建 (读取 CSV、加载眼底图像等) 由外部完成.
//!   本 crate 只接收已经构建好的 [`Patient`] / [`EyeData`] / [`Segmentation`].
//! 2. 所有可检测的错误都以 `Result::Err` 返回给直接调用者, 不会在内部被吞掉.
//! 3. 查询是同步、单线程的. 数据集在装载完成后视为只读; 如需并发读取,
//!   由调用方保证期间没有写操作 (`rayon` feature 下的并行查询同样如此).
//!
//! # 开发计划
//!
//! ### 多边形几何基础 ✅
//!
//! 面积 (shoelace 公式)、质心、直径、周长、凸包、点在凸包内判断.
//!
//! 实现位于 `papila-berry/src/geometry`.
//!
//! ### 杯盘比 (CDR) 及相关指标 ✅
//!
//! 1. 面积比 CDR (默认), 直径比 CDR, 垂直径比 CDR. ✅
//! 2. 基于可调阈值的 CDR 风险分级. ✅
//! 3. 视杯是否落在视盘凸包内的数据质量检查. ✅
//! 4. 盘沿面积占比. ✅
//!
//! 实现位于 `papila-berry/src/segmentation`.
//!
//! ### 临床记录 ✅
//!
//! 患者、眼别、诊断、晶状体状态、屈光不正. 基于平均缺损 (MD) 的青光眼分期.
//!
//! 实现位于 `papila-berry/src/record`.
//!
//! ### 数据集筛选与统计 ✅
//!
//! 1. 可组合的谓词构建器 (年龄、性别、诊断、CDR 区间、风险等级). ✅
//! 2. 单次遍历的描述统计 (计数、均值、总体标准差、最值). ✅
//! 3. 并行只读查询 (`rayon` feature). ✅
//!
//! 实现位于 `papila-berry/src/dataset`.

pub mod consts;

pub mod geometry;

pub mod segmentation;

pub mod record;

pub mod dataset;

pub mod prelude;

pub use geometry::{GeometryError, GeometryResult, Point, Polygon};
pub use record::{
    CrystallineStatus, DiagnosisStatus, Eye, EyeData, Gender, GlaucomaSeverity, Measurements,
    Patient, PatientDiagnosis, RecordError, RefractiveError,
};
pub use segmentation::{CdrMethod, CdrThresholds, RiskLevel, Segmentation, SegmentationReport};

pub use dataset::{DatasetError, FieldSummary, PapilaDataset, PatientFilter, Statistics};
