//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::geometry::{
    polygon_area, polygon_centroid, polygon_diameter, polygon_perimeter, polygon_signed_area,
    ConvexHull, GeometryError, Point, Polygon,
};

pub use crate::segmentation::{
    analyze, classify_cdr_risk, compute_cdr, compute_cdr_with, is_cup_within_disc,
    rim_to_disc_ratio, CdrMethod, CdrThresholds, RiskLevel, Segmentation, SegmentationReport,
};

pub use crate::record::{
    CrystallineStatus, DiagnosisStatus, Eye, EyeData, Gender, GlaucomaSeverity, Measurements,
    Patient, PatientDiagnosis, RecordError, RefractiveError,
};

pub use crate::dataset::{
    dataset_dir_from_env_or_home, DatasetError, FieldSummary, PapilaDataset, PatientFilter,
    Statistics,
};

pub use crate::consts::cdr::{CDR_HIGH_THRESHOLD, CDR_MODERATE_THRESHOLD};
