//! 数据集操作错误.

use std::path::PathBuf;
use thiserror::Error;

/// 修改 [`PapilaDataset`](crate::PapilaDataset) 时的错误.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// 患者编号已经存在. 数据集保持不变.
    #[error("患者 `{0}` 已经存在")]
    DuplicatePatient(String),

    /// 给定的路径不是一个已存在的目录.
    #[error("目录 {0:?} 不存在")]
    NotADirectory(PathBuf),
}
