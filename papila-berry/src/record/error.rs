//! 记录操作错误.

use crate::record::Eye;
use thiserror::Error;

/// 修改 [`Patient`](crate::Patient) 时的错误.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// 该眼别已经有数据. 患者原有的数据保持不变.
    #[error("眼别 {0} 的数据已经存在")]
    DuplicateEyeAssignment(Eye),
}
