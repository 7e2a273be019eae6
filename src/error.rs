//! 错误类型：builder 的粘性错误与渲染阶段检查共用同一套哨兵。

use crate::valuer::ValuerError;

/// builder 错误。
///
/// 每个变体都是一个“哨兵”，调用方通常只需要 `==` 比较即可。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("builder table name can not be empty")]
    TabName,
    #[error("builder value does not have a supported type")]
    ValueType,
    #[error("builder injection detected")]
    Injection,
    #[error("builder no update data found")]
    NoUpdate,
    #[error("builder failed to meet the condition")]
    Condition,
    #[error("builder failed to meet the set")]
    Set,
    #[error("builder offset and limit must be used together")]
    NoLimit,
    #[error("builder no insert column found")]
    InsertColumn,
    #[error("builder no insert data found")]
    InsertValue,
    #[error("builder more than one auto-increment column is tagged")]
    DuplicateAuto,
    #[error("{0}")]
    Valuer(#[from] ValuerError),
}
