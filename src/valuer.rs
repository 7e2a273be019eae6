//! SqlValuer：在序列化阶段才计算出实际值的钩子。
//!
//! 业务类型（如自定义 ID、枚举）实现该 trait 后即可直接作为 where/set/insert 的值，
//! 序列化时先调用 `value()`，再按返回的 `SqlValue` 生成字面量。

use crate::value::SqlValue;

/// Valuer 错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("builder sql valuer error: {0}")]
pub struct ValuerError(pub String);

/// 可在序列化阶段动态计算实际值的 trait。
///
/// 需要 `Send + Sync`：insert 行可能在多个线程里同时序列化。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug + Send + Sync {
    fn value(&self) -> Result<SqlValue, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);
