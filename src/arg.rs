//! Arg：builder 方法接收的动态参数。

use crate::value::SqlValue;
use crate::valuer::SqlValuer;
use std::borrow::Cow;

/// 动态参数：单个值、延迟计算的 valuer，或 IN/NOT IN 使用的值列表。
#[derive(Clone)]
pub enum Arg {
    Value(SqlValue),
    Valuer(Box<dyn SqlValuer>),
    List(Vec<Arg>),
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(_) => f.write_str("Valuer(..)"),
            Self::List(args) => f.debug_tuple("List").field(args).finish(),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

/// 把任意可转为 `SqlValue` 的序列包装成列表参数。
pub fn list<T: Into<SqlValue>>(values: impl IntoIterator<Item = T>) -> Arg {
    Arg::List(
        values
            .into_iter()
            .map(|v| Arg::Value(v.into()))
            .collect(),
    )
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

impl From<Box<dyn SqlValuer>> for Arg {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}

macro_rules! arg_from_scalar {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                SqlValue::from(v).into()
            }
        })+
    };
}

arg_from_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    &'static str,
    Cow<'static, str>,
);

impl<T> From<Option<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        SqlValue::from_option(v).into()
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for Arg {
    fn from(v: Vec<T>) -> Self {
        list(v)
    }
}

impl<T: Into<SqlValue>, const N: usize> From<[T; N]> for Arg {
    fn from(v: [T; N]) -> Self {
        list(v)
    }
}

impl<T: Into<SqlValue> + Clone> From<&[T]> for Arg {
    fn from(v: &[T]) -> Self {
        list(v.iter().cloned())
    }
}
