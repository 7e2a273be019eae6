//! 动态标量值与“种类”描述。

use std::borrow::Cow;
use std::fmt;

/// 序列化器支持的封闭种类集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "string",
        };
        f.write_str(s)
    }
}

/// 动态标量值。
///
/// 每种宽度保留独立变体，调用方的“声明种类”由变体本身显式携带。
/// `Null`/`Bool`/`Bytes` 可以被表示，但不属于可序列化的种类。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 值的种类；不可序列化的值返回 None。
    pub fn kind(&self) -> Option<Kind> {
        let k = match self {
            Self::I8(_) => Kind::I8,
            Self::I16(_) => Kind::I16,
            Self::I32(_) => Kind::I32,
            Self::I64(_) => Kind::I64,
            Self::Isize(_) => Kind::Isize,
            Self::U8(_) => Kind::U8,
            Self::U16(_) => Kind::U16,
            Self::U32(_) => Kind::U32,
            Self::U64(_) => Kind::U64,
            Self::Usize(_) => Kind::Usize,
            Self::F32(_) => Kind::F32,
            Self::F64(_) => Kind::F64,
            Self::String(_) => Kind::Str,
            Self::Null | Self::Bool(_) | Self::Bytes(_) => return None,
        };
        Some(k)
    }

    /// 是否为所属种类的零值（数值 0、空字符串）。
    pub fn is_zero(&self) -> bool {
        match self {
            Self::I8(v) => *v == 0,
            Self::I16(v) => *v == 0,
            Self::I32(v) => *v == 0,
            Self::I64(v) => *v == 0,
            Self::Isize(v) => *v == 0,
            Self::U8(v) => *v == 0,
            Self::U16(v) => *v == 0,
            Self::U32(v) => *v == 0,
            Self::U64(v) => *v == 0,
            Self::Usize(v) => *v == 0,
            // 用 bits 判断，-0.0 不算零值
            Self::F32(v) => v.to_bits() == 0,
            Self::F64(v) => v.to_bits() == 0,
            Self::String(s) => s.is_empty(),
            Self::Null | Self::Bool(_) | Self::Bytes(_) => false,
        }
    }
}

macro_rules! scalar_from {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(impl From<$t> for SqlValue {
            fn from(v: $t) -> Self {
                Self::$variant(v)
            }
        })+
    };
}

scalar_from!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
);

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Cow<'static, str>> for SqlValue {
    fn from(v: Cow<'static, str>) -> Self {
        Self::String(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}
