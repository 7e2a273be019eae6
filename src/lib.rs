//! halo-fragment：累积 SQL 子句片段的 builder 核心。
//!
//! 负责三件事：把动态标量序列化为 SQL 字面量、以“粘性错误”串起任意长的调用链、
//! 以及把 struct 实例并发地映射成 insert 行。最终的 SQL 拼接由上层渲染完成。

pub mod arg;
pub mod build_core;
pub mod config;
pub mod error;
pub mod fragments;
pub mod injection;
pub mod macros;
pub use crate::macros::*;
pub mod rows;
#[cfg(test)]
mod rows_tests;
pub mod rule;
pub mod serialize;
#[cfg(test)]
mod serialize_tests;
pub mod structs;
pub mod value;
pub mod valuer;

pub use crate::arg::{Arg, list};
pub use crate::config::{
    DEFAULT_TAG_KEY, default_tag_key, set_default_tag_key, set_default_tag_key_scoped,
};
pub use crate::build_core::BuildCore;
pub use crate::error::BuildError;
pub use crate::fragments::Fragments;
pub use crate::injection::check_injection;
pub use crate::rule::Rule;
pub use crate::serialize::{list_literals, literal, row_literal};
pub use crate::structs::{ColumnTag, FieldMeta, SqlRow};
pub use crate::value::{Kind, SqlValue};
pub use crate::valuer::{SqlValuer, ValuerError};
