//! Fragments：`BuildCore` 被消费后交给渲染层的只读结果。

use crate::build_core::BuildCore;
use crate::error::BuildError;
use std::collections::BTreeMap;

/// 已累积的全部子句片段。字段顺序即调用顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    pub table_name: String,
    pub columns: Vec<String>,
    pub wheres: Vec<String>,
    pub sets: Vec<String>,
    pub orders: Vec<String>,
    pub group_bys: Vec<String>,
    pub likes: Vec<String>,
    pub in_map: BTreeMap<String, Vec<String>>,
    pub not_in_map: BTreeMap<String, Vec<String>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub insert_columns: Vec<String>,
    pub insert_auto: Option<usize>,
    pub insert_rows: Vec<String>,
    pub or_update: bool,
}

impl BuildCore {
    /// 消费 builder：有粘性错误时返回该错误；只设置了 offset 而没有 limit 时返回
    /// `BuildError::NoLimit`。
    pub fn finish(self) -> Result<Fragments, BuildError> {
        if let Some(err) = self.err.into_inner() {
            return Err(err);
        }
        if self.offset_value.is_some() && self.limit_value.is_none() {
            return Err(BuildError::NoLimit);
        }

        Ok(Fragments {
            table_name: self.table_name,
            columns: self.column_values,
            wheres: self.where_values,
            sets: self.set_values,
            orders: self.order_values,
            group_bys: self.group_by_values,
            likes: self.like_values,
            in_map: self.in_map,
            not_in_map: self.not_in_map,
            limit: self.limit_value,
            offset: self.offset_value,
            insert_columns: self.insert.columns,
            insert_auto: self.insert.auto,
            insert_rows: self.rows.into_inner().unwrap_or_else(|e| e.into_inner()),
            or_update: self.insert.or_update,
        })
    }
}

impl Fragments {
    /// UPDATE 渲染前的检查：至少要有一个赋值。
    pub fn require_update(&self) -> Result<(), BuildError> {
        if self.sets.is_empty() {
            return Err(BuildError::NoUpdate);
        }
        Ok(())
    }

    /// INSERT 渲染前的检查：至少要有一列和一行。
    pub fn require_insert(&self) -> Result<(), BuildError> {
        if self.insert_columns.is_empty() {
            return Err(BuildError::InsertColumn);
        }
        if self.insert_rows.is_empty() {
            return Err(BuildError::InsertValue);
        }
        Ok(())
    }
}
