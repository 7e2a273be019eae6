//! BuildCore：累积子句片段的可变 builder。
//!
//! 所有修改方法共享同一套“粘性错误”协议：
//! 1. 已经有错误时直接返回，不做任何校验和修改；
//! 2. 校验前置条件：硬错误写入 `err`，软缺失（可省略的空值）只打日志；
//! 3. 交给序列化器，序列化错误同样写入 `err`；
//! 4. 成功后追加/合并到对应集合。
//!
//! `err` 只会被写入一次（先到先得），所以一长串调用可以无条件写下去，最后统一检查。

use crate::arg::Arg;
use crate::error::BuildError;
use crate::injection::check_injection;
use crate::macros::ColumnNames;
use crate::rule::Rule;
use crate::serialize::{list_literals, literal};
use crate::structs::{ColumnTag, SqlRow};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, OnceLock};

/// 子句片段 builder。
///
/// 子句方法需要 `&mut self`，只支持单线程顺序调用；
/// 只有 insert 行的追加（`build_row*`）可以通过 `&self` 在多个线程里并发执行。
#[derive(Debug, Default)]
pub struct BuildCore {
    pub(crate) table_name: String,
    pub(crate) column_values: Vec<String>,
    pub(crate) where_values: Vec<String>,
    pub(crate) set_values: Vec<String>,
    pub(crate) order_values: Vec<String>,
    pub(crate) group_by_values: Vec<String>,
    pub(crate) like_values: Vec<String>,
    pub(crate) in_map: BTreeMap<String, Vec<String>>,
    pub(crate) not_in_map: BTreeMap<String, Vec<String>>,
    pub(crate) limit_value: Option<u64>,
    pub(crate) offset_value: Option<u64>,
    pub(crate) insert: InsertState,
    pub(crate) rows: Mutex<Vec<String>>,
    pub(crate) err: OnceLock<BuildError>,
}

/// insert 相关的列映射状态。
#[derive(Debug, Default, Clone)]
pub(crate) struct InsertState {
    pub(crate) options: HashSet<String>,
    pub(crate) no_options: HashSet<String>,
    pub(crate) columns: Vec<String>,
    /// 与 `columns` 平行：每列对应的字段下标
    pub(crate) tags: Vec<usize>,
    pub(crate) auto: Option<usize>,
    pub(crate) or_update: bool,
}

impl InsertState {
    fn accepts(&self, column: &str) -> bool {
        (self.options.is_empty() || self.options.contains(column))
            && !self.no_options.contains(column)
    }
}

/// 比较类子句（where/set）遇到空值时的处理方式。
#[derive(Debug, Clone)]
enum OnEmpty {
    Skip,
    Fail(BuildError),
}

impl BuildCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入粘性错误；已有错误时保持不变。
    pub(crate) fn fail(&self, err: BuildError) {
        let _ = self.err.set(err);
    }

    pub fn is_failed(&self) -> bool {
        self.err.get().is_some()
    }

    /// 第一个被记录的错误。
    pub fn error(&self) -> Option<&BuildError> {
        self.err.get()
    }

    pub fn set_table_name(&mut self, name: &str) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        if check_injection(name) {
            self.fail(BuildError::Injection);
            return self;
        }
        if name.is_empty() {
            tracing::warn!("table name can not be empty");
            self.fail(BuildError::TabName);
            return self;
        }
        self.table_name = name.to_string();
        self
    }

    pub fn column(&mut self, column: &str) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        if check_injection(column) {
            self.fail(BuildError::Injection);
            return self;
        }
        if column.is_empty() {
            tracing::debug!("column is empty; skipped");
            return self;
        }
        self.column_values.push(column.to_string());
        self
    }

    /// WHERE 条件；值为空（等于 `rule` 的哨兵）时静默跳过。
    pub fn where_(&mut self, key: &str, value: impl Into<Arg>, rule: &Rule) -> &mut Self {
        if let Some(fragment) = self.compare_fragment(key, &value.into(), rule, OnEmpty::Skip) {
            self.where_values.push(fragment);
        }
        self
    }

    /// 严格 WHERE 条件；值为空时记录 `BuildError::Condition`。
    pub fn where_strict(&mut self, key: &str, value: impl Into<Arg>, rule: &Rule) -> &mut Self {
        let on_empty = OnEmpty::Fail(BuildError::Condition);
        if let Some(fragment) = self.compare_fragment(key, &value.into(), rule, on_empty) {
            self.where_values.push(fragment);
        }
        self
    }

    /// SET 赋值；值为空时静默跳过。
    pub fn set(&mut self, key: &str, value: impl Into<Arg>, rule: &Rule) -> &mut Self {
        if let Some(fragment) = self.compare_fragment(key, &value.into(), rule, OnEmpty::Skip) {
            self.set_values.push(fragment);
        }
        self
    }

    /// 严格 SET 赋值；值为空时记录 `BuildError::Set`。
    pub fn set_strict(&mut self, key: &str, value: impl Into<Arg>, rule: &Rule) -> &mut Self {
        let on_empty = OnEmpty::Fail(BuildError::Set);
        if let Some(fragment) = self.compare_fragment(key, &value.into(), rule, on_empty) {
            self.set_values.push(fragment);
        }
        self
    }

    fn compare_fragment(
        &self,
        key: &str,
        value: &Arg,
        rule: &Rule,
        on_empty: OnEmpty,
    ) -> Option<String> {
        if self.is_failed() {
            return None;
        }
        if key.is_empty() {
            tracing::debug!("comparison key is empty; skipped");
            return None;
        }
        let lit = match literal(value, rule) {
            Ok(lit) => lit,
            Err(e) => {
                self.fail(e);
                return None;
            }
        };
        if rule.is_empty_literal(&lit) {
            match on_empty {
                OnEmpty::Skip => tracing::debug!(key, "empty value; skipped"),
                OnEmpty::Fail(e) => self.fail(e),
            }
            return None;
        }

        // 已带关系运算符的 key 原样使用
        if key.contains(['>', '=', '<']) {
            Some(format!("{key}{lit}"))
        } else {
            Some(format!("{key} = {lit}"))
        }
    }

    /// IN 成员列表；同一 key 的后一次调用覆盖前一次，空列表不存储。
    pub fn in_(&mut self, key: &str, values: impl Into<Arg>) -> &mut Self {
        if let Some(list) = self.membership(key, &values.into()) {
            self.in_map.insert(key.to_string(), list);
        }
        self
    }

    /// NOT IN 成员列表。
    pub fn not_in(&mut self, key: &str, values: impl Into<Arg>) -> &mut Self {
        if let Some(list) = self.membership(key, &values.into()) {
            self.not_in_map.insert(key.to_string(), list);
        }
        self
    }

    fn membership(&self, key: &str, values: &Arg) -> Option<Vec<String>> {
        if self.is_failed() {
            return None;
        }
        if key.is_empty() {
            tracing::debug!("membership key is empty; skipped");
            return None;
        }
        match list_literals(values) {
            Ok(list) if list.is_empty() => {
                tracing::debug!(key, "membership list is empty; skipped");
                None
            }
            Ok(list) => Some(list),
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    /// LIKE 条件：模式已含 `%` 时原样使用，否则包成 `%pattern%`。
    pub fn like(&mut self, key: &str, pattern: &str) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        if key.is_empty() {
            tracing::debug!("like key is empty; skipped");
            return self;
        }
        if pattern.chars().all(|c| c == '%') {
            tracing::debug!(key, "like pattern is empty; skipped");
            return self;
        }
        if check_injection(pattern) {
            self.fail(BuildError::Injection);
            return self;
        }
        let fragment = if pattern.contains('%') {
            format!("{key} like '{pattern}'")
        } else {
            format!("{key} like '%{pattern}%'")
        };
        self.like_values.push(fragment);
        self
    }

    pub fn order_by(&mut self, expr: &str) -> &mut Self {
        if let Some(expr) = self.checked_expr(expr, "order by") {
            self.order_values.push(expr);
        }
        self
    }

    pub fn group_by(&mut self, expr: &str) -> &mut Self {
        if let Some(expr) = self.checked_expr(expr, "group by") {
            self.group_by_values.push(expr);
        }
        self
    }

    fn checked_expr(&self, expr: &str, clause: &'static str) -> Option<String> {
        if self.is_failed() {
            return None;
        }
        if expr.is_empty() {
            tracing::debug!(clause, "expression is empty; skipped");
            return None;
        }
        if check_injection(expr) {
            self.fail(BuildError::Injection);
            return None;
        }
        Some(expr.to_string())
    }

    /// LIMIT；只接受正数，其他值忽略。
    pub fn limit(&mut self, limit: i64) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        match positive(limit) {
            Some(v) => self.limit_value = Some(v),
            None => tracing::warn!(limit, "limit can not be less than 1; ignored"),
        }
        self
    }

    /// OFFSET；只接受正数，其他值忽略。
    pub fn offset(&mut self, offset: i64) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        match positive(offset) {
            Some(v) => self.offset_value = Some(v),
            None => tracing::warn!(offset, "offset can not be less than 1; ignored"),
        }
        self
    }

    /// insert 列的包含过滤；为空时不过滤。需在 `map_columns` 之前设置。
    pub fn set_options(&mut self, columns: impl ColumnNames) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        self.insert.options = columns.into_names().into_iter().collect();
        self
    }

    /// insert 列的排除过滤。需在 `map_columns` 之前设置。
    pub fn set_no_options(&mut self, columns: impl ColumnNames) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        self.insert.no_options = columns.into_names().into_iter().collect();
        self
    }

    /// 标记 insert 为 “insert ... on duplicate key update”。
    pub fn set_or_update(&mut self, or_update: bool) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        self.insert.or_update = or_update;
        self
    }

    /// 按 `tag_key` 从 `T` 的字段表解析 insert 列。
    ///
    /// - 没有该 tag（或 tag 为空）的字段跳过；
    /// - tag 形如 `column[;auto]`，`auto` 标记自增列；
    /// - 列名需通过包含/排除过滤；
    /// - 出现第二个自增列时记录 `BuildError::DuplicateAuto`。
    ///
    /// 只应调用一次：重复调用会追加重复的列。
    pub fn map_columns<T: SqlRow>(&mut self, tag_key: &str) -> &mut Self {
        if self.is_failed() {
            return self;
        }
        for (index, field) in T::FIELDS.iter().enumerate() {
            let Some(tag) = field.tag(tag_key).and_then(ColumnTag::parse) else {
                continue;
            };
            if !self.insert.accepts(tag.column) {
                continue;
            }
            if tag.auto && self.insert.auto.is_some() {
                self.fail(BuildError::DuplicateAuto);
                return self;
            }
            self.insert.columns.push(tag.column.to_string());
            self.insert.tags.push(index);
            if tag.auto {
                self.insert.auto = Some(self.insert.columns.len() - 1);
            }
        }
        self
    }

    /// 使用全局默认 tag key（见 `config::default_tag_key`）映射列。
    pub fn map_default_columns<T: SqlRow>(&mut self) -> &mut Self {
        let key = crate::config::default_tag_key();
        self.map_columns::<T>(&key)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[String] {
        &self.column_values
    }

    pub fn wheres(&self) -> &[String] {
        &self.where_values
    }

    pub fn sets(&self) -> &[String] {
        &self.set_values
    }

    pub fn orders(&self) -> &[String] {
        &self.order_values
    }

    pub fn group_bys(&self) -> &[String] {
        &self.group_by_values
    }

    pub fn likes(&self) -> &[String] {
        &self.like_values
    }

    pub fn in_values(&self, key: &str) -> Option<&[String]> {
        self.in_map.get(key).map(Vec::as_slice)
    }

    pub fn not_in_values(&self, key: &str) -> Option<&[String]> {
        self.not_in_map.get(key).map(Vec::as_slice)
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.limit_value
    }

    pub fn offset_value(&self) -> Option<u64> {
        self.offset_value
    }

    pub fn insert_columns(&self) -> &[String] {
        &self.insert.columns
    }

    pub fn insert_tags(&self) -> &[usize] {
        &self.insert.tags
    }

    pub fn insert_auto(&self) -> Option<usize> {
        self.insert.auto
    }

    pub fn is_or_update(&self) -> bool {
        self.insert.or_update
    }

    /// 当前已追加的 insert 行（快照）。
    pub fn insert_rows(&self) -> Vec<String> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

fn positive(n: i64) -> Option<u64> {
    u64::try_from(n).ok().filter(|v| *v > 0)
}
