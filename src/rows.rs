//! 批量 insert 行构造：一个 struct 实例序列化为一行值元组。
//!
//! 序列化在锁外进行，只有追加到共享行列表时才持有互斥锁，
//! 因此多个线程可以各自序列化自己的行，再安全地合并。

use crate::build_core::BuildCore;
use crate::error::BuildError;
use crate::rule::Rule;
use crate::serialize::{DEFAULT_LITERAL, NULL_LITERAL, row_literal};
use crate::structs::SqlRow;
use crossbeam::sync::WaitGroup;
use std::num::NonZeroUsize;

impl BuildCore {
    /// 把 `row` 按已映射的列序列化为一行并追加。
    ///
    /// 任一字段序列化失败会写入粘性错误，整行丢弃。
    /// 自增列渲染为 `DEFAULT` 时改写为 `NULL`，由数据库分配。
    pub fn build_row<T: SqlRow>(&self, row: &T, rule: &Rule) {
        // 先于加锁检查，已失败的 builder 不做无用功
        if self.is_failed() {
            return;
        }

        let mut values = Vec::with_capacity(self.insert.tags.len());
        for &index in &self.insert.tags {
            let literal = row
                .field_value(index)
                .ok_or(BuildError::ValueType)
                .and_then(|arg| row_literal(&arg, rule));
            match literal {
                Ok(v) => values.push(v),
                Err(e) => {
                    self.fail(e);
                    return;
                }
            }
        }

        if values.is_empty() {
            tracing::debug!("insert row has no values; skipped");
            return;
        }

        if let Some(auto) = self.insert.auto
            && values.get(auto).is_some_and(|v| v == DEFAULT_LITERAL)
        {
            values[auto] = NULL_LITERAL.to_string();
        }

        let row = values.join(",");
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        // 序列化期间其他线程可能已写入错误
        if self.is_failed() {
            return;
        }
        rows.push(row);
    }

    /// 与 `build_row` 相同，结束（包括提前返回）时释放 `done`。
    ///
    /// 调用方为每个实例 clone 一份 `WaitGroup` 分发到工作线程，再 `wait()` 等待全部完成。
    pub fn build_row_signal<T: SqlRow>(&self, row: &T, rule: &Rule, done: WaitGroup) {
        self.build_row(row, rule);
        drop(done);
    }

    /// 按顺序构造多行，行顺序与输入一致。
    pub fn build_rows<T: SqlRow>(&self, rows: &[T], rule: &Rule) {
        for row in rows {
            if self.is_failed() {
                return;
            }
            self.build_row(row, rule);
        }
    }

    /// 在作用域线程中并发构造多行，作用域结束即全部完成；行顺序不确定。
    pub fn build_rows_concurrent<T: SqlRow + Sync>(&self, rows: &[T], rule: &Rule) {
        if rows.is_empty() || self.is_failed() {
            return;
        }

        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(rows.len());
        let chunk = rows.len().div_ceil(workers);

        std::thread::scope(|s| {
            for part in rows.chunks(chunk) {
                s.spawn(move || {
                    for row in part {
                        self.build_row(row, rule);
                    }
                });
            }
        });
    }
}
