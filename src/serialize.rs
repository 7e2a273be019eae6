//! 值序列化：把动态标量渲染成可直接拼入 SQL 的字面量。
//!
//! 有两种模式：
//! - 子句模式（where/set/in）：只做字面量渲染；
//! - 行模式（insert）：命中 `Rule` 的默认标记时渲染为 `DEFAULT`。

use crate::arg::Arg;
use crate::error::BuildError;
use crate::rule::Rule;
use crate::value::{Kind, SqlValue};
use std::borrow::Cow;

/// insert 行中由数据库填充默认值的占位。
pub const DEFAULT_LITERAL: &str = "DEFAULT";
/// 自增列命中默认占位后改写成的字面量。
pub const NULL_LITERAL: &str = "NULL";

/// 子句模式下的字面量。
pub fn literal(arg: &Arg, rule: &Rule) -> Result<String, BuildError> {
    let v = accepted(arg, rule)?;
    let mut out = String::new();
    encode_scalar(&mut out, &v)?;
    Ok(out)
}

/// 行模式下的字面量：值等于规则的默认标记时返回 `DEFAULT`。
pub fn row_literal(arg: &Arg, rule: &Rule) -> Result<String, BuildError> {
    let v = accepted(arg, rule)?;
    if rule.is_default(&v) {
        return Ok(DEFAULT_LITERAL.to_string());
    }
    let mut out = String::new();
    encode_scalar(&mut out, &v)?;
    Ok(out)
}

/// 成员列表：按顺序（保留重复）序列化列表中的每个元素。
///
/// 元素必须是同一种类的标量；空列表返回空 Vec，由调用方决定是否省略。
pub fn list_literals(arg: &Arg) -> Result<Vec<String>, BuildError> {
    let Arg::List(items) = arg else {
        return Err(BuildError::ValueType);
    };

    let mut out = Vec::with_capacity(items.len());
    let mut first: Option<Kind> = None;
    for item in items {
        if matches!(item, Arg::List(_)) {
            return Err(BuildError::ValueType);
        }
        let v = resolve(item)?;
        let kind = v.kind().ok_or(BuildError::ValueType)?;
        match first {
            None => first = Some(kind),
            Some(k) if k != kind => {
                tracing::debug!(%k, %kind, "mixed kinds in membership list");
                return Err(BuildError::ValueType);
            }
            Some(_) => {}
        }
        let mut s = String::new();
        encode_scalar(&mut s, &v)?;
        out.push(s);
    }
    Ok(out)
}

/// 解析出标量并校验其种类是否被 `rule` 接受。
fn accepted<'a>(arg: &'a Arg, rule: &Rule) -> Result<Cow<'a, SqlValue>, BuildError> {
    let v = resolve(arg)?;
    let kind = v.kind().ok_or(BuildError::ValueType)?;
    if !rule.accepts(kind) {
        tracing::debug!(%kind, "value kind rejected by rule");
        return Err(BuildError::ValueType);
    }
    Ok(v)
}

fn resolve(arg: &Arg) -> Result<Cow<'_, SqlValue>, BuildError> {
    match arg {
        Arg::Value(v) => Ok(Cow::Borrowed(v)),
        Arg::Valuer(v) => Ok(Cow::Owned(v.value()?)),
        Arg::List(_) => Err(BuildError::ValueType),
    }
}

fn encode_scalar(out: &mut String, v: &SqlValue) -> Result<(), BuildError> {
    match v {
        SqlValue::I8(n) => out.push_str(&n.to_string()),
        SqlValue::I16(n) => out.push_str(&n.to_string()),
        SqlValue::I32(n) => out.push_str(&n.to_string()),
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::Isize(n) => out.push_str(&n.to_string()),
        SqlValue::U8(n) => out.push_str(&n.to_string()),
        SqlValue::U16(n) => out.push_str(&n.to_string()),
        SqlValue::U32(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        SqlValue::Usize(n) => out.push_str(&n.to_string()),
        // NaN/inf 没有 SQL 字面量
        SqlValue::F32(n) if n.is_finite() => out.push_str(&n.to_string()),
        SqlValue::F64(n) if n.is_finite() => out.push_str(&n.to_string()),
        SqlValue::String(s) => quote_string(out, s),
        _ => return Err(BuildError::ValueType),
    }
    Ok(())
}

/// 单引号包裹并转义字符串。
pub(crate) fn quote_string(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\u{0000}' => out.push_str("\\0"),
            '\u{0008}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{001a}' => out.push_str("\\Z"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}
