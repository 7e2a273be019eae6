//! Rule：一次 builder 调用的取值规则。
//!
//! - `kind`：声明的值种类；设置后，其他种类的值会得到 `BuildError::ValueType`。
//! - `marker`：insert 行中渲染为 `DEFAULT` 的值；未设置时使用值所属种类的零值。
//! - `empty`：“未提供值”的哨兵，where/set 用它判断是否跳过（或严格模式下报错）。

use crate::serialize::quote_string;
use crate::value::{Kind, SqlValue};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rule {
    kind: Option<Kind>,
    marker: Option<SqlValue>,
    empty: Cow<'static, str>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明值种类的规则。
    pub fn of(kind: Kind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// 设置空值哨兵。
    pub fn empty(mut self, sentinel: impl Into<Cow<'static, str>>) -> Self {
        self.empty = sentinel.into();
        self
    }

    /// 设置 insert 时渲染为 `DEFAULT` 的值。
    pub fn default_marker(mut self, marker: impl Into<SqlValue>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub(crate) fn accepts(&self, kind: Kind) -> bool {
        self.kind.is_none_or(|k| k == kind)
    }

    pub(crate) fn is_default(&self, v: &SqlValue) -> bool {
        match &self.marker {
            Some(m) => m == v,
            None => v.is_zero(),
        }
    }

    /// 渲染结果等于哨兵本身或其带引号形式时，视为“未提供值”。
    pub fn is_empty_literal(&self, literal: &str) -> bool {
        if literal == self.empty.as_ref() {
            return true;
        }
        let mut quoted = String::with_capacity(self.empty.len() + 2);
        quote_string(&mut quoted, &self.empty);
        literal == quoted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_treats_zero_as_default_marker() {
        let rule = Rule::default();
        assert!(rule.is_default(&SqlValue::I64(0)));
        assert!(rule.is_default(&SqlValue::from("")));
        assert!(!rule.is_default(&SqlValue::I64(9)));
    }

    #[test]
    fn explicit_marker_replaces_zero() {
        let rule = Rule::new().default_marker(-1_i64);
        assert!(rule.is_default(&SqlValue::I64(-1)));
        assert!(!rule.is_default(&SqlValue::I64(0)));
        // 种类不同不相等
        assert!(!rule.is_default(&SqlValue::I32(-1)));
    }

    #[test]
    fn empty_literal_matches_bare_and_quoted_sentinel() {
        let rule = Rule::default();
        assert!(rule.is_empty_literal(""));
        assert!(rule.is_empty_literal("''"));
        assert!(!rule.is_empty_literal("0"));

        let rule = Rule::new().empty("N/A");
        assert!(rule.is_empty_literal("N/A"));
        assert!(rule.is_empty_literal("'N/A'"));
        assert!(!rule.is_empty_literal("''"));
    }

    #[test]
    fn declared_kind_filters_values() {
        let rule = Rule::of(Kind::U32);
        assert!(rule.accepts(Kind::U32));
        assert!(!rule.accepts(Kind::I64));
        assert!(Rule::new().accepts(Kind::Str));
    }
}
