//! 行结构描述：为 insert 列映射提供字段元数据与按下标取值。
//!
//! Rust 无运行时反射；这里通过 `sql_row!` 宏为 struct 生成字段表（字段名 + tags）
//! 与取值逻辑，`BuildCore::map_columns` 再按 tag key 从字段表解析出列。

use crate::arg::Arg;

/// tag 中标记自增列的片段。
pub const AUTO_SEGMENT: &str = "auto";

/// 单个字段的元数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Rust 字段名
    pub name: &'static str,
    /// `(key, value)` 形式的 tags，例如 `("db", "id;auto")`
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldMeta {
    /// 读取指定 key 的 tag；不存在时返回 None。
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// 解析后的列 tag：`columnName[;auto]`，`auto` 只认第二段且区分大小写。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTag<'a> {
    pub column: &'a str,
    pub auto: bool,
}

impl<'a> ColumnTag<'a> {
    /// 空 tag 或空列名返回 None。
    pub fn parse(tag: &'a str) -> Option<Self> {
        let mut segments = tag.split(';');
        let column = segments.next()?;
        if column.is_empty() {
            return None;
        }
        let auto = segments.next().is_some_and(|s| s == AUTO_SEGMENT);
        Some(Self { column, auto })
    }
}

/// 由宏为业务 struct 实现的 trait：提供字段表与按下标取值。
pub trait SqlRow {
    const FIELDS: &'static [FieldMeta];

    /// 取第 `index` 个字段（按 FIELDS 顺序）的当前值；越界返回 None。
    fn field_value(&self, index: usize) -> Option<Arg>;
}

/// 声明一个可用于 insert 列映射的 struct。
///
/// 字段的 tags 写成 `key: "value"`，key 可以任意（常用 `db`）；
/// 没有目标 key 的字段在映射时会被跳过。
///
/// ```ignore
/// #[derive(Default)]
/// struct User { id: i64, name: String, cache: String }
///
/// halo_fragment::sql_row! {
///   impl User {
///     id:    { db: "id;auto", json: "id" },
///     name:  { db: "name" },
///     cache: {},
///   }
/// }
/// ```
#[macro_export]
macro_rules! sql_row {
    (
        impl $ty:ty {
            $(
                $field:ident : { $( $key:ident : $tag:literal ),* $(,)? }
            ),* $(,)?
        }
    ) => {
        impl $crate::structs::SqlRow for $ty {
            const FIELDS: &'static [$crate::structs::FieldMeta] = &[
                $(
                    $crate::structs::FieldMeta {
                        name: stringify!($field),
                        tags: &[ $( (stringify!($key), $tag) ),* ],
                    }
                ),*
            ];

            #[allow(unused_mut, unused_assignments)]
            fn field_value(&self, index: usize) -> Option<$crate::arg::Arg> {
                let mut at = 0usize;
                $(
                    if at == index {
                        return Some($crate::arg::Arg::from(
                            ::std::clone::Clone::clone(&self.$field),
                        ));
                    }
                    at += 1;
                )*
                None
            }
        }
    };
}
