//! 宏集合：为 builder 提供可变参数调用封装。
//! 通过 `options!` / `no_options!` / `columns!`，可以使用不定长字符串参数而无需手动创建 `Vec`。

/// 可以展开成一组列名的参数：单个 `&str`、数组或 `Vec`。
pub trait ColumnNames {
    fn push_names(self, dst: &mut Vec<String>);

    fn into_names(self) -> Vec<String>
    where
        Self: Sized,
    {
        let mut dst = Vec::new();
        self.push_names(&mut dst);
        dst
    }
}

impl ColumnNames for &str {
    fn push_names(self, dst: &mut Vec<String>) {
        dst.push(self.to_owned());
    }
}

impl<T: Into<String>, const N: usize> ColumnNames for [T; N] {
    fn push_names(self, dst: &mut Vec<String>) {
        dst.extend(self.map(Into::into));
    }
}

impl<T: Into<String>> ColumnNames for Vec<T> {
    fn push_names(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __column_names {
    ($($value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut names = Vec::<String>::new();
        $( $crate::macros::ColumnNames::push_names($value, &mut names); )*
        names
    }};
}

/// 为 `BuildCore::set_options` 提供可变参数调用。
#[macro_export]
macro_rules! options {
    ($core:expr $(, $col:expr)* $(,)?) => {
        $core.set_options($crate::__column_names!($($col),*))
    };
}
pub use crate::options;

/// 为 `BuildCore::set_no_options` 提供可变参数调用。
#[macro_export]
macro_rules! no_options {
    ($core:expr $(, $col:expr)* $(,)?) => {
        $core.set_no_options($crate::__column_names!($($col),*))
    };
}
pub use crate::no_options;

/// 依次对每个参数调用 `BuildCore::column`。
#[macro_export]
macro_rules! columns {
    ($core:expr $(, $col:expr)* $(,)?) => {{
        let core = &mut $core;
        $( core.column($col); )*
        core
    }};
}
pub use crate::columns;
