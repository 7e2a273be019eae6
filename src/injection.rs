//! injection：标识符注入检测（语法层面的启发式，不是 SQL 解析器）。
//!
//! 表名、列名、order/group by 表达式、LIKE 模式都会在拼接前经过这里；
//! 绑定值走序列化器（带引号并转义），不需要检测。

use regex::Regex;
use std::sync::LazyLock;

static INJECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?ix)
        ;                                   # 语句分隔
        | --  | /\* | \*/ | \#              # 注释
        | ['"`\\]                           # 引号与转义
        | \b(?:or|and)\s+\S+\s*=\s*\S+      # or 1=1 之类的恒真式
        | \bxp_\w+
        | \b(?:select|insert|update|delete|drop|truncate|alter|create
              |exec|execute|union|declare|grant|revoke|sleep|benchmark)\b
        "#,
    )
    .expect("invalid built-in injection regex")
});

/// 输入包含不宜直接拼入 SQL 的片段时返回 true。
pub fn check_injection(input: &str) -> bool {
    INJECTION.is_match(input)
}
