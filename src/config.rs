//! 全局配置：默认的 struct tag key（用于 `BuildCore::map_default_columns`）。

use std::borrow::Cow;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// 未配置时使用的 tag key。
pub const DEFAULT_TAG_KEY: &str = "db";

static DEFAULT_TAG: OnceLock<Mutex<Cow<'static, str>>> = OnceLock::new();
static DEFAULT_TAG_LOCK: Mutex<()> = Mutex::new(());

fn tag_cell() -> &'static Mutex<Cow<'static, str>> {
    DEFAULT_TAG.get_or_init(|| Mutex::new(Cow::Borrowed(DEFAULT_TAG_KEY)))
}

/// 获取当前全局默认 tag key。
pub fn default_tag_key() -> Cow<'static, str> {
    tag_cell().lock().unwrap_or_else(|e| e.into_inner()).clone()
}

/// 设置全局默认 tag key，返回旧值。
pub fn set_default_tag_key(key: impl Into<Cow<'static, str>>) -> Cow<'static, str> {
    let mut g = tag_cell().lock().unwrap_or_else(|e| e.into_inner());
    std::mem::replace(&mut *g, key.into())
}

/// 修改全局默认 tag key 的 RAII guard（会持有一个全局锁，避免并行测试互相干扰）。
pub struct DefaultTagKeyGuard {
    _lock: MutexGuard<'static, ()>,
    old: Cow<'static, str>,
}

impl Drop for DefaultTagKeyGuard {
    fn drop(&mut self) {
        let _ = set_default_tag_key(self.old.clone());
    }
}

/// 在一个作用域内临时设置默认 tag key，并保证退出作用域后自动恢复。
pub fn set_default_tag_key_scoped(key: impl Into<Cow<'static, str>>) -> DefaultTagKeyGuard {
    let lock = DEFAULT_TAG_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let old = set_default_tag_key(key);
    DefaultTagKeyGuard { _lock: lock, old }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_key_applies_inside_scope() {
        {
            let _g = set_default_tag_key_scoped("sql");
            assert_eq!(default_tag_key(), "sql");
        }
        {
            let _g = set_default_tag_key_scoped("json");
            assert_eq!(default_tag_key(), "json");
        }
    }

    #[test]
    fn guard_restores_previous_key() {
        let _g = set_default_tag_key_scoped("outer");
        let old = set_default_tag_key("inner");
        assert_eq!(old, "outer");
        assert_eq!(set_default_tag_key(old), "inner");
        assert_eq!(default_tag_key(), "outer");
    }
}
