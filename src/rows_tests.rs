#[cfg(test)]
mod tests {
    use crate::{BuildCore, BuildError, Rule, SqlValue, SqlValuer, ValuerError};
    use crossbeam::sync::WaitGroup;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Member {
        id: i64,
        name: String,
        score: f64,
        active: bool,
    }

    crate::sql_row! {
        impl Member {
            id:     { db: "id;auto" },
            name:   { db: "name" },
            score:  { db: "score" },
            active: { flag: "active" },
        }
    }

    /// 取值很慢的 ID，用来在序列化途中插入其他线程的操作。
    #[derive(Debug, Clone)]
    struct SlowId(i64);

    impl SqlValuer for SlowId {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            std::thread::sleep(Duration::from_millis(200));
            Ok(SqlValue::I64(self.0))
        }
    }

    struct Ticket {
        id: Box<dyn SqlValuer>,
    }

    crate::sql_row! {
        impl Ticket {
            id: { db: "id" },
        }
    }

    fn member(id: i64, name: &str) -> Member {
        Member {
            id,
            name: name.to_string(),
            score: 1.5,
            active: true,
        }
    }

    fn mapped() -> BuildCore {
        let mut b = BuildCore::new();
        b.set_table_name("member").map_columns::<Member>("db");
        b
    }

    #[test]
    fn zero_auto_field_becomes_null() {
        let b = mapped();
        b.build_row(&member(0, "amy"), &Rule::default());
        assert_eq!(b.insert_rows(), ["NULL,'amy',1.5"]);
    }

    #[test]
    fn non_default_auto_field_passes_through() {
        let b = mapped();
        b.build_row(&member(12, "amy"), &Rule::default());
        assert_eq!(b.insert_rows(), ["12,'amy',1.5"]);
    }

    #[test]
    fn default_marker_outside_auto_column_stays_default() {
        let b = mapped();
        b.build_row(&member(3, ""), &Rule::default());
        assert_eq!(b.insert_rows(), ["3,DEFAULT,1.5"]);
    }

    #[test]
    fn serialization_error_discards_row_and_sticks() {
        let mut b = BuildCore::new();
        b.map_columns::<Member>("flag");
        b.build_row(&member(1, "amy"), &Rule::default());
        assert_eq!(b.error(), Some(&BuildError::ValueType));
        assert!(b.insert_rows().is_empty());

        // 之后的行不再处理
        let mut ok = BuildCore::new();
        ok.map_columns::<Member>("db");
        ok.fail(BuildError::Injection);
        ok.build_row(&member(1, "amy"), &Rule::default());
        assert!(ok.insert_rows().is_empty());
    }

    #[test]
    fn no_mapped_columns_appends_nothing() {
        let b = BuildCore::new();
        b.build_row(&member(1, "amy"), &Rule::default());
        assert_eq!(b.error(), None);
        assert!(b.insert_rows().is_empty());
    }

    #[test]
    fn sequential_rows_keep_input_order() {
        let b = mapped();
        let rows = vec![member(1, "a"), member(2, "b"), member(3, "c")];
        b.build_rows(&rows, &Rule::default());
        assert_eq!(
            b.insert_rows(),
            ["1,'a',1.5", "2,'b',1.5", "3,'c',1.5"]
        );
    }

    #[test]
    fn concurrent_rows_lose_no_updates() {
        let b = mapped();
        let rows: Vec<Member> = (1..=200).map(|i| member(i, "m")).collect();
        b.build_rows_concurrent(&rows, &Rule::default());

        let mut got = b.insert_rows();
        assert_eq!(got.len(), 200);
        got.sort();
        let mut want: Vec<String> = (1..=200).map(|i| format!("{i},'m',1.5")).collect();
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn scoped_threads_share_the_builder() {
        let b = mapped();
        let rule = Rule::default();
        let rows: Vec<Member> = (1..=16).map(|i| member(i, "t")).collect();
        std::thread::scope(|s| {
            for row in &rows {
                let (b, rule) = (&b, &rule);
                s.spawn(move || b.build_row(row, rule));
            }
        });
        assert_eq!(b.insert_rows().len(), 16);
    }

    #[test]
    fn wait_group_signals_completion() {
        let b = Arc::new(mapped());
        let rule = Arc::new(Rule::default());
        let wg = WaitGroup::new();

        for i in 1..=32 {
            let (b, rule, done) = (Arc::clone(&b), Arc::clone(&rule), wg.clone());
            std::thread::spawn(move || b.build_row_signal(&member(i, "w"), &rule, done));
        }
        wg.wait();

        assert_eq!(b.insert_rows().len(), 32);
    }

    #[test]
    fn wait_group_is_released_when_builder_failed() {
        let b = Arc::new(mapped());
        b.fail(BuildError::Condition);
        let wg = WaitGroup::new();

        let (bb, done) = (Arc::clone(&b), wg.clone());
        std::thread::spawn(move || bb.build_row_signal(&member(1, "x"), &Rule::default(), done));
        wg.wait();

        assert!(b.insert_rows().is_empty());
        assert_eq!(b.error(), Some(&BuildError::Condition));
    }

    #[test]
    fn error_set_while_serializing_discards_the_row() {
        let mut b = BuildCore::new();
        b.set_table_name("ticket").map_columns::<Ticket>("db");
        let row = Ticket {
            id: Box::new(SlowId(7)),
        };
        let rule = Rule::default();

        std::thread::scope(|s| {
            s.spawn(|| b.build_row(&row, &rule));
            std::thread::sleep(Duration::from_millis(50));
            b.fail(BuildError::InsertValue);
        });

        assert_eq!(b.error(), Some(&BuildError::InsertValue));
        assert!(b.insert_rows().is_empty());
    }
}
