#[cfg(test)]
mod tests {
    use crate::valuer::{SqlValuer, ValuerError};
    use crate::{Arg, BuildError, Kind, Rule, SqlValue, list, list_literals, literal, row_literal};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone)]
    struct UserId(u32);

    impl SqlValuer for UserId {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Ok(SqlValue::U32(self.0))
        }
    }

    #[derive(Debug, Clone)]
    struct Broken;

    impl SqlValuer for Broken {
        fn value(&self) -> Result<SqlValue, ValuerError> {
            Err(ValuerError("broken".to_string()))
        }
    }

    #[test]
    fn integers_and_floats_are_unquoted() {
        let rule = Rule::default();
        assert_eq!(literal(&Arg::from(42_i64), &rule).unwrap(), "42");
        assert_eq!(literal(&Arg::from(-7_i8), &rule).unwrap(), "-7");
        assert_eq!(literal(&Arg::from(u64::MAX), &rule).unwrap(), "18446744073709551615");
        assert_eq!(literal(&Arg::from(0_usize), &rule).unwrap(), "0");
        assert_eq!(literal(&Arg::from(1.5_f64), &rule).unwrap(), "1.5");
        assert_eq!(literal(&Arg::from(0.25_f32), &rule).unwrap(), "0.25");
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        let rule = Rule::default();
        assert_eq!(literal(&Arg::from("abc"), &rule).unwrap(), "'abc'");
        assert_eq!(literal(&Arg::from(""), &rule).unwrap(), "''");
        assert_eq!(
            literal(&Arg::from("I'm \"ok\"\n"), &rule).unwrap(),
            r#"'I\'m \"ok\"\n'"#
        );
    }

    #[test]
    fn unsupported_kinds_fail() {
        let rule = Rule::default();
        assert_eq!(literal(&Arg::from(true), &rule), Err(BuildError::ValueType));
        assert_eq!(literal(&Arg::from(None::<i64>), &rule), Err(BuildError::ValueType));
        assert_eq!(
            literal(&Arg::Value(SqlValue::Bytes(vec![1, 2])), &rule),
            Err(BuildError::ValueType)
        );
        assert_eq!(literal(&list([1_i64]), &rule), Err(BuildError::ValueType));
        assert_eq!(literal(&Arg::from(f64::NAN), &rule), Err(BuildError::ValueType));
    }

    #[test]
    fn declared_kind_must_match() {
        let rule = Rule::of(Kind::I32);
        assert_eq!(literal(&Arg::from(5_i32), &rule).unwrap(), "5");
        assert_eq!(literal(&Arg::from(5_i64), &rule), Err(BuildError::ValueType));
        assert_eq!(literal(&Arg::from("5"), &rule), Err(BuildError::ValueType));
    }

    #[test]
    fn valuer_is_resolved_before_encoding() {
        let rule = Rule::default();
        let id: Box<dyn SqlValuer> = Box::new(UserId(9));
        assert_eq!(literal(&Arg::from(id), &rule).unwrap(), "9");

        let broken: Box<dyn SqlValuer> = Box::new(Broken);
        assert_eq!(
            literal(&Arg::from(broken), &rule),
            Err(BuildError::Valuer(ValuerError("broken".to_string())))
        );
    }

    #[test]
    fn row_mode_renders_default_marker() {
        let rule = Rule::default();
        assert_eq!(row_literal(&Arg::from(0_i64), &rule).unwrap(), "DEFAULT");
        assert_eq!(row_literal(&Arg::from(""), &rule).unwrap(), "DEFAULT");
        assert_eq!(row_literal(&Arg::from(3_i64), &rule).unwrap(), "3");

        let rule = Rule::new().default_marker(-1_i64);
        assert_eq!(row_literal(&Arg::from(-1_i64), &rule).unwrap(), "DEFAULT");
        assert_eq!(row_literal(&Arg::from(0_i64), &rule).unwrap(), "0");
        assert_eq!(row_literal(&Arg::from(""), &rule).unwrap(), "''");
    }

    #[test]
    fn list_keeps_order_and_duplicates() {
        assert_eq!(
            list_literals(&Arg::from(vec![1_i64, 2, 2, 3])).unwrap(),
            vec!["1", "2", "2", "3"]
        );
        assert_eq!(
            list_literals(&Arg::from(["a", "b"])).unwrap(),
            vec!["'a'", "'b'"]
        );
        assert!(list_literals(&Arg::from(Vec::<i64>::new())).unwrap().is_empty());
    }

    #[test]
    fn list_rejects_scalars_nesting_and_mixed_kinds() {
        assert_eq!(list_literals(&Arg::from(1_i64)), Err(BuildError::ValueType));
        assert_eq!(
            list_literals(&Arg::List(vec![list([1_i64])])),
            Err(BuildError::ValueType)
        );
        assert_eq!(
            list_literals(&Arg::List(vec![Arg::from(1_i64), Arg::from("a")])),
            Err(BuildError::ValueType)
        );
        assert_eq!(
            list_literals(&Arg::from(vec![true, false])),
            Err(BuildError::ValueType)
        );
    }
}
