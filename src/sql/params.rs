//! Convert serde_json::Value into values sqlx can bind against a column of known kind.

use crate::entity::{ColumnInfo, ColumnKind};
use crate::error::AppError;
use serde_json::Value;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// A value that can be bound to a SQLite statement.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl BindValue {
    /// Checks the JSON type against the column kind. Integers are accepted for real columns
    /// and whole floats (`2010.0`) for integer columns. Null is accepted for every column.
    pub fn from_json(column: &ColumnInfo, v: &Value) -> Result<Self, AppError> {
        let mismatch = || {
            AppError::Validation(format!(
                "{} must be {}",
                column.name,
                column.kind.describe()
            ))
        };
        if v.is_null() {
            return Ok(BindValue::Null);
        }
        Ok(match column.kind {
            ColumnKind::Integer => BindValue::Integer(as_whole(v).ok_or_else(mismatch)?),
            ColumnKind::Real => BindValue::Real(v.as_f64().ok_or_else(mismatch)?),
            ColumnKind::Text => BindValue::Text(v.as_str().ok_or_else(mismatch)?.to_string()),
        })
    }
}

/// Integer value of a JSON number, including floats with no fractional part.
fn as_whole(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Bind params in order onto a query.
pub fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [BindValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for p in params {
        query = match p {
            BindValue::Null => query.bind(None::<i64>),
            BindValue::Integer(n) => query.bind(*n),
            BindValue::Real(f) => query.bind(*f),
            BindValue::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MOVIE;
    use serde_json::json;

    fn col(name: &str) -> &'static ColumnInfo {
        MOVIE.column(name).unwrap()
    }

    fn bind(name: &str, v: Value) -> Result<BindValue, AppError> {
        BindValue::from_json(col(name), &v)
    }

    #[test]
    fn real_column_accepts_integer_json() {
        assert_eq!(bind("rating", json!(8)).unwrap(), BindValue::Real(8.0));
        assert_eq!(bind("rating", json!(8.8)).unwrap(), BindValue::Real(8.8));
    }

    #[test]
    fn integer_column_rejects_fraction_and_string() {
        assert!(bind("year", json!(2010.5)).is_err());
        assert!(bind("year", json!("2010")).is_err());
        assert!(bind("year", json!(1e300)).is_err());
        assert_eq!(bind("year", json!(2010)).unwrap(), BindValue::Integer(2010));
    }

    #[test]
    fn integer_column_accepts_whole_float() {
        assert_eq!(bind("year", json!(2010.0)).unwrap(), BindValue::Integer(2010));
        assert_eq!(bind("director_id", json!(3.0)).unwrap(), BindValue::Integer(3));
    }

    #[test]
    fn null_is_accepted_for_every_column() {
        assert_eq!(bind("director_id", Value::Null).unwrap(), BindValue::Null);
        assert_eq!(bind("title", Value::Null).unwrap(), BindValue::Null);
    }
}
