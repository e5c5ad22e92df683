//! Polars `Series`/`DataFrame` to profiling `Column`/`Table`.

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use polars::prelude::{DataFrame, DataType, Series, TimeUnit};
use tracing::debug;

use tabprof_model::{Column, ProfileError, RowLabels, SemanticType, Table, Value};

use crate::error::{IngestError, Result};

/// The profiling type for a polars dtype, if there is one.
pub fn semantic_type(dtype: &DataType) -> Option<SemanticType> {
    match dtype {
        dt if dt.is_integer() => Some(SemanticType::Integer),
        dt if dt.is_float() => Some(SemanticType::Float),
        DataType::Boolean => Some(SemanticType::Boolean),
        DataType::Datetime(..) | DataType::Date => Some(SemanticType::Datetime),
        DataType::Duration(_) => Some(SemanticType::Timedelta),
        DataType::String => Some(SemanticType::Object),
        DataType::Categorical(..) | DataType::Enum(..) => Some(SemanticType::Categorical),
        _ => None,
    }
}

fn out_of_range(series: &Series, value: i64) -> IngestError {
    ProfileError::invalid(format!(
        "column '{}' holds {value}, outside the representable timestamp range",
        series.name()
    ))
    .into()
}

fn timestamp(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let stamp = match unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    };
    stamp.map(|stamp| stamp.naive_utc())
}

fn duration(value: i64, unit: TimeUnit) -> Option<TimeDelta> {
    match unit {
        TimeUnit::Nanoseconds => Some(TimeDelta::nanoseconds(value)),
        TimeUnit::Microseconds => Some(TimeDelta::microseconds(value)),
        TimeUnit::Milliseconds => TimeDelta::try_milliseconds(value),
    }
}

fn physical<T>(series: &Series, convert: impl Fn(i64) -> Option<T>) -> Result<Vec<Option<T>>> {
    let ints = series.cast(&DataType::Int64)?;
    let mut converted = Vec::with_capacity(ints.len());
    for value in ints.i64()? {
        let value = value.map(|v| convert(v).ok_or_else(|| out_of_range(series, v)));
        converted.push(value.transpose()?);
    }
    Ok(converted)
}

fn dates(series: &Series) -> Result<Vec<Option<NaiveDateTime>>> {
    let epoch = NaiveDateTime::default();
    physical(series, |days| {
        epoch.checked_add_signed(TimeDelta::try_days(days)?)
    })
}

/// Converts a polars series into a profiling column.
///
/// Float NaN becomes the missing marker; categorical and enum series keep
/// their category labels.
///
/// # Errors
///
/// - [`IngestError::UnsupportedDtype`] for nested, binary and other dtypes
/// - [`IngestError::DataFrame`] if polars fails to cast the series
pub fn column_from_series(series: &Series) -> Result<Column> {
    let name = series.name().to_string();
    let dtype = series.dtype();
    let Some(semantic) = semantic_type(dtype) else {
        return Err(IngestError::UnsupportedDtype {
            column: name,
            dtype: dtype.to_string(),
        });
    };
    debug!(column = %name, polars_dtype = %dtype, dtype = %semantic, "converting series");

    let column = match dtype {
        DataType::Boolean => Column::new(name, semantic, series.bool()?)?,
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            Column::new(name, semantic, physical(series, |v| timestamp(v, unit))?)?
        }
        DataType::Date => Column::new(name, semantic, dates(series)?)?,
        DataType::Duration(unit) => {
            let unit = *unit;
            Column::new(name, semantic, physical(series, |v| duration(v, unit))?)?
        }
        DataType::String => Column::new(name, semantic, series.str()?)?,
        _ => match semantic {
            SemanticType::Integer => {
                Column::new(name, semantic, series.cast(&DataType::Int64)?.i64()?)?
            }
            SemanticType::Float => {
                Column::new(name, semantic, series.cast(&DataType::Float64)?.f64()?)?
            }
            _ => Column::new(name, semantic, series.cast(&DataType::String)?.str()?)?,
        },
    };
    Ok(column)
}

fn labels_from_column(column: Column) -> RowLabels {
    if column.dtype() == SemanticType::Datetime {
        let stamps: Option<Vec<NaiveDateTime>> =
            column.values().iter().map(Value::as_datetime).collect();
        if let Some(stamps) = stamps {
            return RowLabels::Timestamps(stamps);
        }
    }
    RowLabels::Values(column.values().to_vec())
}

/// Converts a data frame into a profiling table.
///
/// When `index_column` is given, that column becomes the row labels (as
/// timestamps when it is a datetime column without missing values) and is
/// removed from the value columns.
///
/// # Errors
///
/// - [`IngestError::ColumnNotFound`] if `index_column` is not in `df`
/// - any error of [`column_from_series`]
pub fn table_from_dataframe(df: &DataFrame, index_column: Option<&str>) -> Result<Table> {
    let mut index = None;
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let converted = column_from_series(series)?;
        if index_column == Some(series.name().as_str()) {
            index = Some(converted);
        } else {
            columns.push(converted);
        }
    }

    let table = Table::new(columns)?;
    match (index_column, index) {
        (_, Some(index)) => Ok(table.with_labels(labels_from_column(index))?),
        (Some(name), None) => Err(IngestError::ColumnNotFound {
            column: name.to_string(),
        }),
        (None, None) => Ok(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, df};
    use tabprof_model::NullKind;

    #[test]
    fn test_numeric_series() {
        let ints = Series::new("a".into(), [Some(1_i32), None, Some(3)]);
        let ints = column_from_series(&ints).unwrap();
        assert_eq!(ints.dtype(), SemanticType::Integer);
        assert_eq!(ints.values()[0], Value::Int(1));
        assert_eq!(ints.values()[1], Value::Null(NullKind::NaN));

        let floats = column_from_series(&Series::new("b".into(), [1.5_f64, f64::NAN])).unwrap();
        assert_eq!(floats.dtype(), SemanticType::Float);
        assert_eq!(floats.null_count(), 1);
    }

    #[test]
    fn test_string_and_bool_series() {
        let strings = column_from_series(&Series::new("s".into(), [Some("x"), None])).unwrap();
        assert_eq!(strings.dtype(), SemanticType::Object);
        assert_eq!(strings.values()[1], Value::Null(NullKind::None));

        let flags = column_from_series(&Series::new("f".into(), [true, false])).unwrap();
        assert_eq!(flags.dtype(), SemanticType::Boolean);
        assert_eq!(flags.values()[0], Value::Bool(true));
    }

    #[test]
    fn test_temporal_series() {
        let nanos = Series::new("t".into(), [0_i64, 3_600_000_000_000])
            .cast(&DataType::Datetime(TimeUnit::Nanoseconds, None))
            .unwrap();
        let column = column_from_series(&nanos).unwrap();
        assert_eq!(column.dtype(), SemanticType::Datetime);
        assert_eq!(
            column.values()[1].as_datetime(),
            Some(NaiveDateTime::default() + TimeDelta::hours(1))
        );

        let days = Series::new("d".into(), [1_i32])
            .cast(&DataType::Date)
            .unwrap();
        let column = column_from_series(&days).unwrap();
        assert_eq!(
            column.values()[0].as_datetime(),
            Some(NaiveDateTime::default() + TimeDelta::days(1))
        );

        let spans = Series::new("s".into(), [90_i64])
            .cast(&DataType::Duration(TimeUnit::Milliseconds))
            .unwrap();
        let column = column_from_series(&spans).unwrap();
        assert_eq!(column.dtype(), SemanticType::Timedelta);
        let expected = Value::Timedelta(TimeDelta::milliseconds(90));
        assert_eq!(column.values()[0], expected);
    }

    #[test]
    fn test_unsupported_dtype() {
        let nulls = Series::new_null("n".into(), 2);
        let err = column_from_series(&nulls).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedDtype { .. }));
    }

    #[test]
    fn test_table_with_index() {
        let when = Series::new("when".into(), [0_i64, 60_000_000_000])
            .cast(&DataType::Datetime(TimeUnit::Nanoseconds, None))
            .unwrap();
        let value = Series::new("value".into(), [1.0_f64, 2.0]);
        let df = DataFrame::new(vec![when.into(), value.into()]).unwrap();

        let table = table_from_dataframe(&df, Some("when")).unwrap();
        assert_eq!(table.shape(), (2, 1));
        let stamps = table.labels().as_timestamps().unwrap();
        assert_eq!(stamps[1] - stamps[0], TimeDelta::minutes(1));

        let err = table_from_dataframe(&df, Some("missing")).unwrap_err();
        assert!(matches!(err, IngestError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_non_temporal_index() {
        let df = df! {
            "site" => ["a", "b"],
            "count" => [1_i64, 2],
        }
        .unwrap();
        let table = table_from_dataframe(&df, Some("site")).unwrap();
        assert_eq!(
            table.labels(),
            &RowLabels::Values(vec![Value::from("a"), Value::from("b")])
        );
        assert_eq!(table.columns()[0].name(), "count");
    }
}
