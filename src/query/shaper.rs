//! Result shaping.
//!
//! Converts a live SQLite row cursor into column names and [`Value`] rows.
//! Column metadata is read once; each column gets a [`ColumnKind`] from its
//! declared type, and every cell in that column is decoded as that kind.
//! Only columns without a declared type (expressions) fall back to the
//! storage class of each cell. Column names are reported exactly as the
//! engine gives them: unquoted names keep their declared case.
//! The shaper never owns the cursor: the caller opens it and drops it.

use crate::db::{Row, Value};
use crate::error::{Result, SandboxError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::NaiveDate;
use futures::{Stream, TryStreamExt};
use sqlx::sqlite::{SqliteColumn, SqliteRow, SqliteValueRef};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

/// Output format for normalized dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// How cells of a column are decoded, decided once from the declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Calendar date, normalized to `YYYY-MM-DD` text.
    Date,
    /// Boolean stored as an integer.
    Bool,
    /// Integer affinity.
    Int,
    /// Real or numeric affinity, including DECIMAL.
    Float,
    /// Text affinity.
    Text,
    /// No usable declared type: each cell keeps its storage class.
    Native,
}

impl ColumnKind {
    /// Resolves the kind from a declared type name using SQLite's affinity
    /// rules. DATE and BOOLEAN are matched exactly first.
    pub fn from_type_name(type_name: &str) -> Self {
        let name = type_name.trim().to_uppercase();
        match name.as_str() {
            "DATE" => return Self::Date,
            "BOOL" | "BOOLEAN" => return Self::Bool,
            _ => {}
        }

        let has = |needle: &str| name.contains(needle);
        if has("INT") {
            Self::Int
        } else if has("CHAR") || has("CLOB") || has("TEXT") {
            Self::Text
        } else if ["REAL", "FLOA", "DOUB", "DEC", "NUMERIC"].iter().any(|n| name.contains(n)) {
            Self::Float
        } else {
            Self::Native
        }
    }
}

/// SQLite's runtime storage class for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StorageClass {
    Null,
    Integer,
    Real,
    Text,
    Blob,
}

impl StorageClass {
    fn of(raw: &SqliteValueRef<'_>) -> Self {
        if raw.is_null() {
            return Self::Null;
        }
        match raw.type_info().name() {
            "INTEGER" | "BOOLEAN" => Self::Integer,
            "REAL" => Self::Real,
            "BLOB" => Self::Blob,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
struct ShapedColumn {
    name: String,
    kind: ColumnKind,
}

/// Per-statement shaping plan built from result-set metadata.
#[derive(Debug, Clone)]
pub struct ResultShaper {
    columns: Vec<ShapedColumn>,
}

impl ResultShaper {
    /// Builds a shaper from the statement's column metadata.
    pub fn from_metadata(metadata: &[SqliteColumn]) -> Self {
        let columns = metadata
            .iter()
            .map(|col| ShapedColumn {
                name: col.name().to_string(),
                kind: ColumnKind::from_type_name(col.type_info().name()),
            })
            .collect();
        Self { columns }
    }

    /// Column names in positional order, duplicates preserved.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Resolved kind of every column.
    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        self.columns.iter().map(|c| c.kind).collect()
    }

    /// Number of columns every shaped row will have.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Shapes one row.
    pub fn shape_row(&self, row: &SqliteRow) -> Result<Row> {
        if row.len() != self.width() {
            return Err(SandboxError::execution(format!(
                "row has {} columns but the result set declares {}",
                row.len(),
                self.width()
            )));
        }

        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| decode_cell(row, index, column))
            .collect()
    }
}

/// Drains `cursor`, shaping every row against `metadata`.
///
/// On any failure the rows shaped so far are discarded.
pub async fn shape<S>(metadata: &[SqliteColumn], cursor: &mut S) -> Result<(Vec<String>, Vec<Row>)>
where
    S: Stream<Item = std::result::Result<SqliteRow, sqlx::Error>> + Unpin,
{
    let shaper = ResultShaper::from_metadata(metadata);
    let mut rows = Vec::new();

    while let Some(row) = cursor.try_next().await? {
        rows.push(shaper.shape_row(&row)?);
    }

    Ok((shaper.column_names(), rows))
}

fn decode_cell(row: &SqliteRow, index: usize, column: &ShapedColumn) -> Result<Value> {
    let storage = StorageClass::of(&row.try_get_raw(index)?);

    match (column.kind, storage) {
        (_, StorageClass::Null) => Ok(Value::Null),
        (ColumnKind::Date, _) => decode_date(row, index, column, storage),
        (ColumnKind::Bool, StorageClass::Integer) => {
            let flag: i64 = row.try_get(index)?;
            Ok(Value::Bool(flag != 0))
        }
        (ColumnKind::Int, StorageClass::Integer | StorageClass::Real) => {
            Ok(Value::Int(row.try_get_unchecked::<i64, _>(index)?))
        }
        (ColumnKind::Float, StorageClass::Integer | StorageClass::Real) => {
            Ok(Value::Float(row.try_get_unchecked::<f64, _>(index)?))
        }
        (ColumnKind::Int | ColumnKind::Float, _) => Err(SandboxError::execution(format!(
            "column '{}' is declared numeric but holds a non-numeric value",
            column.name
        ))),
        (ColumnKind::Text, StorageClass::Blob) => decode_native(row, index, storage),
        (ColumnKind::Text, _) => Ok(Value::String(
            row.try_get_unchecked::<String, _>(index)?,
        )),
        _ => decode_native(row, index, storage),
    }
}

fn decode_date(
    row: &SqliteRow,
    index: usize,
    column: &ShapedColumn,
    storage: StorageClass,
) -> Result<Value> {
    if storage != StorageClass::Text {
        return Err(SandboxError::execution(format!(
            "column '{}' is declared DATE but holds a non-text value",
            column.name
        )));
    }

    let text: String = row.try_get(index)?;
    let date = parse_date(&text).ok_or_else(|| {
        SandboxError::execution(format!(
            "value '{text}' in DATE column '{}' is not a valid date",
            column.name
        ))
    })?;
    Ok(Value::String(date.format(DATE_FORMAT).to_string()))
}

fn decode_native(row: &SqliteRow, index: usize, storage: StorageClass) -> Result<Value> {
    let value = match storage {
        StorageClass::Null => Value::Null,
        StorageClass::Integer => Value::Int(row.try_get::<i64, _>(index)?),
        StorageClass::Real => Value::Float(row.try_get::<f64, _>(index)?),
        StorageClass::Text => Value::String(row.try_get::<String, _>(index)?),
        StorageClass::Blob => Value::String(BASE64.encode(row.try_get::<Vec<u8>, _>(index)?)),
    };
    Ok(value)
}

/// Parses a stored date, accepting a trailing time part.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok().or_else(|| {
        text.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
    })
}
