mod memory;
mod postgrest;

pub use memory::MemoryTableStore;
pub use postgrest::PostgrestClient;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BackendError;

/// A table row as exchanged with the store.
pub type Row = serde_json::Map<String, Value>;

/// Equality filter on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether `row` satisfies the filter. Values are compared by their text
    /// form, the same way the REST gateway compares query-string operands.
    pub fn matches(&self, row: &Row) -> bool {
        row.get(&self.column)
            .is_some_and(|v| v == &self.value || value_text(v) == value_text(&self.value))
    }
}

/// Render a JSON scalar the way it appears in a query string.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".into(),
        other => other.to_string(),
    }
}

/// Row storage for named tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// All rows of `table`, optionally restricted by `filter`.
    async fn select(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Row>, BackendError>;

    /// Insert one row and return it as stored (with generated columns).
    async fn insert(&self, table: &str, row: Row) -> Result<Row, BackendError>;

    /// Apply `changes` to every row matching `filter`; return the updated rows.
    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        changes: Row,
    ) -> Result<Vec<Row>, BackendError>;

    /// Delete every row matching `filter`; return how many were removed.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, BackendError>;

    /// Cheap reachability check against `table`.
    async fn probe(&self, table: &str) -> Result<(), BackendError> {
        self.select(table, None).await.map(|_| ())
    }
}

/// Typed view over one table of a [`TableStore`].
pub struct Table<'a> {
    store: &'a dyn TableStore,
    name: &'a str,
}

impl<'a> Table<'a> {
    pub fn new(store: &'a dyn TableStore, name: &'a str) -> Self {
        Self { store, name }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub async fn select<T: DeserializeOwned>(&self) -> Result<Vec<T>, BackendError> {
        let rows = self.store.select(self.name, None).await?;
        rows.into_iter().map(from_row).collect()
    }

    pub async fn select_eq<T: DeserializeOwned>(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<Vec<T>, BackendError> {
        let filter = Filter::eq(column, value);
        let rows = self.store.select(self.name, Some(&filter)).await?;
        rows.into_iter().map(from_row).collect()
    }

    /// First row whose `column` equals `value`.
    pub async fn find_eq<T: DeserializeOwned>(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<Option<T>, BackendError> {
        let filter = Filter::eq(column, value);
        let rows = self.store.select(self.name, Some(&filter)).await?;
        rows.into_iter().next().map(from_row).transpose()
    }

    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        values: &T,
    ) -> Result<R, BackendError> {
        let row = self.store.insert(self.name, to_row(values)?).await?;
        from_row(row)
    }

    /// Update the rows whose `column` equals `value` and return the first one.
    pub async fn update_eq<T: Serialize, R: DeserializeOwned>(
        &self,
        column: &str,
        value: impl Into<Value>,
        changes: &T,
    ) -> Result<Option<R>, BackendError> {
        let filter = Filter::eq(column, value);
        let rows = self
            .store
            .update(self.name, &filter, to_row(changes)?)
            .await?;
        rows.into_iter().next().map(from_row).transpose()
    }

    pub async fn delete_eq(
        &self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<usize, BackendError> {
        let filter = Filter::eq(column, value);
        self.store.delete(self.name, &filter).await
    }
}

fn to_row<T: Serialize>(values: &T) -> Result<Row, BackendError> {
    match serde_json::to_value(values)? {
        Value::Object(row) => Ok(row),
        _ => Err(BackendError::Decode(<serde_json::Error as serde::ser::Error>::custom(
            "row must serialize to a JSON object",
        ))),
    }
}

fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, BackendError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}
