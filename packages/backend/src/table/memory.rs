use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::{Filter, Row, TableStore, value_text};
use crate::error::BackendError;

#[derive(Default)]
struct TableData {
    next_id: i64,
    rows: Vec<Row>,
}

/// In-process table store. Rows without an `id` get a sequential integer id,
/// mirroring a serial primary key.
#[derive(Default)]
pub struct MemoryTableStore {
    tables: DashMap<String, TableData>,
    unique: Vec<(String, String)>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce a unique constraint on `table.column`.
    pub fn with_unique(mut self, table: &str, column: &str) -> Self {
        self.unique.push((table.to_string(), column.to_string()));
        self
    }

    fn unique_columns<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.unique
            .iter()
            .filter(move |(t, _)| t == table)
            .map(|(_, c)| c.as_str())
    }

    fn check_unique(
        &self,
        table: &str,
        rows: &[Row],
        candidate: &Row,
        skip: Option<usize>,
    ) -> Result<(), BackendError> {
        for column in self.unique_columns(table) {
            let Some(value) = candidate.get(column) else {
                continue;
            };
            let filter = Filter::eq(column, value.clone());
            let clash = rows
                .iter()
                .enumerate()
                .any(|(i, row)| Some(i) != skip && filter.matches(row));
            if clash {
                return Err(BackendError::api(
                    409,
                    format!(
                        "duplicate key value violates unique constraint \"{table}_{column}_key\" ({column}={})",
                        value_text(value)
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn select(&self, table: &str, filter: Option<&Filter>) -> Result<Vec<Row>, BackendError> {
        let Some(data) = self.tables.get(table) else {
            return Ok(Vec::new());
        };
        Ok(data
            .rows
            .iter()
            .filter(|row| filter.is_none_or(|f| f.matches(row)))
            .cloned()
            .collect())
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Row, BackendError> {
        let mut data = self.tables.entry(table.to_string()).or_default();

        if row.get("id").is_none_or(Value::is_null) {
            data.next_id += 1;
            row.insert("id".into(), Value::from(data.next_id));
        }
        self.check_unique(table, &data.rows, &row, None)?;

        data.rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        changes: Row,
    ) -> Result<Vec<Row>, BackendError> {
        let Some(mut data) = self.tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let targets: Vec<usize> = data
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| filter.matches(row))
            .map(|(i, _)| i)
            .collect();

        let mut updated = Vec::with_capacity(targets.len());
        for i in targets {
            let mut candidate = data.rows[i].clone();
            candidate.extend(changes.clone());
            self.check_unique(table, &data.rows, &candidate, Some(i))?;
            data.rows[i] = candidate.clone();
            updated.push(candidate);
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<usize, BackendError> {
        let Some(mut data) = self.tables.get_mut(table) else {
            return Ok(0);
        };
        let before = data.rows.len();
        data.rows.retain(|row| !filter.matches(row));
        Ok(before - data.rows.len())
    }
}
