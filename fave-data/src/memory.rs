//! In-memory store with transactional sessions.
//!
//! [`MemoryStore`] holds committed rows per table. A [`MemorySession`]
//! stages adds and deletes on top of it: its own reads see the staged
//! changes, other sessions do not until [`MemorySession::commit`].
//! Key uniqueness is enforced both when staging and when committing, the
//! way a database unique index would reject the write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::entity::Entity;
use crate::error::DataError;
use crate::query::QueryBuilder;
use crate::session::{one_or_none, Session, FIND_ONE_LIMIT};
use crate::value::Row;

type Tables = HashMap<String, Vec<Row>>;

#[derive(Debug, Clone)]
enum Staged {
    Add {
        table: &'static str,
        key_columns: &'static [&'static str],
        row: Row,
    },
    Delete {
        key: QueryBuilder,
    },
}

impl Staged {
    fn apply(&self, tables: &mut Tables) -> Result<(), DataError> {
        match self {
            Staged::Add {
                table,
                key_columns,
                row,
            } => {
                let rows = tables.entry((*table).to_string()).or_default();
                let key = row.project(key_columns)?;
                for existing in rows.iter() {
                    if existing.project(key_columns)? == key {
                        return Err(DataError::UniqueViolation(format!(
                            "`{table}` already holds key {key:?}"
                        )));
                    }
                }
                rows.push(row.clone());
            }
            Staged::Delete { key } => {
                if let Some(rows) = tables.get_mut(key.table()) {
                    rows.retain(|row| !key.matches(row));
                }
            }
        }
        Ok(())
    }
}

/// Shared in-memory tables. Cloning yields another handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new unit of work against this store.
    pub fn session(&self) -> MemorySession {
        MemorySession {
            store: self.clone(),
            staged: Vec::new(),
        }
    }

    /// Committed rows of `table`.
    pub fn rows(&self, table: &str) -> Result<Vec<Row>, DataError> {
        Ok(self.lock()?.get(table).cloned().unwrap_or_default())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DataError> {
        self.tables
            .lock()
            .map_err(|_| DataError::Other("memory store lock poisoned".into()))
    }
}

/// A unit of work over a [`MemoryStore`]. Dropping it without
/// committing discards every staged change.
#[derive(Debug)]
pub struct MemorySession {
    store: MemoryStore,
    staged: Vec<Staged>,
}

impl MemorySession {
    /// Number of staged, uncommitted changes.
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    /// Apply all staged changes atomically.
    ///
    /// Fails without applying anything if a staged insert collides with a
    /// row committed by another session in the meantime.
    pub fn commit(self) -> Result<(), DataError> {
        let mut tables = self.store.lock()?;
        let mut next = tables.clone();
        for change in &self.staged {
            change.apply(&mut next)?;
        }
        *tables = next;
        tracing::debug!(changes = self.staged.len(), "memory session committed");
        Ok(())
    }

    /// Discard all staged changes.
    pub fn rollback(self) {
        tracing::debug!(changes = self.staged.len(), "memory session rolled back");
    }

    /// Rows of `table` as this session sees them.
    fn view(&self, table: &str) -> Result<Vec<Row>, DataError> {
        let mut tables = Tables::new();
        tables.insert(table.to_string(), self.store.rows(table)?);
        for change in &self.staged {
            let touches = match change {
                Staged::Add { table: t, .. } => *t == table,
                Staged::Delete { key } => key.table() == table,
            };
            if touches {
                change.apply(&mut tables)?;
            }
        }
        Ok(tables.remove(table).unwrap_or_default())
    }

    fn select(&self, query: &QueryBuilder) -> Result<Vec<Row>, DataError> {
        let matching = self
            .view(query.table())?
            .into_iter()
            .filter(|row| query.matches(row));
        Ok(match query.limit_value() {
            Some(limit) => matching.take(usize::try_from(limit).unwrap_or(usize::MAX)).collect(),
            None => matching.collect(),
        })
    }

    fn find_one_sync<E: Entity>(&self, query: &QueryBuilder) -> Result<Option<E>, DataError> {
        let query = query.clone().limit(FIND_ONE_LIMIT);
        let rows = self.select(&query)?;
        one_or_none(rows, &query)?
            .map(|row| E::from_row(&row))
            .transpose()
    }

    fn stage_add<E: Entity>(&mut self, entity: &E) -> Result<(), DataError> {
        let change = Staged::Add {
            table: E::table_name(),
            key_columns: E::key_columns(),
            row: entity.to_row(),
        };
        // Reject duplicates now, as a database would on flush.
        let mut view = Tables::new();
        view.insert(E::table_name().to_string(), self.view(E::table_name())?);
        change.apply(&mut view)?;
        self.staged.push(change);
        Ok(())
    }
}

impl Session for MemorySession {
    async fn find_one<E: Entity>(&mut self, query: &QueryBuilder) -> Result<Option<E>, DataError> {
        self.find_one_sync(query)
    }

    async fn count<E: Entity>(&mut self, query: &QueryBuilder) -> Result<u64, DataError> {
        let rows = self.select(query)?;
        Ok(rows.len() as u64)
    }

    async fn add<E: Entity>(&mut self, entity: &E) -> Result<(), DataError> {
        self.stage_add(entity)
    }

    async fn delete<E: Entity>(&mut self, entity: &E) -> Result<(), DataError> {
        let key = entity.key_query()?;
        self.staged.push(Staged::Delete { key });
        Ok(())
    }
}
