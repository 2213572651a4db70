use super::engine::{EntityStore, OrderBy, SortDirection};
use super::pagination::Window;
use super::predicate::{Filterable, Predicate};
use crate::error::{StorageError, StorageErrorKind};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::RwLock;

/// In-process collection that evaluates predicates with [`Predicate::matches`].
/// Used by tests and local tooling in place of a database table.
pub struct MemoryStore<E> {
    rows: RwLock<Vec<E>>,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<E> MemoryStore<E>
where
    E: Filterable + Clone + Send + Sync,
{
    pub fn new(rows: Vec<E>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    pub fn insert(&self, row: E) -> Result<(), StorageError> {
        self.rows.write().map_err(poisoned)?.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> StorageError {
    StorageError::new(
        StorageErrorKind::Unknown,
        format!("memory store lock poisoned: {}", err),
    )
}

fn compare_by<E: Filterable>(a: &E, b: &E, order: &OrderBy) -> Ordering {
    let ordering = match (a.field(order.column), b.field(order.column)) {
        (Some(x), Some(y)) => x.compare(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    match order.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl<E> EntityStore<E> for MemoryStore<E>
where
    E: Filterable + Clone + Send + Sync + 'static,
{
    async fn count(&self, predicate: &Predicate) -> Result<u64, StorageError> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.iter().filter(|row| predicate.matches(*row)).count() as u64)
    }

    async fn fetch(
        &self,
        predicate: &Predicate,
        window: Window,
        order: &OrderBy,
    ) -> Result<Vec<E>, StorageError> {
        let mut matched: Vec<E> = {
            let rows = self.rows.read().map_err(poisoned)?;
            rows.iter()
                .filter(|row| predicate.matches(*row))
                .cloned()
                .collect()
        };
        matched.sort_by(|a, b| compare_by(a, b, order));

        Ok(matched
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(window.limit as usize)
            .collect())
    }
}
