//! PostgreSQL rendering of predicates and a generic table-backed store.

use super::engine::{EntityStore, OrderBy};
use super::pagination::Window;
use super::predicate::{Op, Predicate, PredicateBuilder, SOFT_DELETE_FIELD, Value};
use crate::error::StorageError;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::marker::PhantomData;
use std::time::Instant;

/// A row type backed by one table. Every table carries `id`, `is_deleted`
/// and `updated_at` columns.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    const TABLE: &'static str;
    /// Comma separated select list.
    const COLUMNS: &'static str;
    /// Human readable name used in messages.
    const LABEL: &'static str;
}

/// Escape `%`, `_` and `\` so user input is matched literally by `LIKE`.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append ` WHERE ...` for a non-empty predicate. Field names come from code,
/// values are always bound.
pub fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    for (i, condition) in predicate.conditions().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(condition.field);
        match &condition.op {
            Op::Equals(Value::Text(v)) => {
                qb.push(" = ").push_bind(v.clone());
            }
            Op::Equals(Value::Int(v)) => {
                qb.push(" = ").push_bind(*v);
            }
            Op::Equals(Value::Bool(v)) => {
                qb.push(" = ").push_bind(*v);
            }
            Op::ContainsInsensitive(needle) => {
                qb.push(" ILIKE ")
                    .push_bind(format!("%{}%", escape_like(needle)))
                    .push(" ESCAPE '\\'");
            }
        }
    }
}

fn record_duration(table: &'static str, operation: &'static str, start: Instant) {
    metrics::histogram!(
        "db_query_duration_seconds",
        "table" => table,
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}

pub struct PgStore<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for PgStore<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> PgStore<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    /// Fetch one row by id. Soft-deleted rows are only visible when
    /// `include_deleted` is set.
    pub async fn find_by_id(&self, id: i64, include_deleted: bool) -> Result<Option<E>, StorageError> {
        let start = Instant::now();
        let base = if include_deleted {
            PredicateBuilder::including_deleted()
        } else {
            PredicateBuilder::active()
        };
        let predicate = base.eq("id", Some(id)).build();

        let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", E::COLUMNS, E::TABLE));
        push_predicate(&mut qb, &predicate);

        let row = qb.build_query_as::<E>().fetch_optional(&self.pool).await?;
        record_duration(E::TABLE, "find_by_id", start);
        Ok(row)
    }

    /// Mark a row deleted. Returns `None` when it does not exist or is
    /// already deleted.
    pub async fn soft_delete(&self, id: i64) -> Result<Option<E>, StorageError> {
        self.set_deleted(id, true).await
    }

    /// Undo a soft delete. Returns `None` when the row does not exist or is
    /// not deleted.
    pub async fn restore(&self, id: i64) -> Result<Option<E>, StorageError> {
        self.set_deleted(id, false).await
    }

    async fn set_deleted(&self, id: i64, deleted: bool) -> Result<Option<E>, StorageError> {
        let start = Instant::now();
        let mut qb = QueryBuilder::new(format!("UPDATE {} SET {} = ", E::TABLE, SOFT_DELETE_FIELD));
        qb.push_bind(deleted);
        qb.push(", updated_at = NOW() WHERE id = ");
        qb.push_bind(id);
        qb.push(format!(" AND {} = ", SOFT_DELETE_FIELD));
        qb.push_bind(!deleted);
        qb.push(format!(" RETURNING {}", E::COLUMNS));

        let row = qb.build_query_as::<E>().fetch_optional(&self.pool).await?;
        record_duration(E::TABLE, if deleted { "soft_delete" } else { "restore" }, start);
        Ok(row)
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for PgStore<E> {
    async fn count(&self, predicate: &Predicate) -> Result<u64, StorageError> {
        let start = Instant::now();
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
        push_predicate(&mut qb, predicate);

        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        record_duration(E::TABLE, "count", start);
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn fetch(
        &self,
        predicate: &Predicate,
        window: Window,
        order: &OrderBy,
    ) -> Result<Vec<E>, StorageError> {
        let start = Instant::now();
        let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", E::COLUMNS, E::TABLE));
        push_predicate(&mut qb, predicate);
        qb.push(format!(
            " ORDER BY {} {}",
            order.column,
            order.direction.as_sql()
        ));
        qb.push(" LIMIT ").push_bind(i64::from(window.limit));
        qb.push(" OFFSET ")
            .push_bind(i64::try_from(window.offset).unwrap_or(i64::MAX));

        let rows = qb.build_query_as::<E>().fetch_all(&self.pool).await?;
        record_duration(E::TABLE, "fetch", start);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(predicate: &Predicate) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM faqs");
        push_predicate(&mut qb, predicate);
        qb.sql().to_string()
    }

    #[test]
    fn base_predicate_renders_soft_delete_only() {
        let sql = render(&PredicateBuilder::active().build());
        assert_eq!(sql, "SELECT id FROM faqs WHERE is_deleted = $1");
    }

    #[test]
    fn empty_predicate_renders_no_where_clause() {
        let sql = render(&PredicateBuilder::including_deleted().build());
        assert_eq!(sql, "SELECT id FROM faqs");
    }

    #[test]
    fn conditions_are_joined_with_and_and_bound() {
        let predicate = PredicateBuilder::active()
            .published()
            .contains("title", Some("visa"))
            .eq("category", Some("travel"))
            .build();
        assert_eq!(
            render(&predicate),
            "SELECT id FROM faqs WHERE is_deleted = $1 AND is_published = $2 \
             AND title ILIKE $3 ESCAPE '\\' AND category = $4"
        );
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Dubai"), "Dubai");
    }
}
