use super::pagination::{PageMeta, PaginationRequest, Window};
use super::predicate::Predicate;
use crate::error::StorageError;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }
}

impl Default for OrderBy {
    /// Newest first.
    fn default() -> Self {
        Self::desc("id")
    }
}

/// Everything a list call needs once the filter has been normalized.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub predicate: Predicate,
    pub pagination: PaginationRequest,
    pub order: OrderBy,
}

impl ListQuery {
    pub fn new(predicate: Predicate, pagination: PaginationRequest) -> Self {
        Self {
            predicate,
            pagination,
            order: OrderBy::default(),
        }
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<E> {
    pub data: Vec<E>,
    pub meta: PageMeta,
}

impl<E> Page<E> {
    pub fn new(data: Vec<E>, pagination: PaginationRequest, total: u64) -> Self {
        Self {
            data,
            meta: PageMeta::new(pagination, total),
        }
    }
}

/// Read side of a storage collection.
#[async_trait]
pub trait EntityStore<E>: Send + Sync {
    async fn count(&self, predicate: &Predicate) -> Result<u64, StorageError>;

    async fn fetch(
        &self,
        predicate: &Predicate,
        window: Window,
        order: &OrderBy,
    ) -> Result<Vec<E>, StorageError>;
}

/// Run the count and the windowed fetch concurrently and assemble the page.
/// Both must succeed; a failure of either fails the whole call.
pub async fn fetch_page<E, S>(store: &S, query: &ListQuery) -> Result<Page<E>, StorageError>
where
    S: EntityStore<E> + ?Sized,
    E: Send,
{
    let (total, data) = tokio::try_join!(
        store.count(&query.predicate),
        store.fetch(&query.predicate, query.pagination.window(), &query.order),
    )?;

    tracing::debug!(
        total = total,
        returned = data.len(),
        page = query.pagination.page(),
        per_page = query.pagination.per_page(),
        "Page fetched"
    );

    Ok(Page::new(data, query.pagination, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageErrorKind;
    use crate::query::memory::MemoryStore;
    use crate::query::predicate::{Filterable, PredicateBuilder, Value};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Branch {
        id: i64,
        title: String,
        is_deleted: bool,
    }

    impl Filterable for Branch {
        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "id" => Some(self.id.into()),
                "title" => Some(self.title.clone().into()),
                "is_deleted" => Some(self.is_deleted.into()),
                _ => None,
            }
        }
    }

    fn branch(id: i64, title: &str) -> Branch {
        Branch {
            id,
            title: title.to_string(),
            is_deleted: false,
        }
    }

    fn store_with(count: i64) -> MemoryStore<Branch> {
        MemoryStore::new((1..=count).map(|i| branch(i, &format!("Branch {}", i))).collect())
    }

    #[tokio::test]
    async fn page_is_ordered_newest_first_with_meta() {
        let store = store_with(26);
        let query = ListQuery::new(
            PredicateBuilder::active().build(),
            PaginationRequest::new(1, 25).unwrap(),
        );

        let page = fetch_page(&store, &query).await.unwrap();

        assert_eq!(page.data.len(), 25);
        assert_eq!(page.data[0].id, 26);
        assert_eq!(page.data[24].id, 2);
        assert_eq!(page.meta.total, 26);
        assert_eq!(page.meta.page_count, 2);
    }

    #[tokio::test]
    async fn last_page_holds_the_remainder() {
        let store = store_with(26);
        let query = ListQuery::new(
            PredicateBuilder::active().build(),
            PaginationRequest::new(2, 25).unwrap(),
        );

        let page = fetch_page(&store, &query).await.unwrap();

        assert_eq!(page.data, vec![branch(1, "Branch 1")]);
        assert_eq!(page.meta.page, 2);
    }

    #[tokio::test]
    async fn text_filter_narrows_count_and_rows() {
        let store = MemoryStore::new(vec![branch(1, "Dubai Office"), branch(2, "Cairo Branch")]);
        let query = ListQuery::new(
            PredicateBuilder::active().contains("title", Some("Dub")).build(),
            PaginationRequest::new(1, 10).unwrap(),
        );

        let page = fetch_page(&store, &query).await.unwrap();

        assert_eq!(page.data, vec![branch(1, "Dubai Office")]);
        assert_eq!(page.meta.total, 1);
        assert_eq!(page.meta.page_count, 1);
    }

    #[tokio::test]
    async fn empty_result_has_zero_pages() {
        let store = store_with(0);
        let query = ListQuery::new(
            PredicateBuilder::active().build(),
            PaginationRequest::new(1, 25).unwrap(),
        );

        let page = fetch_page(&store, &query).await.unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.meta.page_count, 0);
    }

    /// Count and fetch each wait on a barrier sized for two, so the page only
    /// completes if both queries are in flight together.
    struct RendezvousStore {
        barrier: Arc<tokio::sync::Barrier>,
    }

    #[async_trait]
    impl EntityStore<i64> for RendezvousStore {
        async fn count(&self, _predicate: &Predicate) -> Result<u64, StorageError> {
            self.barrier.wait().await;
            Ok(1)
        }

        async fn fetch(
            &self,
            _predicate: &Predicate,
            _window: Window,
            _order: &OrderBy,
        ) -> Result<Vec<i64>, StorageError> {
            self.barrier.wait().await;
            Ok(vec![7])
        }
    }

    #[tokio::test]
    async fn count_and_fetch_run_concurrently() {
        let store = RendezvousStore {
            barrier: Arc::new(tokio::sync::Barrier::new(2)),
        };
        let query = ListQuery::new(Predicate::default(), PaginationRequest::new(1, 10).unwrap());

        let page = tokio::time::timeout(Duration::from_secs(2), fetch_page(&store, &query))
            .await
            .expect("count and fetch should not run sequentially")
            .unwrap();

        assert_eq!(page.data, vec![7]);
    }

    struct FailingCountStore {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl EntityStore<i64> for FailingCountStore {
        async fn count(&self, _predicate: &Predicate) -> Result<u64, StorageError> {
            Err(StorageError::new(StorageErrorKind::ConnectionFailure, "connection reset")
                .with_code("08006"))
        }

        async fn fetch(
            &self,
            _predicate: &Predicate,
            _window: Window,
            _order: &OrderBy,
        ) -> Result<Vec<i64>, StorageError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1, 2, 3])
        }
    }

    #[tokio::test]
    async fn storage_failure_fails_the_whole_page() {
        let store = FailingCountStore {
            fetches: AtomicUsize::new(0),
        };
        let query = ListQuery::new(Predicate::default(), PaginationRequest::new(1, 10).unwrap());

        let err = fetch_page(&store, &query).await.unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::ConnectionFailure);
        assert_eq!(err.code.as_deref(), Some("08006"));
    }
}
