//! Filtered list queries: predicate building, pagination and the
//! count-plus-window fetch shared by every list endpoint.

pub mod engine;
pub mod memory;
pub mod pagination;
pub mod postgres;
pub mod predicate;

pub use engine::{EntityStore, ListQuery, OrderBy, Page, SortDirection, fetch_page};
pub use memory::MemoryStore;
pub use pagination::{
    DEFAULT_PAGE, MAX_PER_PAGE, PageMeta, PaginationError, PaginationRequest, Window, page_count,
};
pub use postgres::{Entity, PgStore, escape_like, push_predicate};
pub use predicate::{
    Condition, Filterable, Op, PUBLISHED_FIELD, Predicate, PredicateBuilder, SOFT_DELETE_FIELD,
    Value,
};
