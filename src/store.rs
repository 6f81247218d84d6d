//! Record store implementations and query scoping.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::StoreError;
use crate::traits::{Record, RecordStore};
use crate::types::Identifier;

/// A query-narrowing function: receives the base store for a collection and
/// returns the store lookups should actually run against.
pub type QueryScope<R> =
    Arc<dyn Fn(Arc<dyn RecordStore<R>>) -> Arc<dyn RecordStore<R>> + Send + Sync>;

/// Build a [`QueryScope`] that hides every record failing `predicate`.
pub fn scope_where<R, F>(predicate: F) -> QueryScope<R>
where
    R: Record + 'static,
    F: Fn(&R) -> bool + Send + Sync + 'static,
{
    let predicate: Arc<dyn Fn(&R) -> bool + Send + Sync> = Arc::new(predicate);
    Arc::new(move |inner: Arc<dyn RecordStore<R>>| -> Arc<dyn RecordStore<R>> {
        Arc::new(ScopedStore {
            inner,
            predicate: Arc::clone(&predicate),
        })
    })
}

fn check_column<R: Record>(column: &str) -> Result<(), StoreError> {
    if R::columns().contains(&column) {
        Ok(())
    } else {
        Err(StoreError::UnknownColumn {
            collection: R::collection().to_string(),
            column: column.to_string(),
        })
    }
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(err: PoisonError<T>) -> Self {
        StoreError::PoisonedLock(err.to_string())
    }
}

/// An in-process collection of records, kept in insertion order.
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        MemoryStore {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R: Record> MemoryStore<R> {
    pub fn new<I: IntoIterator<Item = R>>(records: I) -> Self {
        MemoryStore {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    pub fn insert(&self, record: R) -> Result<(), StoreError> {
        self.records.write()?.push(record);
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl<R: Record> RecordStore<R> for MemoryStore<R> {
    fn find_one(&self, column: &str, value: &Identifier) -> Result<Option<R>, StoreError> {
        check_column::<R>(column)?;
        let guard = self.records.read()?;
        let mut matches = guard
            .iter()
            .filter(|r| r.column(column).as_ref() == Some(value));
        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(StoreError::Backend(format!(
                "multiple {} records match {column} = {value}",
                R::collection()
            )));
        }
        Ok(first)
    }

    fn find_many(&self, column: &str, values: &BTreeSet<Identifier>) -> Result<Vec<R>, StoreError> {
        check_column::<R>(column)?;
        let guard = self.records.read()?;
        Ok(guard
            .iter()
            .filter(|r| r.column(column).is_some_and(|v| values.contains(&v)))
            .cloned()
            .collect())
    }
}

/// A store narrowed to the records accepted by a predicate.
pub struct ScopedStore<R> {
    inner: Arc<dyn RecordStore<R>>,
    predicate: Arc<dyn Fn(&R) -> bool + Send + Sync>,
}

impl<R> ScopedStore<R> {
    pub fn new<F>(inner: Arc<dyn RecordStore<R>>, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        ScopedStore {
            inner,
            predicate: Arc::new(predicate),
        }
    }
}

impl<R> RecordStore<R> for ScopedStore<R> {
    fn find_one(&self, column: &str, value: &Identifier) -> Result<Option<R>, StoreError> {
        Ok(self
            .inner
            .find_one(column, value)?
            .filter(|r| (self.predicate)(r)))
    }

    fn find_many(&self, column: &str, values: &BTreeSet<Identifier>) -> Result<Vec<R>, StoreError> {
        Ok(self
            .inner
            .find_many(column, values)?
            .into_iter()
            .filter(|r| (self.predicate)(r))
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct Event {
        pub id: i64,
        pub slug: String,
        pub deleted: bool,
    }

    impl Event {
        pub fn new(id: i64, slug: &str) -> Self {
            Event {
                id,
                slug: slug.to_string(),
                deleted: false,
            }
        }

        pub fn deleted(mut self) -> Self {
            self.deleted = true;
            self
        }
    }

    impl Record for Event {
        fn collection() -> &'static str {
            "events"
        }

        fn primary_key() -> &'static [&'static str] {
            &["id"]
        }

        fn columns() -> &'static [&'static str] {
            &["id", "slug"]
        }

        fn column(&self, name: &str) -> Option<Identifier> {
            match name {
                "id" => Some(Identifier::Integer(self.id)),
                "slug" => Some(Identifier::Text(self.slug.clone())),
                _ => None,
            }
        }
    }

    pub(crate) fn event_store() -> Arc<MemoryStore<Event>> {
        Arc::new(MemoryStore::new(vec![
            Event::new(1, "kickoff"),
            Event::new(2, "review"),
            Event::new(3, "retro"),
            Event::new(4, "archived").deleted(),
        ]))
    }

    #[test]
    fn test_memory_store_find_one() {
        let store = event_store();
        let found = store.find_one("id", &Identifier::Integer(2)).unwrap();
        assert_eq!(found.map(|e| e.slug), Some("review".to_string()));
        assert!(store.find_one("id", &Identifier::Integer(99)).unwrap().is_none());
    }

    #[test]
    fn test_memory_store_find_one_does_not_cross_kinds() {
        let store = event_store();
        assert!(store.find_one("id", &Identifier::from("2")).unwrap().is_none());
    }

    #[test]
    fn test_memory_store_find_many() {
        let store = event_store();
        let wanted: BTreeSet<Identifier> = ["retro", "kickoff", "nope"]
            .into_iter()
            .map(Identifier::from)
            .collect();
        let found = store.find_many("slug", &wanted).unwrap();
        assert_eq!(found.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_memory_store_find_one_rejects_ambiguous_match() {
        let store = MemoryStore::new(vec![Event::new(1, "retro"), Event::new(5, "retro")]);
        assert_eq!(
            store.find_one("slug", &Identifier::from("retro")),
            Err(StoreError::Backend(
                "multiple events records match slug = retro".to_string()
            ))
        );
        assert!(store.find_one("id", &Identifier::Integer(5)).unwrap().is_some());
    }

    #[test]
    fn test_memory_store_rejects_unknown_column() {
        let store = event_store();
        let err = store.find_one("title", &Identifier::from("x")).unwrap_err();
        assert_eq!(
            err,
            StoreError::UnknownColumn {
                collection: "events".to_string(),
                column: "title".to_string()
            }
        );
    }

    #[test]
    fn test_memory_store_insert() {
        let store: MemoryStore<Event> = MemoryStore::default();
        assert!(store.is_empty().unwrap());
        store.insert(Event::new(10, "new")).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_scope_where_hides_records() {
        let base: Arc<dyn RecordStore<Event>> = event_store();
        let scope = scope_where(|e: &Event| !e.deleted);
        let scoped = scope(base);
        assert!(scoped.find_one("id", &Identifier::Integer(4)).unwrap().is_none());
        assert!(scoped.find_one("id", &Identifier::Integer(1)).unwrap().is_some());

        let all: BTreeSet<Identifier> = (1..=4).map(Identifier::Integer).collect();
        assert_eq!(scoped.find_many("id", &all).unwrap().len(), 3);
    }

    #[test]
    fn test_scoped_store_new() {
        let base: Arc<dyn RecordStore<Event>> = event_store();
        let scoped = ScopedStore::new(base, |e: &Event| e.id > 2);
        assert!(scoped.find_one("slug", &Identifier::from("kickoff")).unwrap().is_none());
        assert!(scoped.find_one("slug", &Identifier::from("retro")).unwrap().is_some());
    }
}
