//! In-memory table shared by the repositories

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A row with an integer primary key
pub trait Record: Clone + Send + Sync {
    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> i32 {
                    self.id
                }

                fn set_id(&mut self, id: i32) {
                    self.id = id;
                }
            }
        )*
    };
}

impl_record!(
    crate::models::Book,
    crate::models::IcsEquipment,
    crate::models::ParEquipment,
    crate::models::Transaction,
    crate::models::Borrower,
);

/// Next primary key: one past the largest id, or 1 for an empty table
pub fn next_id<T: Record>(rows: &[T]) -> i32 {
    rows.iter().map(Record::id).max().map_or(1, |max| max + 1)
}

/// Ordered rows behind an async lock. Clones share the same rows.
#[derive(Clone)]
pub struct Table<T> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> Table<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.rows.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.rows.write().await
    }

    /// Snapshot of all rows in insertion order
    pub async fn list(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn get(&self, id: i32) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.id() == id).cloned()
    }

    /// Append a row, assigning it the next id
    pub async fn insert(&self, mut row: T) -> T {
        let mut rows = self.rows.write().await;
        row.set_id(next_id(&rows));
        rows.push(row.clone());
        row
    }

    /// Apply `f` to the row with `id`, returning the updated row
    pub async fn update<F>(&self, id: i32, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let row = rows.iter_mut().find(|r| r.id() == id)?;
        f(row);
        Some(row.clone())
    }

    /// Remove exactly the row with `id`
    pub async fn remove(&self, id: i32) -> Option<T> {
        let mut rows = self.rows.write().await;
        let pos = rows.iter().position(|r| r.id() == id)?;
        Some(rows.remove(pos))
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Borrower, BorrowerRole};

    fn borrower(id: i32, name: &str) -> Borrower {
        Borrower {
            id,
            name: name.to_string(),
            role: BorrowerRole::Student,
        }
    }

    #[tokio::test]
    async fn insert_uses_max_id_plus_one() {
        let table = Table::new(vec![borrower(3, "a"), borrower(7, "b"), borrower(5, "c")]);
        let added = table.insert(borrower(0, "d")).await;
        assert_eq!(added.id, 8);
        assert_eq!(table.len().await, 4);
    }

    #[tokio::test]
    async fn insert_into_empty_table_starts_at_one() {
        let table: Table<Borrower> = Table::default();
        assert!(table.is_empty().await);
        assert_eq!(table.insert(borrower(42, "a")).await.id, 1);
    }

    #[tokio::test]
    async fn remove_only_touches_the_given_id() {
        let table = Table::new(vec![borrower(1, "a"), borrower(2, "b"), borrower(3, "c")]);
        assert_eq!(table.remove(2).await.map(|b| b.name), Some("b".to_string()));
        assert!(table.remove(2).await.is_none());
        let ids: Vec<i32> = table.list().await.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn update_returns_new_state() {
        let table = Table::new(vec![borrower(1, "a")]);
        let updated = table.update(1, |b| b.name = "z".to_string()).await;
        assert_eq!(updated.map(|b| b.name), Some("z".to_string()));
        assert!(table.update(9, |_| {}).await.is_none());
    }
}
