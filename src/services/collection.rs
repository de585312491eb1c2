//! Generic record collection persisted as one JSON array.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::{paginate, PageRequest, Paginated};
use crate::store::Store;

/// A record kept in a [`Collection`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Store key holding the JSON array.
    const COLLECTION_KEY: &'static str;
    /// Human readable record kind, used in error messages.
    const LABEL: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

/// CRUD over an array of records stored under a single key.
///
/// The whole array is read for every operation and rewritten on every mutation. Mutations are
/// serialised so that two concurrent inserts never read the same snapshot.
pub struct Collection<R: Record> {
    store: Store,
    seed: Vec<R>,
    write_lock: Arc<Mutex<()>>,
}

impl<R: Record> Clone for Collection<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            seed: self.seed.clone(),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<R: Record> Collection<R> {
    /// A collection that starts out empty.
    pub fn new(store: Store) -> Self {
        Self::with_seed(store, Vec::new())
    }

    /// A collection that reads as `seed` until it is first written.
    pub fn with_seed(store: Store, seed: Vec<R>) -> Self {
        Self {
            store,
            seed,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load every record in insertion order.
    pub async fn load(&self) -> Result<Vec<R>, AppError> {
        self.store.read_or(R::COLLECTION_KEY, self.seed.clone()).await
    }

    /// Key of the blob holding the smallest id never handed out.
    fn next_id_key(&self) -> String {
        format!("{}_next_id", R::COLLECTION_KEY)
    }

    async fn save(&self, records: &[R]) -> Result<(), AppError> {
        self.store.write(R::COLLECTION_KEY, records).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<R>, AppError> {
        Ok(self.load().await?.into_iter().find(|r| r.id() == id))
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        Ok(self.load().await?.len())
    }

    /// Records matching `predicate`, sliced to the requested page.
    pub async fn query<F>(&self, predicate: F, page: PageRequest) -> Result<Paginated<R>, AppError>
    where
        F: Fn(&R) -> bool,
    {
        let matched: Vec<R> = self
            .load()
            .await?
            .into_iter()
            .filter(|r| predicate(r))
            .collect();
        paginate(matched, page)
    }

    /// Append `record` under a fresh id.
    ///
    /// `check` sees the new record and the current collection and can reject the insert, in which
    /// case nothing is written.
    pub async fn insert<F>(&self, mut record: R, check: F) -> Result<R, AppError>
    where
        F: FnOnce(&R, &[R]) -> Result<(), AppError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        check(&record, records.as_slice())?;

        let high_water: Option<i64> = self.store.read(&self.next_id_key()).await?;
        let id = next_id(&records, high_water)?;
        let mark = next_free(id)?;
        record.set_id(id);
        records.push(record.clone());
        self.save(&records).await?;
        self.store.write(&self.next_id_key(), &mark).await?;

        tracing::info!(
            collection = R::COLLECTION_KEY,
            id = record.id(),
            "Created {}",
            R::LABEL
        );
        Ok(record)
    }

    /// Apply `change` to the record with `id` and persist.
    ///
    /// `change` receives a copy of the record and the full collection. Returning an error leaves
    /// the collection untouched. Every other record is written back unchanged.
    pub async fn update<F>(&self, id: i64, change: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut R, &[R]) -> Result<(), AppError>,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", R::LABEL, id)))?;

        let mut updated = records[index].clone();
        change(&mut updated, records.as_slice())?;
        updated.set_id(id);

        records[index] = updated.clone();
        self.save(&records).await?;

        tracing::info!(
            collection = R::COLLECTION_KEY,
            id,
            "Updated {}",
            R::LABEL
        );
        Ok(updated)
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            tracing::warn!(
                collection = R::COLLECTION_KEY,
                id,
                "{} already absent, nothing to delete",
                R::LABEL
            );
            return Ok(false);
        }

        self.save(&records).await?;
        tracing::info!(
            collection = R::COLLECTION_KEY,
            id,
            "Deleted {}",
            R::LABEL
        );
        Ok(true)
    }
}

/// Id for the next insert: past every live id and past every id handed out before, starting at 1.
///
/// Ids of deleted records are never reused, so orphaned references stay orphaned.
fn next_id<R: Record>(records: &[R], high_water: Option<i64>) -> Result<i64, AppError> {
    let past_live = match records.iter().map(Record::id).max() {
        Some(max) => next_free(max)?,
        None => 1,
    };
    Ok(past_live.max(high_water.unwrap_or(1)))
}

fn next_free(id: i64) -> Result<i64, AppError> {
    id.checked_add(1)
        .ok_or_else(|| AppError::Internal("Record ids exhausted".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Serialize, Deserialize)]
    struct Item {
        id: i64,
    }

    impl Record for Item {
        const COLLECTION_KEY: &'static str = "items";
        const LABEL: &'static str = "Item";

        fn id(&self) -> i64 {
            self.id
        }

        fn set_id(&mut self, id: i64) {
            self.id = id;
        }
    }

    fn items(ids: &[i64]) -> Vec<Item> {
        ids.iter().map(|&id| Item { id }).collect()
    }

    #[test]
    fn test_next_id_starts_at_one() {
        assert_eq!(next_id::<Item>(&[], None).unwrap(), 1);
    }

    #[test]
    fn test_next_id_skips_past_live_ids() {
        assert_eq!(next_id(&items(&[1, 5, 3]), None).unwrap(), 6);
        assert_eq!(next_id(&items(&[1, 5, 3]), Some(2)).unwrap(), 6);
    }

    #[test]
    fn test_next_id_never_reuses_handed_out_ids() {
        // Tail record 6 was deleted; the mark still says 7
        assert_eq!(next_id(&items(&[1, 2]), Some(7)).unwrap(), 7);
        assert_eq!(next_id::<Item>(&[], Some(4)).unwrap(), 4);
    }

    #[test]
    fn test_next_id_overflow_is_internal_error() {
        let err = next_id(&items(&[i64::MAX]), None).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
