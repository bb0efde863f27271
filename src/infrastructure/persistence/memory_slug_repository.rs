//! In-memory implementation of the slug repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{NewSlugRecord, SlugRecord};
use crate::domain::repositories::SlugRepository;
use crate::error::AppError;

/// In-memory slug store backed by a [`DashMap`].
///
/// DashMap shards its locks, so lookups and inserts on different slugs do not
/// block each other. Inserts go through the entry API, which holds the shard
/// lock between the occupancy check and the write; two racing inserts of the
/// same slug therefore cannot both succeed.
///
/// Contents live only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySlugRepository {
    records: DashMap<String, SlugRecord>,
}

impl MemorySlugRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl SlugRepository for MemorySlugRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<SlugRecord>, AppError> {
        Ok(self.records.get(slug).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError> {
        new_record.ensure_insertable()?;

        match self.records.entry(new_record.slug.clone()) {
            Entry::Occupied(_) => Err(AppError::slug_exists(&new_record.slug)),
            Entry::Vacant(vacant) => {
                let record = new_record.into_record(Utc::now());
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
