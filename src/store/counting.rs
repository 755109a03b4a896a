//! Round-trip accounting wrapper
//!
//! Every store call is a network round trip in production, so the number of calls is
//! the cost that matters. `CountingStore` forwards to an inner store and counts calls
//! per operation.

use super::{AdjacencyStore, PrincipalStore, StoreResult};
use crate::model::{ActorId, Principal, Title, TitleId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct CountingStore<S> {
    inner: S,
    titles_calls: AtomicUsize,
    co_star_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            titles_calls: AtomicUsize::new(0),
            co_star_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn titles_calls(&self) -> usize {
        self.titles_calls.load(Ordering::SeqCst)
    }

    pub fn co_star_calls(&self) -> usize {
        self.co_star_calls.load(Ordering::SeqCst)
    }

    /// `titles_for` plus `co_stars_for` calls
    pub fn adjacency_calls(&self) -> usize {
        self.titles_calls() + self.co_star_calls()
    }

    /// `PrincipalStore` calls
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.titles_calls.store(0, Ordering::SeqCst);
        self.co_star_calls.store(0, Ordering::SeqCst);
        self.lookup_calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: AdjacencyStore> AdjacencyStore for CountingStore<S> {
    async fn titles_for(&self, actor: &ActorId) -> StoreResult<Vec<TitleId>> {
        self.titles_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.titles_for(actor).await
    }

    async fn co_stars_for(&self, title: &TitleId, exclude: &ActorId) -> StoreResult<Vec<ActorId>> {
        self.co_star_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.co_stars_for(title, exclude).await
    }
}

#[async_trait]
impl<S: PrincipalStore> PrincipalStore for CountingStore<S> {
    async fn principals_named(&self, name: &str) -> StoreResult<Vec<Principal>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.principals_named(name).await
    }

    async fn principal(&self, id: &ActorId) -> StoreResult<Option<Principal>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.principal(id).await
    }

    async fn title(&self, id: &TitleId) -> StoreResult<Option<Title>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.title(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_counts_per_operation() {
        let mut inner = MemoryStore::new();
        inner
            .add_title(Title::movie("tt0095016", "Die Hard"))
            .cast("tt0095016", &["nm0000246", "nm0000614"]);
        let store = CountingStore::new(inner);

        let willis = ActorId::new("nm0000246");
        let titles = store.titles_for(&willis).await.unwrap();
        for t in &titles {
            store.co_stars_for(t, &willis).await.unwrap();
        }
        store.principal(&willis).await.unwrap();

        assert_eq!(store.titles_calls(), 1);
        assert_eq!(store.co_star_calls(), 1);
        assert_eq!(store.adjacency_calls(), 2);
        assert_eq!(store.lookup_calls(), 1);

        store.reset();
        assert_eq!(store.adjacency_calls(), 0);
    }
}
