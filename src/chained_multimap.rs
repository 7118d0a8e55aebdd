//! ChainedMultimap: fixed bucket array with separate chaining, no resize.
//!
//! Buckets are selected with `djb2(key) % bucket_count`. The bucket count is
//! arbitrary and never changes, so modulo indexing is used throughout. Chain
//! nodes live in a `SlotMap` arena and link to each other by generational
//! key rather than by pointer.

use crate::error::{ArgumentError, TableError};
use crate::hash::djb2;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<V> {
    key: Box<[u8]>,
    value: V,
    hash: u32,
    next: Option<DefaultKey>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Chain {
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

/// Byte-keyed multimap over a fixed number of chained buckets.
#[derive(Debug)]
pub struct ChainedMultimap<V> {
    buckets: Box<[Chain]>,
    nodes: SlotMap<DefaultKey, Node<V>>,
}

impl<V> ChainedMultimap<V> {
    pub fn with_buckets(count: usize) -> Result<Self, TableError> {
        if count == 0 {
            return Err(ArgumentError::ZeroCapacity.into());
        }
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(count)
            .map_err(|_| TableError::alloc(count))?;
        buckets.resize(count, Chain::default());
        tracing::debug!(buckets = count, "created chained multimap");
        Ok(Self {
            buckets: buckets.into_boxed_slice(),
            nodes: SlotMap::with_key(),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_of(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    /// Appends `value` to the chain for `key`. Existing entries with the
    /// same key are kept.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<(), TableError> {
        if key.is_empty() {
            return Err(ArgumentError::EmptyKey.into());
        }
        let mut owned = Vec::new();
        owned
            .try_reserve_exact(key.len())
            .map_err(|_| TableError::alloc(key.len()))?;
        owned.extend_from_slice(key);

        let hash = djb2(key);
        let bucket = self.bucket_of(hash);
        let node = self.nodes.insert(Node {
            key: owned.into_boxed_slice(),
            value,
            hash,
            next: None,
        });
        let chain = &mut self.buckets[bucket];
        match chain.tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(tail) => tail.next = Some(node),
            None => chain.head = Some(node),
        }
        chain.tail = Some(node);
        Ok(())
    }

    /// Every value stored under `key`, oldest first.
    pub fn get_all<'a>(&'a self, key: &'a [u8]) -> impl Iterator<Item = &'a V> + 'a {
        let hash = djb2(key);
        self.chain(self.bucket_of(hash))
            .filter(move |n| n.hash == hash && &*n.key == key)
            .map(|n| &n.value)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get_all(key).next().is_some()
    }

    /// All entries, bucket by bucket and in chain order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &V)> + '_ {
        (0..self.buckets.len())
            .flat_map(move |b| self.chain(b))
            .map(|n| (&*n.key, &n.value))
    }

    fn chain(&self, bucket: usize) -> ChainIter<'_, V> {
        ChainIter {
            nodes: &self.nodes,
            next: self.buckets[bucket].head,
        }
    }
}

struct ChainIter<'a, V> {
    nodes: &'a SlotMap<DefaultKey, Node<V>>,
    next: Option<DefaultKey>,
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = &'a Node<V>;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next;
        Some(node)
    }
}
