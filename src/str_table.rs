//! StrTable: open-addressing, linear-probing table from owned string keys to values.

use crate::config::TableConfig;
use crate::error::TableError;
use crate::hash::djb2_str;

#[derive(Debug)]
struct Entry<V> {
    key: Box<str>,
    value: V,
    hash: u32,
}

type Slots<V> = Box<[Option<Entry<V>>]>;

/// Resizable open-addressing hash table keyed by short strings.
///
/// Capacity is always a power of two and slots are indexed with
/// `hash & (capacity - 1)`. Collisions probe forward one slot at a time,
/// wrapping at the end of the array. The table doubles before an insert
/// whenever half of its slots are occupied, so after any insert
/// `len() * 2 <= capacity()` holds and every probe ends at an empty slot.
///
/// Keys are copied into the table on first insertion; the caller's string
/// can be dropped or reused afterwards. Values are stored as given. Use
/// `V = &T` (or `Rc<T>`) to keep value ownership with the caller; dropping
/// the table then never drops the referents.
#[derive(Debug)]
pub struct StrTable<V> {
    slots: Slots<V>,
    len: usize,
    config: TableConfig,
}

impl<V> StrTable<V> {
    /// Creates an empty table with at least `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new().with_initial_capacity(capacity))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        let capacity = config.slot_count()?;
        let slots = alloc_slots(capacity)?;
        tracing::debug!(capacity, max_key_len = config.max_key_len(), "created table");
        Ok(Self {
            slots,
            len: 0,
            config,
        })
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slot count. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Inserts `key` with `value`, or replaces the value of an existing key.
    ///
    /// Returns the table's own copy of the key. For an existing key no new
    /// copy is made and the previous value is dropped.
    ///
    /// If half of the slots are already occupied the table first doubles
    /// and rehashes. Both the grown slot array and the new key copy are
    /// reserved before anything moves, so on `Err` the table is unchanged.
    pub fn insert_or_update(&mut self, key: &str, value: V) -> Result<&str, TableError> {
        self.config.check_key(key)?;
        let hash = djb2_str(key);

        let grown = if self.len >= self.slots.len() / 2 {
            Some(self.reserve_doubled()?)
        } else {
            None
        };
        let fresh = match probe(&self.slots, key, hash) {
            Ok(_) => None,
            Err(_) => Some(copy_key(key)?),
        };

        // Everything fallible is done; from here on the insert cannot fail.
        if let Some(slots) = grown {
            self.rehash_into(slots);
        }

        let index = match probe(&self.slots, key, hash) {
            Ok(i) | Err(i) => i,
        };
        let slot = &mut self.slots[index];
        match slot {
            Some(entry) => {
                entry.value = value;
                Ok(&*entry.key)
            }
            None => {
                let Some(key) = fresh else {
                    unreachable!("key vanished while rehashing");
                };
                tracing::trace!(key = &*key, index, "inserted key");
                let entry = slot.insert(Entry { key, value, hash });
                self.len += 1;
                Ok(&*entry.key)
            }
        }
    }

    /// Returns the value stored under `key`, or `None` if it was never inserted.
    pub fn lookup(&self, key: &str) -> Option<&V> {
        self.find(key).map(|e| &e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Iterates occupied entries in slot order. The order is unspecified
    /// and changes across resizes.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    fn find(&self, key: &str) -> Option<&Entry<V>> {
        let index = probe(&self.slots, key, djb2_str(key)).ok()?;
        self.slots[index].as_ref()
    }

    fn reserve_doubled(&self) -> Result<Slots<V>, TableError> {
        let to = self
            .slots
            .len()
            .checked_mul(2)
            .ok_or_else(|| TableError::alloc(usize::MAX))?;
        alloc_slots(to)
    }

    /// Moves every entry into `fresh` (already allocated, all empty). Keys
    /// are moved, not copied, and cached hashes are reused.
    fn rehash_into(&mut self, fresh: Slots<V>) {
        let from = self.slots.len();
        let old = core::mem::replace(&mut self.slots, fresh);
        for entry in old.into_vec().into_iter().flatten() {
            let index = first_vacant(&self.slots, entry.hash);
            self.slots[index] = Some(entry);
        }
        tracing::debug!(from, to = self.slots.len(), len = self.len, "grew table");
    }
}

/// Walks the probe sequence for `key`. `Ok(i)` is the slot holding `key`,
/// `Err(i)` the empty slot that ends the sequence.
fn probe<V>(slots: &[Option<Entry<V>>], key: &str, hash: u32) -> Result<usize, usize> {
    let mask = slots.len() - 1;
    let mut index = hash as usize & mask;
    loop {
        match &slots[index] {
            None => return Err(index),
            Some(e) if e.hash == hash && &*e.key == key => return Ok(index),
            Some(_) => index = (index + 1) & mask,
        }
    }
}

fn first_vacant<V>(slots: &[Option<Entry<V>>], hash: u32) -> usize {
    let mask = slots.len() - 1;
    let mut index = hash as usize & mask;
    while slots[index].is_some() {
        index = (index + 1) & mask;
    }
    index
}

fn alloc_slots<V>(capacity: usize) -> Result<Slots<V>, TableError> {
    #[cfg(test)]
    if fault::tick() {
        return Err(TableError::alloc(capacity));
    }
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| TableError::alloc(capacity))?;
    slots.resize_with(capacity, || None);
    Ok(slots.into_boxed_slice())
}

fn copy_key(key: &str) -> Result<Box<str>, TableError> {
    #[cfg(test)]
    if fault::tick() {
        return Err(TableError::alloc(key.len()));
    }
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|_| TableError::alloc(key.len()))?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}

/// Iterator over `(key, value)` pairs of a [`StrTable`].
pub struct Iter<'a, V> {
    it: core::slice::Iter<'a, Option<Entry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .find_map(|slot| slot.as_ref().map(|e| (&*e.key, &e.value)))
    }
}

impl<'a, V> IntoIterator for &'a StrTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
