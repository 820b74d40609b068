//! Fixed-capacity memoization table keyed by canonical board encodings.
//!
//! Records live in one arena; each bucket is a chain of arena indices linked
//! through `next`, appended at the tail so a bucket keeps insertion order.
//! The bucket count never changes after construction.

use log::{debug, trace};

use crate::error::TableError;
use crate::evaluation::Score;

/// Prime bucket count sized for the game trees of small boards.
pub const DEFAULT_CAPACITY: usize = 7971;

/// Returned by [`TranspositionTable::get`] when a key is absent. Lies outside
/// the score codes 0..=3.
pub const NOT_FOUND: i32 = -1;

const MULTIPLIER: u64 = 31;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    key: String,
    score: Score,
}

impl Record {
    pub fn new(key: impl Into<String>, score: Score) -> Self {
        Self {
            key: key.into(),
            score,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn score(&self) -> Score {
        self.score
    }
}

#[derive(Debug, Clone)]
struct Slot {
    record: Record,
    next: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    pub records: usize,
    pub capacity: usize,
    pub occupied_buckets: usize,
    pub longest_chain: usize,
    pub collisions: u64,
}

#[derive(Debug)]
pub struct TranspositionTable {
    heads: Vec<Option<usize>>,
    tails: Vec<Option<usize>>,
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    num_records: usize,
    collisions: u64,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        Ok(Self {
            heads: vec![None; capacity],
            tails: vec![None; capacity],
            slots: Vec::new(),
            free: Vec::new(),
            num_records: 0,
            collisions: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.heads.len()
    }

    pub fn num_records(&self) -> usize {
        self.num_records
    }

    pub fn is_empty(&self) -> bool {
        self.num_records == 0
    }

    /// Polynomial hash over the key's chars, reduced modulo the capacity.
    ///
    /// The accumulator is seeded with the first char and the loop then folds
    /// in every char, the first one included, so the first char is counted
    /// twice. Bucket placement depends on this, keep it.
    pub fn bucket_index(&self, key: &str) -> usize {
        let modulus = self.capacity() as u64;
        let mut val = key.chars().next().map_or(0, |ch| ch as u64);
        for ch in key.chars() {
            val = (val * MULTIPLIER + ch as u64) % modulus;
        }
        (val % modulus) as usize
    }

    /// Number of records chained in bucket `index`.
    pub fn bucket_len(&self, index: usize) -> usize {
        self.chain(index).count()
    }

    fn chain(&self, bucket: usize) -> impl Iterator<Item = (usize, &Slot)> + '_ {
        let mut cursor = self.heads[bucket];
        std::iter::from_fn(move || {
            let index = cursor?;
            let slot = self.slots[index].as_ref()?;
            cursor = slot.next;
            Some((index, slot))
        })
    }

    fn find(&self, bucket: usize, key: &str) -> Option<&Record> {
        self.chain(bucket)
            .map(|(_, slot)| &slot.record)
            .find(|record| record.key == key)
    }

    /// Store a record. Returns `true` when the target bucket already held
    /// other records, i.e. the insert collided.
    pub fn put(&mut self, record: Record) -> Result<bool, TableError> {
        let bucket = self.bucket_index(&record.key);
        if self.find(bucket, &record.key).is_some() {
            return Err(TableError::DuplicateKey(record.key));
        }

        let slot = Slot { record, next: None };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                index
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        let collided = match self.tails[bucket] {
            Some(tail) => {
                if let Some(tail_slot) = self.slots[tail].as_mut() {
                    tail_slot.next = Some(index);
                }
                true
            }
            None => {
                self.heads[bucket] = Some(index);
                false
            }
        };
        self.tails[bucket] = Some(index);
        self.num_records += 1;

        if collided {
            self.collisions += 1;
            debug!("collision in bucket {} ({} records chained)", bucket, self.bucket_len(bucket));
        } else {
            trace!("stored record in empty bucket {}", bucket);
        }
        Ok(collided)
    }

    /// Score code stored for `key`, or [`NOT_FOUND`].
    pub fn get(&self, key: &str) -> i32 {
        self.lookup(key).map_or(NOT_FOUND, Score::code)
    }

    pub fn lookup(&self, key: &str) -> Option<Score> {
        let bucket = self.bucket_index(key);
        self.find(bucket, key).map(Record::score)
    }

    pub fn remove(&mut self, key: &str) -> Result<(), TableError> {
        let bucket = self.bucket_index(key);

        let mut previous = None;
        let mut found = None;
        for (index, slot) in self.chain(bucket) {
            if slot.record.key == key {
                found = Some((index, slot.next));
                break;
            }
            previous = Some(index);
        }
        let (index, next) = found.ok_or_else(|| TableError::NotFound(key.to_string()))?;

        // Unlink
        match previous {
            Some(prev) => {
                if let Some(prev_slot) = self.slots[prev].as_mut() {
                    prev_slot.next = next;
                }
            }
            None => self.heads[bucket] = next,
        }
        if self.tails[bucket] == Some(index) {
            self.tails[bucket] = previous;
        }

        self.slots[index] = None;
        self.free.push(index);
        self.num_records -= 1;
        trace!("removed record from bucket {}", bucket);
        Ok(())
    }

    pub fn stats(&self) -> TableStats {
        let mut occupied_buckets = 0;
        let mut longest_chain = 0;
        for bucket in 0..self.capacity() {
            let len = self.bucket_len(bucket);
            if len > 0 {
                occupied_buckets += 1;
            }
            longest_chain = longest_chain.max(len);
        }
        TableStats {
            records: self.num_records,
            capacity: self.capacity(),
            occupied_buckets,
            longest_chain,
            collisions: self.collisions,
        }
    }
}
