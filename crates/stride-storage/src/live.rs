//! Liveness bitset for element indices.

/// A set of element indices implemented as a dynamically-sized bitset.
///
/// Used by [`ElementPool`](crate::ElementPool) to answer "is this index
/// live?" in O(1) and to walk live indices in ascending order, skipping
/// whole empty words.
#[derive(Clone, Debug, Default)]
pub struct LiveSet {
    bits: Vec<u64>,
    count: u64,
}

impl LiveSet {
    const BITS_PER_WORD: u64 = 64;

    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn split(index: u64) -> (usize, u64) {
        (
            (index / Self::BITS_PER_WORD) as usize,
            1u64 << (index % Self::BITS_PER_WORD),
        )
    }

    /// Insert an index. Returns `false` if it was already present.
    pub fn insert(&mut self, index: u64) -> bool {
        let (word, mask) = Self::split(index);
        if word >= self.bits.len() {
            self.bits.resize(word + 1, 0);
        }
        let was_set = self.bits[word] & mask != 0;
        self.bits[word] |= mask;
        if !was_set {
            self.count += 1;
        }
        !was_set
    }

    /// Remove an index. Returns `false` if it was absent.
    pub fn remove(&mut self, index: u64) -> bool {
        let (word, mask) = Self::split(index);
        match self.bits.get_mut(word) {
            Some(w) if *w & mask != 0 => {
                *w &= !mask;
                self.count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Check whether the set contains an index.
    #[inline]
    pub fn contains(&self, index: u64) -> bool {
        let (word, mask) = Self::split(index);
        self.bits.get(word).is_some_and(|w| w & mask != 0)
    }

    /// Number of indices in the set.
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove every index, keeping the word allocation.
    pub fn clear(&mut self) {
        self.bits.fill(0);
        self.count = 0;
    }

    /// Smallest index `>= from` in the set.
    pub fn next_from(&self, from: u64) -> Option<u64> {
        let (mut word, _) = Self::split(from);
        let mut bits = *self.bits.get(word)? & (!0u64 << (from % Self::BITS_PER_WORD));
        loop {
            if bits != 0 {
                return Some(word as u64 * Self::BITS_PER_WORD + u64::from(bits.trailing_zeros()));
            }
            word += 1;
            bits = *self.bits.get(word)?;
        }
    }

    /// Iterate indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        let mut next = 0u64;
        std::iter::from_fn(move || {
            let found = self.next_from(next)?;
            next = found + 1;
            Some(found)
        })
    }
}
