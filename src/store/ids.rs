//! Unique id generation for placed objects

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::store::object::ObjectId;

/// Length of the random suffix on generated ids
const SUFFIX_LEN: usize = 9;

/// Generator producing ids of the form `obj_<sequence>_<suffix>`
///
/// The monotonic sequence alone guarantees uniqueness within one store; the
/// random base36 suffix keeps ids distinguishable across stores and editing
/// sessions.
#[derive(Debug)]
pub struct IdGenerator {
    sequence: u64,
    rng: StdRng,
}

impl IdGenerator {
    /// Create a generator seeded from operating-system entropy
    pub fn new() -> Self {
        Self {
            sequence: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic generator for reproducible id streams
    pub fn with_seed(seed: u64) -> Self {
        Self {
            sequence: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Mint the next unique id
    pub fn next_id(&mut self) -> ObjectId {
        self.sequence = self.sequence.wrapping_add(1);
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| {
                let digit = self.rng.random_range(0..36_u32);
                char::from_digit(digit, 36).unwrap_or('0')
            })
            .collect();
        ObjectId::from_raw(format!("obj_{}_{suffix}", self.sequence))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
