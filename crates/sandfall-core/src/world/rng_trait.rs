//! RNG trait abstraction for the simulation
//!
//! Rules never reach for an ambient generator. The simulator owns one source
//! and threads it through every rule call, so a seeded source reproduces a
//! run exactly, and tests can script every decision.

/// Random number generator trait for the simulation
pub trait SimRng {
    /// Generate random boolean with 50% probability
    fn gen_bool(&mut self) -> bool;

    /// Generate random f32 in [0.0, 1.0)
    fn gen_f32(&mut self) -> f32;

    /// Generate a uniform index in [0, len). `len` must be non-zero.
    fn gen_index(&mut self, len: usize) -> usize;

    /// Check if random value is less than probability threshold
    fn check_probability(&mut self, probability: f32) -> bool {
        self.gen_f32() < probability
    }

    /// Permute `items` in place. The default draws its swaps from
    /// [`SimRng::gen_index`], so scripted sources stay predictable.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.gen_index(i + 1);
            items.swap(i, j);
        }
    }
}

// Blanket implementation for any type implementing rand::Rng
// This covers both ThreadRng and the seeded Xoshiro generators
impl<T: ?Sized + rand::Rng> SimRng for T {
    fn gen_bool(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn gen_f32(&mut self) -> f32 {
        rand::Rng::r#gen(self)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        rand::Rng::gen_range(self, 0..len)
    }

    fn shuffle<U>(&mut self, items: &mut [U]) {
        rand::seq::SliceRandom::shuffle(items, self);
    }
}

/// Deterministic RNG for unit tests.
///
/// Floats come from a script, then fall back to `fallback_f32`. Indices come
/// from a script, then fall back to `len - 1`, which makes [`SimRng::shuffle`]
/// the identity permutation.
#[cfg(test)]
pub(crate) struct TestRng {
    floats: std::collections::VecDeque<f32>,
    indices: std::collections::VecDeque<usize>,
    fallback_f32: f32,
}

#[cfg(test)]
impl TestRng {
    /// Every probability check passes, every shuffle keeps listed order
    pub(crate) fn always() -> Self {
        Self::with_fallback(0.0)
    }

    /// Every probability check fails, every shuffle keeps listed order
    pub(crate) fn never() -> Self {
        Self::with_fallback(0.999_999)
    }

    pub(crate) fn with_fallback(fallback_f32: f32) -> Self {
        Self {
            floats: Default::default(),
            indices: Default::default(),
            fallback_f32,
        }
    }

    pub(crate) fn push_floats(mut self, floats: &[f32]) -> Self {
        self.floats.extend(floats.iter().copied());
        self
    }

    pub(crate) fn push_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices.iter().copied());
        self
    }
}

#[cfg(test)]
impl SimRng for TestRng {
    fn gen_bool(&mut self) -> bool {
        self.gen_f32() < 0.5
    }

    fn gen_f32(&mut self) -> f32 {
        self.floats.pop_front().unwrap_or(self.fallback_f32)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.indices
            .pop_front()
            .map(|i| i.min(len - 1))
            .unwrap_or(len - 1)
    }
}
