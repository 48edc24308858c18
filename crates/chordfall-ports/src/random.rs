use std::collections::VecDeque;

/// Source of uniform draws for target generation.
pub trait RandomSource: Send {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Replays a fixed list of draws, each reduced modulo the requested length.
/// Once exhausted it keeps returning 0.
#[derive(Clone, Debug, Default)]
pub struct SequenceRandom {
    draws: VecDeque<usize>,
}

impl SequenceRandom {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn push(&mut self, draw: usize) {
        self.draws.push_back(draw);
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for SequenceRandom {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.draws.pop_front().map(|d| d % len).unwrap_or(0)
    }
}
