//! Bounded reading history.

use std::collections::VecDeque;

use crate::types::Observation;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    while dq.len() >= cap.max(1) {
        dq.pop_front();
    }
    dq.push_back(v);
}

// Oldest reading at the front, newest at the back
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Observation>,
    cap: usize,
}

impl History {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, obs: Observation) {
        push_capped(&mut self.entries, obs, self.cap);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.entries.iter()
    }

    /// Oldest first; this is what a snapshot carries.
    pub fn to_vec(&self) -> Vec<Observation> {
        self.iter().cloned().collect()
    }
}
