//! Fixed-capacity motion trail

use std::collections::VecDeque;

/// Ring buffer that drops its oldest entry once full
#[derive(Debug, Clone, PartialEq)]
pub struct TrailBuffer<T> {
    points: VecDeque<T>,
    capacity: usize,
}

impl<T> TrailBuffer<T> {
    /// A capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `point`, returning the evicted oldest entry if the trail was full
    pub fn push(&mut self, point: T) -> Option<T> {
        let evicted = if self.points.len() == self.capacity {
            self.points.pop_front()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    /// Change capacity, dropping the oldest entries that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        while self.points.len() > capacity {
            self.points.pop_front();
        }
        self.capacity = capacity;
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn latest(&self) -> Option<&T> {
        self.points.back()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.points.iter()
    }
}

impl<'a, T> IntoIterator for &'a TrailBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
