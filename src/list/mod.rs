//! Growable owning sequence used for result sets handed back to callers.
//!
//! [`OwningList`] keeps its own logical `capacity` next to the backing
//! `Vec` so growth is deterministic: when an insertion would reach the
//! current capacity, capacity is multiplied by the list's growth factor
//! and the backing storage is reserved to match.  Every element is owned
//! by the list; `add` clones the caller's value, `push` moves it in.
//!
//! Dropping the list releases every element and then the storage.
//! Dropping an absent list (`Option::<OwningList<_>>::None`) does nothing.

use std::ops::Index;
use std::slice;

/// Smallest capacity a list is ever created with.
pub const MIN_CAPACITY: usize = 2;
/// Factor applied to the capacity whenever the list runs full.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

#[derive(Debug, Clone)]
pub struct OwningList<T> {
    items:         Vec<T>,
    capacity:      usize,
    growth_factor: usize,
}

impl<T> OwningList<T> {
    pub fn new(capacity: usize) -> Self {
        Self::with_growth_factor(capacity, DEFAULT_GROWTH_FACTOR)
    }

    /// Both `capacity` and `growth_factor` are floored at 2.
    pub fn with_growth_factor(capacity: usize, growth_factor: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            growth_factor: growth_factor.max(2),
        }
    }

    /// Append a value, taking ownership of it.
    pub fn push(&mut self, value: T) {
        self.reserve_slot();
        self.items.push(value);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn reserve_slot(&mut self) {
        if self.items.len() + 1 >= self.capacity {
            self.capacity = self.capacity.saturating_mul(self.growth_factor);
            self.items.reserve_exact(self.capacity - self.items.len());
        }
        debug_assert!(self.items.len() + 1 < self.capacity);
    }
}

impl<T: Clone> OwningList<T> {
    /// Append an independent copy of `value`.  Later changes to the
    /// caller's value are not observable through the list.
    pub fn add(&mut self, value: &T) {
        self.push(value.clone());
    }
}

impl<T: Clone> OwningList<Vec<T>> {
    /// Append an owned copy of a borrowed slice.
    pub fn add_slice(&mut self, values: &[T]) {
        self.push(values.to_vec());
    }
}

/// Lists compare by their items only, however they were grown.
impl<T: PartialEq> PartialEq for OwningList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for OwningList<T> {}

impl<T> Default for OwningList<T> {
    fn default() -> Self {
        Self::new(MIN_CAPACITY)
    }
}

impl<T> Index<usize> for OwningList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> FromIterator<T> for OwningList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = Self::new(iter.size_hint().0);
        for value in iter {
            list.push(value);
        }
        list
    }
}

impl<T> IntoIterator for OwningList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OwningList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::rc::Rc;

    #[test]
    fn capacity_is_floored() {
        assert_eq!(OwningList::<u8>::new(0).capacity(), 2);
        assert_eq!(OwningList::<u8>::new(1).capacity(), 2);
        assert_eq!(OwningList::<u8>::new(5).capacity(), 5);
        assert_eq!(OwningList::<u8>::with_growth_factor(4, 0).growth_factor(), 2);
    }

    #[test]
    fn grows_before_the_last_slot_is_used() {
        let mut list = OwningList::new(2);
        list.push(1u32);
        assert_eq!(list.capacity(), 2);
        list.push(2);
        assert_eq!(list.capacity(), 4);
        list.push(3);
        assert_eq!(list.capacity(), 4);
        list.push(4);
        assert_eq!(list.capacity(), 8);
        assert_eq!(list.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn custom_growth_factor() {
        let mut list = OwningList::with_growth_factor(3, 3);
        list.push('a');
        list.push('b');
        assert_eq!(list.capacity(), 3);
        list.push('c');
        assert_eq!(list.capacity(), 9);
    }

    #[test]
    fn add_copies_the_callers_buffer() {
        let mut list = OwningList::new(2);
        let mut buf = b"E1M1".to_vec();
        list.add(&buf);
        list.add_slice(&buf[..2]);
        buf[0] = b'X';
        drop(buf);
        assert_eq!(list[0], b"E1M1");
        assert_eq!(list[1], b"E1");
    }

    #[test]
    fn drop_releases_every_item() {
        let shared = Rc::new(());
        {
            let mut list = OwningList::new(2);
            for _ in 0..5 {
                list.add(&shared);
            }
            assert_eq!(Rc::strong_count(&shared), 6);
        }
        assert_eq!(Rc::strong_count(&shared), 1);

        let absent: Option<OwningList<Rc<()>>> = None;
        drop(absent);
    }

    #[test]
    fn collects_and_iterates_in_order() {
        let list: OwningList<_> = (0..10).collect();
        assert_eq!(list.len(), 10);
        assert!(list.capacity() > list.len());
        let doubled: Vec<_> = list.iter().map(|v| v * 2).collect();
        assert_eq!(doubled[9], 18);
        assert_eq!(list.into_vec(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn equality_ignores_capacity() {
        let collected: OwningList<u8> = (0..3).collect();
        let mut small = OwningList::new(2);
        let mut large = OwningList::with_growth_factor(8, 3);
        for v in 0..3u8 {
            small.push(v);
            large.push(v);
        }
        assert_ne!(collected.capacity(), small.capacity());
        assert_ne!(small.capacity(), large.capacity());
        assert_eq!(collected, small);
        assert_eq!(small, large);

        small.push(3);
        assert_ne!(small, large);
    }

    proptest! {
        #[test]
        fn growth_never_loses_items(capacity in 0usize..6, items in prop::collection::vec(any::<u16>(), 1..40)) {
            let mut list = OwningList::new(capacity);
            for item in &items {
                list.add(item);
                prop_assert!(list.len() < list.capacity());
            }
            prop_assert_eq!(list.as_slice(), items.as_slice());
        }
    }
}
