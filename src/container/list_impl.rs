use alloc::{boxed::Box, vec::Vec, collections::VecDeque};
use super::LeafContainer;

impl<V: PartialEq> LeafContainer<V> for Vec<V> {
    #[inline(always)]
    fn insert(&mut self, value: V) {
        self.push(value)
    }
    #[inline]
    fn remove(&mut self, value: &V) -> bool {
        if let Some(index) = self.iter().position(|x| x == value) {
            self.remove(index);
            true
        } else {
            false
        }
    }
    #[inline]
    fn values(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.iter())
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }
    #[inline]
    fn insert_all(&mut self, values: &mut dyn Iterator<Item = V>) {
        self.extend(values)
    }
    #[inline]
    fn to_vec(&self) -> Vec<V>
    where V: Clone,
    {
        self.clone()
    }
}

impl<V: PartialEq> LeafContainer<V> for VecDeque<V> {
    #[inline(always)]
    fn insert(&mut self, value: V) {
        self.push_back(value)
    }
    #[inline]
    fn remove(&mut self, value: &V) -> bool {
        let index = self.iter().position(|x| x == value);
        index.and_then(|index| self.remove(index)).is_some()
    }
    #[inline]
    fn values(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.iter())
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }
    #[inline]
    fn insert_all(&mut self, values: &mut dyn Iterator<Item = V>) {
        self.extend(values)
    }
}
