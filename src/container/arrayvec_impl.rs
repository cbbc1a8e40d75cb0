use alloc::boxed::Box;
use arrayvec::{ArrayVec, Array};
use super::LeafContainer;

impl<A> LeafContainer<A::Item> for ArrayVec<A>
where
    A: Array,
    A::Item: PartialEq,
{
    /// # Panics
    /// Panics if the vector is already full. `ArrayVec` does not support allocating memory; if you need such functionality, use `Vec` or `SmallVec` instead.
    #[inline(always)]
    fn insert(&mut self, value: A::Item) {
        self.push(value)
    }
    #[inline]
    fn remove(&mut self, value: &A::Item) -> bool {
        if let Some(index) = self.as_slice().iter().position(|x| x == value) {
            self.remove(index);
            true
        } else {
            false
        }
    }
    #[inline]
    fn values(&self) -> Box<dyn Iterator<Item = &A::Item> + '_> {
        Box::new(self.as_slice().iter())
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }
    #[inline(always)]
    fn fixed_capacity(&self) -> Option<usize> {
        Some(self.capacity())
    }
}
