use alloc::boxed::Box;
use smallvec::{SmallVec, Array};
use super::LeafContainer;

impl<A> LeafContainer<A::Item> for SmallVec<A>
where
    A: Array,
    A::Item: PartialEq,
{
    #[inline(always)]
    fn insert(&mut self, value: A::Item) {
        self.push(value)
    }
    #[inline]
    fn remove(&mut self, value: &A::Item) -> bool {
        if let Some(index) = self.iter().position(|x| x == value) {
            self.remove(index);
            true
        } else {
            false
        }
    }
    #[inline]
    fn values(&self) -> Box<dyn Iterator<Item = &A::Item> + '_> {
        Box::new(self.iter())
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }
    #[inline]
    fn insert_all(&mut self, values: &mut dyn Iterator<Item = A::Item>) {
        self.extend(values)
    }
}
