//! `proptest` strategy for [`SegDeque`], behind the `proptest` feature.
//!
//! Generated deques are built partly with `push_front` and partly with
//! `push_back`, so the live span starts at an arbitrary buffer offset.

use proptest::arbitrary::{any, any_with, Arbitrary};
use proptest::collection::{vec, SizeRange};
use proptest::sample::Index;
use proptest::strategy::{BoxedStrategy, Strategy};

use super::SegDeque;

impl<T> Arbitrary for SegDeque<T>
where
    T: Arbitrary + 'static,
{
    type Parameters = (SizeRange, T::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((size, element): Self::Parameters) -> Self::Strategy {
        (vec(any_with::<T>(element), size), any::<Index>())
            .prop_map(|(mut items, split)| {
                let split = if items.is_empty() {
                    0
                } else {
                    split.index(items.len())
                };
                let front: Vec<T> = items.drain(..split).collect();
                let mut deque: SegDeque<T> = items.into_iter().collect();
                for value in front.into_iter().rev() {
                    deque.push_front(value);
                }
                deque
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generated_deques_are_consistent(d in any::<SegDeque<u16>>()) {
            prop_assert_eq!(d.iter().count(), d.len());
            prop_assert_eq!(d.cursor_end() - d.cursor_front(), d.len() as isize);
        }
    }
}
