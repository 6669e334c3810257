use std::cell::Cell;
use std::rc::Rc;

use growvec::{GrowVec, Iter};

#[test]
fn test_iterator_over_empty_vector() {
    let vec: GrowVec<i32> = GrowVec::new();
    let mut iter = vec.iter();

    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iterator_yields_in_order() {
    let vec = GrowVec::from([10, 20, 30]);
    let mut iter = vec.iter();

    assert_eq!(iter.size_hint(), (3, Some(3)));
    assert_eq!(iter.next(), Some(&10));
    assert_eq!(iter.size_hint(), (2, Some(2)));
    assert_eq!(iter.next(), Some(&20));
    assert_eq!(iter.next(), Some(&30));
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iterator_reverse_yields_in_reverse() {
    let vec = GrowVec::from([1, 2, 3]);

    let reversed: Vec<i32> = vec.iter().rev().copied().collect();

    assert_eq!(reversed, [3, 2, 1]);
}

#[test]
fn test_iterator_ends_meet_in_the_middle() {
    let vec = GrowVec::from([0, 1, 2, 3, 4]);
    let mut iter = vec.iter();

    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&3));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_iterator_nth_skips_ahead() {
    let vec = GrowVec::from([0, 1, 2, 3, 4]);
    let mut iter = vec.iter();

    assert_eq!(iter.nth(2), Some(&2));
    assert_eq!(iter.next(), Some(&3));
    assert_eq!(iter.nth(5), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iterator_count_and_last() {
    let vec = GrowVec::from([1, 2, 3, 4]);

    assert_eq!(vec.iter().count(), 4);
    assert_eq!(vec.iter().last(), Some(&4));
}

#[test]
fn test_iterator_as_slice_shows_the_remainder() {
    let vec = GrowVec::from([1, 2, 3, 4]);
    let mut iter = vec.iter();

    assert_eq!(iter.as_slice(), &[1, 2, 3, 4]);
    iter.next();
    assert_eq!(iter.as_slice(), &[2, 3, 4]);
}

#[test]
fn test_cloned_iterator_advances_independently() {
    let vec = GrowVec::from([1, 2, 3]);
    let mut iter = vec.iter();
    iter.next();

    let mut branch = iter.clone();

    assert_eq!(iter.next(), Some(&2));
    assert_eq!(branch.next(), Some(&2));
    assert_eq!(branch.next(), Some(&3));
    assert_eq!(iter.next(), Some(&3));
}

#[test]
fn test_mutable_iteration_updates_in_place() {
    let mut vec = GrowVec::from([1, 2, 3]);

    for value in vec.iter_mut() {
        *value *= 10;
    }

    assert_eq!(vec, [10, 20, 30]);
}

#[test]
fn test_mutable_iterator_from_the_back() {
    let mut vec = GrowVec::from([1, 2, 3]);
    let mut iter = vec.iter_mut();

    *iter.next_back().unwrap() = 30;
    *iter.next_back().unwrap() = 20;

    assert_eq!(vec, [1, 20, 30]);
}

#[test]
fn test_mutable_iterator_converts_to_shared() {
    let mut vec = GrowVec::from([1, 2, 3]);

    let iter: Iter<'_, i32> = vec.iter_mut().into();

    assert_eq!(iter.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_mutable_iterator_into_slice_keeps_the_remainder() {
    let mut vec = GrowVec::from([1, 2, 3]);

    {
        let mut iter = vec.iter_mut();
        iter.next();
        let rest = iter.into_slice();
        rest[0] = 99;
    }

    assert_eq!(vec, [1, 99, 3]);
}

#[test]
fn test_into_iter_yields_owned_values() {
    let vec = GrowVec::from([1, 2, 3]);
    let mut iter = vec.into_iter();

    assert_eq!(iter.size_hint(), (3, Some(3)));
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(3));
    assert_eq!(iter.as_slice(), &[2]);
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_into_iter_moves_heap_elements() {
    let vec: GrowVec<String> = ["a", "b"].iter().map(|s| (*s).to_string()).collect();

    let joined: String = vec.into_iter().collect();

    assert_eq!(joined, "ab");
}

#[test]
fn test_for_loop_over_reference() {
    let vec = GrowVec::from([1, 2, 3]);
    let mut sum = 0;

    for value in &vec {
        sum += value;
    }

    assert_eq!(sum, 6);
    assert_eq!(vec.len(), 3);
}

#[test]
fn test_for_loop_over_mutable_reference() {
    let mut vec = GrowVec::from([1, 2, 3]);

    for value in &mut vec {
        *value += 1;
    }

    assert_eq!(vec, [2, 3, 4]);
}

#[test]
fn test_for_loop_consumes_by_value() {
    let vec = GrowVec::from([1, 2, 3]);
    let mut collected = Vec::new();

    for value in vec {
        collected.push(value);
    }

    assert_eq!(collected, [1, 2, 3]);
}

#[test]
fn test_partially_consumed_into_iter_drops_the_rest() {
    let drops = Rc::new(Cell::new(0));
    let mut vec = GrowVec::new();
    for _ in 0..3 {
        vec.push(Tracked {
            drops: Rc::clone(&drops),
        });
    }

    let mut iter = vec.into_iter();
    drop(iter.next());
    assert_eq!(drops.get(), 1);

    drop(iter);
    assert_eq!(drops.get(), 3);
}

struct Tracked {
    drops: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
