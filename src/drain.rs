use core::iter::FusedIterator;
use core::mem;
use core::ptr::{self, NonNull};
use core::slice;

use crate::core::GrowVec;

/// Iterator that removes a range of elements from a `GrowVec`, yielding
/// them by value.
///
/// The source length is shortened to the range start as soon as the drain
/// is created, so a leaked drain can never expose a drained slot. Dropping
/// the drain destroys any unconsumed elements and moves the tail forward
/// to close the gap.
pub struct Drain<'a, T> {
    tail_start: usize,
    tail_len: usize,
    iter: slice::Iter<'a, T>,
    vec: NonNull<GrowVec<T>>,
}

unsafe impl<T: Send> Send for Drain<'_, T> {}
unsafe impl<T: Sync> Sync for Drain<'_, T> {}

impl<'a, T> Drain<'a, T> {
    /// Caller has already clamped `start <= end <= vec.len()`.
    pub(crate) fn new(vec: &'a mut GrowVec<T>, start: usize, end: usize) -> Self {
        let len = vec.len();
        debug_assert!(start <= end && end <= len);
        unsafe {
            // shorten to the head immediately; the drained range and the
            // tail stop being counted until the drop handler restores them
            vec.set_len(start);
            let range = slice::from_raw_parts(vec.as_ptr().add(start), end - start);
            Self {
                tail_start: end,
                tail_len: len - end,
                iter: range.iter(),
                vec: NonNull::from(vec),
            }
        }
    }

    /// Remaining elements of the drained range as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.iter.as_slice()
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.iter.next().map(|slot| unsafe { ptr::read(slot) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    fn next_back(&mut self) -> Option<T> {
        self.iter.next_back().map(|slot| unsafe { ptr::read(slot) })
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        /// Moves the untouched tail over the gap and restores the length,
        /// even if dropping a drained element panics.
        struct TailGuard<'r, 'a, T>(&'r mut Drain<'a, T>);

        impl<T> Drop for TailGuard<'_, '_, T> {
            fn drop(&mut self) {
                if self.0.tail_len > 0 {
                    unsafe {
                        let vec = self.0.vec.as_mut();
                        let start = vec.len();
                        let tail = self.0.tail_start;
                        if tail != start {
                            let src = vec.as_ptr().add(tail);
                            let dst = vec.as_mut_ptr().add(start);
                            ptr::copy(src, dst, self.0.tail_len);
                        }
                        vec.set_len(start + self.0.tail_len);
                    }
                }
            }
        }

        let iter = mem::replace(&mut self.iter, [].iter());
        let drop_len = iter.len();
        let mut vec = self.vec;

        let _guard = TailGuard(self);
        if drop_len == 0 {
            return;
        }

        // the slice iter only hands out shared references; rebuild a
        // mutable pointer to the unconsumed range from the buffer itself
        unsafe {
            let base = vec.as_mut().as_mut_ptr();
            let offset = iter.as_slice().as_ptr().offset_from(base) as usize;
            let to_drop = ptr::slice_from_raw_parts_mut(base.add(offset), drop_len);
            ptr::drop_in_place(to_drop);
        }
    }
}
