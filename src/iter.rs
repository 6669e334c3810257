use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use core::slice;

use alloc::alloc::{dealloc, Layout};

use crate::core::GrowVec;

/// Borrowing iterator over the live elements of a `GrowVec`.
///
/// A pair of raw position pointers into the buffer: the next element and
/// one past the last. Holds no reference to the vector's length or
/// capacity.
///
/// This iterator implements `Clone`.
pub struct Iter<'a, T> {
    start: NonNull<T>,
    end: NonNull<T>,
    _marker: PhantomData<&'a T>,
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iter<'a, T> {
    /// # Safety
    ///
    /// `start` must point at `len` initialized elements borrowed for `'a`,
    /// or be the dangling pointer with `len == 0`.
    pub(crate) unsafe fn new(start: NonNull<T>, len: usize) -> Self {
        Self {
            start,
            end: unsafe { NonNull::new_unchecked(start.as_ptr().add(len)) },
            _marker: PhantomData,
        }
    }

    /// Remaining elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [T] {
        unsafe { slice::from_raw_parts(self.start.as_ptr(), self.len()) }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                let item = &*self.start.as_ptr();
                self.start = NonNull::new_unchecked(self.start.as_ptr().add(1));
                Some(item)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn count(self) -> usize {
        self.len()
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.len() {
            self.start = self.end;
            None
        } else {
            unsafe { self.start = NonNull::new_unchecked(self.start.as_ptr().add(n)) };
            self.next()
        }
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                self.end = NonNull::new_unchecked(self.end.as_ptr().sub(1));
                Some(&*self.end.as_ptr())
            }
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        unsafe { self.end.as_ptr().offset_from(self.start.as_ptr()) as usize }
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    // clones the position, not the elements, so no `T: Clone` bound
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            end: self.end,
            _marker: PhantomData,
        }
    }
}

/// Borrowing mutable iterator over the live elements of a `GrowVec`.
///
/// The mutable counterpart of [`Iter`]; converts into one via `From` but
/// never back.
pub struct IterMut<'a, T> {
    start: NonNull<T>,
    end: NonNull<T>,
    _marker: PhantomData<&'a mut T>,
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    /// # Safety
    ///
    /// `start` must point at `len` initialized elements borrowed mutably
    /// for `'a`, or be the dangling pointer with `len == 0`.
    pub(crate) unsafe fn new(start: NonNull<T>, len: usize) -> Self {
        Self {
            start,
            end: unsafe { NonNull::new_unchecked(start.as_ptr().add(len)) },
            _marker: PhantomData,
        }
    }

    /// Remaining elements as a slice, borrowed for the duration of the
    /// borrow of `self`.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.start.as_ptr(), self.len()) }
    }

    /// Consumes the iterator and returns the remaining elements as a
    /// mutable slice.
    #[must_use]
    pub fn into_slice(self) -> &'a mut [T] {
        unsafe { slice::from_raw_parts_mut(self.start.as_ptr(), self.len()) }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                let item = &mut *self.start.as_ptr();
                self.start = NonNull::new_unchecked(self.start.as_ptr().add(1));
                Some(item)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn count(self) -> usize {
        self.len()
    }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.len() {
            self.start = self.end;
            None
        } else {
            unsafe { self.start = NonNull::new_unchecked(self.start.as_ptr().add(n)) };
            self.next()
        }
    }

    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                self.end = NonNull::new_unchecked(self.end.as_ptr().sub(1));
                Some(&mut *self.end.as_ptr())
            }
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        unsafe { self.end.as_ptr().offset_from(self.start.as_ptr()) as usize }
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
    /// A mutable cursor is usable anywhere a read-only one is expected;
    /// the conversion is one-directional.
    fn from(iter: IterMut<'a, T>) -> Self {
        Self {
            start: iter.start,
            end: iter.end,
            _marker: PhantomData,
        }
    }
}

/// Owning iterator over the elements of a `GrowVec`.
///
/// Reads elements out of the buffer by value; unconsumed elements and the
/// buffer itself are released when the iterator drops.
pub struct IntoIter<T> {
    buf: NonNull<T>,
    cap: usize,
    start: NonNull<T>,
    end: NonNull<T>,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// Remaining elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.start.as_ptr(), self.len()) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                let value = ptr::read(self.start.as_ptr());
                self.start = NonNull::new_unchecked(self.start.as_ptr().add(1));
                Some(value)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn count(self) -> usize {
        self.len()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                self.end = NonNull::new_unchecked(self.end.as_ptr().sub(1));
                Some(ptr::read(self.end.as_ptr()))
            }
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        unsafe { self.end.as_ptr().offset_from(self.start.as_ptr()) as usize }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    #[allow(clippy::expect_used)]
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(self.start.as_ptr(), self.len());
        unsafe { ptr::drop_in_place(remaining) };
        if self.cap != 0 {
            let layout = Layout::array::<T>(self.cap).expect("layout was valid at allocation time");
            unsafe { dealloc(self.buf.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl<T> IntoIterator for GrowVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Takes ownership of the buffer without moving any element.
    fn into_iter(self) -> IntoIter<T> {
        let (buf, cap, len) = self.into_raw_parts();
        IntoIter {
            buf,
            cap,
            start: buf,
            end: unsafe { NonNull::new_unchecked(buf.as_ptr().add(len)) },
            _marker: PhantomData,
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowVec<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
