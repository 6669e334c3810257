use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ops::{Bound, Deref, DerefMut, RangeBounds};
use core::ptr::{self, NonNull};
use core::slice;

use alloc::alloc::{alloc, dealloc, handle_alloc_error, realloc, Layout};

use crate::drain::Drain;
use crate::error::GrowVecError;
use crate::iter::{Iter, IterMut};

/// Multiplier applied to the required minimum slot count when the buffer
/// grows on demand.
const GROWTH_FACTOR: f64 = 1.5;

/// A growable vector over a manually managed raw buffer.
///
/// The buffer holds `capacity()` element slots; slots `[0, len())` hold live
/// values and slots `[len(), capacity())` are allocated but uninitialized.
/// No buffer exists while `capacity() == 0`. When the buffer must grow to
/// hold a required minimum number of elements, the new capacity is that
/// minimum multiplied by 1.5 (truncated); `reserve` and `shrink_to_fit`
/// reallocate to exact slot counts instead.
///
/// Zero-sized element types are not supported: capacity accounting is
/// meaningless for them, and any operation that needs the buffer panics.
pub struct GrowVec<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for GrowVec<T> {}
unsafe impl<T: Sync> Sync for GrowVec<T> {}

impl<T> GrowVec<T> {
    /// Creates an empty vector with zero capacity. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates an empty vector with exactly `cap` allocated slots.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        let mut vec = Self::new();
        if cap > 0 {
            vec.reallocate(cap);
        }
        vec
    }

    /// Creates a vector holding `n` clones of `value`, with `⌊n * 1.5⌋`
    /// slots allocated up front.
    #[must_use]
    pub fn from_elem(value: T, n: usize) -> Self
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity(scaled_capacity(n));
        for _ in 0..n {
            // cannot overflow the buffer: ⌊n * 1.5⌋ >= n
            unsafe { vec.push_unchecked(value.clone()) };
        }
        vec
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated element slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Borrows the live elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Borrows the live elements as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Raw pointer to the start of the buffer. Dangling while
    /// `capacity() == 0`.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Raw mutable pointer to the start of the buffer. Dangling while
    /// `capacity() == 0`.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Sets the live-element count without constructing or destroying
    /// anything.
    ///
    /// # Safety
    ///
    /// `new_len` must not exceed `capacity()`, and slots `[0, new_len)` must
    /// hold initialized values of `T`.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.cap);
        self.len = new_len;
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::OutOfRange` if `index >= len()`.
    pub fn try_get(&self, index: usize) -> Result<&T, GrowVecError> {
        if index < self.len {
            Ok(unsafe { &*self.ptr.as_ptr().add(index) })
        } else {
            Err(GrowVecError::OutOfRange {
                index,
                length: self.len,
            })
        }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::OutOfRange` if `index >= len()`.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, GrowVecError> {
        if index < self.len {
            Ok(unsafe { &mut *self.ptr.as_ptr().add(index) })
        } else {
            Err(GrowVecError::OutOfRange {
                index,
                length: self.len,
            })
        }
    }

    /// Returns a reference to the element at `index` without a bounds
    /// check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index` without a
    /// bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Grows the buffer to exactly `new_cap` slots. No-op if `new_cap`
    /// does not exceed the current capacity; never shrinks.
    ///
    /// `new_cap` is the absolute slot count, not an additional amount.
    pub fn reserve(&mut self, new_cap: usize) {
        if new_cap > self.cap {
            self.reallocate(new_cap);
        }
    }

    /// Reallocates the buffer down to exactly `len()` slots. An empty
    /// vector releases its buffer entirely and returns to zero capacity.
    pub fn shrink_to_fit(&mut self) {
        if self.len == 0 {
            if self.cap != 0 {
                self.deallocate();
            }
        } else if self.cap > self.len {
            self.reallocate(self.len);
        }
    }

    /// Appends `value`, growing the buffer to `⌊(len + 1) * 1.5⌋` slots if
    /// it is full.
    pub fn push(&mut self, value: T) {
        if self.len == self.cap {
            self.grow_for(self.len + 1);
        }
        unsafe { self.push_unchecked(value) };
    }

    /// Writes `value` into slot `len` and bumps the length.
    ///
    /// # Safety
    ///
    /// Slot `len` must be allocated, i.e. `len < capacity()`.
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.cap);
        unsafe { ptr::write(self.ptr.as_ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` if the vector is
    /// empty. Capacity is unchanged.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
        }
    }

    /// Destroys all live elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Destroys the elements in `[new_len, len())`. No-op if `new_len`
    /// is not below the current length. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len < self.len {
            let tail = ptr::slice_from_raw_parts_mut(
                unsafe { self.ptr.as_ptr().add(new_len) },
                self.len - new_len,
            );
            // len drops first so a panicking element drop cannot lead to a
            // second drop of the same slot
            unsafe {
                self.len = new_len;
                ptr::drop_in_place(tail);
            }
        }
    }

    /// Resizes to exactly `new_len` elements. Shrinking destroys the tail
    /// `[new_len, len())`; growing fills the new tail `[len(), new_len)`
    /// with clones of `value`, reallocating to `⌊new_len * 1.5⌋` slots
    /// when the current capacity cannot hold `new_len`. The existing
    /// prefix is never touched.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone());
    }

    /// Like [`resize`](Self::resize), but fills the new tail with values
    /// produced by `f`, constructed directly in their slots.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
        } else {
            if new_len > self.cap {
                self.reallocate(scaled_capacity(new_len));
            }
            while self.len < new_len {
                unsafe { self.push_unchecked(f()) };
            }
        }
    }

    /// Appends clones of every element of `values`, growing once to
    /// `⌊(len + values.len()) * 1.5⌋` slots if needed.
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        if self.len + values.len() > self.cap {
            self.grow_for(self.len + values.len());
        }
        for value in values {
            unsafe { self.push_unchecked(value.clone()) };
        }
    }

    /// Inserts `value` before position `index`, shifting the tail back by
    /// one slot. `index == len()` appends, taking the same path as
    /// [`push`](Self::push).
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(
            index <= self.len,
            "insert index {} beyond length {}",
            index,
            self.len
        );
        if index == self.len {
            self.push(value);
            return;
        }
        if self.len == self.cap {
            self.grow_for(self.len + 1);
        }
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            // memmove opens the gap from the tail end, so no live slot is
            // overwritten before it has been relocated
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, value);
        }
        self.len += 1;
    }

    /// Inserts clones of `values` before position `index`, shifting the
    /// tail back by `values.len()` slots. An empty slice is a no-op;
    /// `index == len()` appends like
    /// [`extend_from_slice`](Self::extend_from_slice).
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_from_slice(&mut self, index: usize, values: &[T])
    where
        T: Clone,
    {
        assert!(
            index <= self.len,
            "insert index {} beyond length {}",
            index,
            self.len
        );
        let count = values.len();
        if count == 0 {
            return;
        }
        if index == self.len {
            self.extend_from_slice(values);
            return;
        }
        if self.len + count > self.cap {
            self.grow_for(self.len + count);
        }
        unsafe {
            let old_len = self.len;
            let slot = self.ptr.as_ptr().add(index);
            // only the intact prefix stays counted until every gap slot is
            // written; a panicking clone then leaks the tail instead of
            // exposing uninitialized slots
            self.len = index;
            ptr::copy(slot, slot.add(count), old_len - index);
            for (offset, value) in values.iter().enumerate() {
                ptr::write(slot.add(offset), value.clone());
            }
            self.len = old_len + count;
        }
    }

    /// Removes and returns the element at `index`, shifting the tail
    /// forward to close the gap.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "remove index {} beyond length {}",
            index,
            self.len
        );
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Removes and returns the element at `index`, or reports the
    /// out-of-range position without mutating.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::OutOfRange` if `index >= len()`.
    pub fn try_remove(&mut self, index: usize) -> Result<T, GrowVecError> {
        if index < self.len {
            Ok(self.remove(index))
        } else {
            Err(GrowVecError::OutOfRange {
                index,
                length: self.len,
            })
        }
    }

    /// Keeps only the elements for which `keep` returns true, preserving
    /// their order. The others are destroyed in place.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.len;
        let ptr = self.ptr.as_ptr();
        // only the compacted prefix stays counted; if the predicate or an
        // element drop panics, the unprocessed remainder leaks rather than
        // dropping twice
        self.len = 0;
        let mut kept = 0;
        for read in 0..len {
            unsafe {
                let slot = ptr.add(read);
                if keep(&*slot) {
                    ptr::copy(slot, ptr.add(kept), 1);
                    kept += 1;
                    self.len = kept;
                } else {
                    ptr::drop_in_place(slot);
                }
            }
        }
    }

    /// Removes the elements in `range` and yields them as an iterator.
    /// Dropping the iterator removes any unconsumed elements and closes
    /// the gap. An empty range is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or its end exceeds `len()`.
    pub fn drain<R>(&mut self, range: R) -> Drain<'_, T>
    where
        R: RangeBounds<usize>,
    {
        let len = self.len;
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end + 1,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        assert!(
            start <= end,
            "drain range starts at {} but ends at {}",
            start,
            end
        );
        assert!(end <= len, "drain range end {} beyond length {}", end, len);
        Drain::new(self, start, end)
    }

    /// Borrowing iterator over the live elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.ptr, self.len) }
    }

    /// Borrowing mutable iterator over the live elements.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.ptr, self.len) }
    }

    /// Decomposes the vector into its buffer pointer, capacity, and
    /// length without dropping anything.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, usize) {
        let this = mem::ManuallyDrop::new(self);
        (this.ptr, this.cap, this.len)
    }

    /// Grows to the scaled capacity for `required` total slots. Callers
    /// check `required > capacity()` before calling.
    fn grow_for(&mut self, required: usize) {
        debug_assert!(required > self.cap);
        self.reallocate(scaled_capacity(required));
    }

    /// Moves the buffer to a fresh allocation of exactly `new_cap` slots.
    /// The allocator relocates the live elements bitwise and releases the
    /// old block in the same call.
    #[allow(clippy::expect_used)]
    fn reallocate(&mut self, new_cap: usize) {
        assert!(
            mem::size_of::<T>() != 0,
            "zero-sized element types are not supported"
        );
        debug_assert!(new_cap >= self.len && new_cap > 0);

        let new_layout = match Layout::array::<T>(new_cap) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        };
        if new_layout.size() > isize::MAX as usize {
            capacity_overflow();
        }

        let new_ptr = if self.cap == 0 {
            unsafe { alloc(new_layout) }
        } else {
            let old_layout =
                Layout::array::<T>(self.cap).expect("layout was valid at allocation time");
            unsafe { realloc(self.ptr.as_ptr().cast::<u8>(), old_layout, new_layout.size()) }
        };

        self.ptr = match NonNull::new(new_ptr.cast::<T>()) {
            Some(ptr) => ptr,
            None => handle_alloc_error(new_layout),
        };
        self.cap = new_cap;
    }

    /// Releases the buffer. Must only be called while `cap != 0` and all
    /// elements are already destroyed or moved out.
    #[allow(clippy::expect_used)]
    fn deallocate(&mut self) {
        debug_assert!(self.cap != 0);
        let layout = Layout::array::<T>(self.cap).expect("layout was valid at allocation time");
        unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

/// Required minimum times the growth factor, truncated. Never returns
/// less than `required`.
fn scaled_capacity(required: usize) -> usize {
    let scaled = (required as f64 * GROWTH_FACTOR) as usize;
    scaled.max(required)
}

#[cold]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

impl<T> Drop for GrowVec<T> {
    fn drop(&mut self) {
        if self.cap != 0 {
            let live: *mut [T] = self.as_mut_slice();
            unsafe { ptr::drop_in_place(live) };
            self.deallocate();
        }
    }
}

impl<T> Deref for GrowVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for GrowVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for GrowVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for GrowVec<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for GrowVec<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Clone> Clone for GrowVec<T> {
    /// The clone allocates capacity equal to the source's capacity, not
    /// just its length.
    fn clone(&self) -> Self {
        let mut clone = Self::with_capacity(self.cap);
        for value in self {
            unsafe { clone.push_unchecked(value.clone()) };
        }
        clone
    }
}

impl<T: PartialEq> PartialEq for GrowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowVec<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for GrowVec<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for GrowVec<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialOrd> PartialOrd for GrowVec<T> {
    /// Lexicographic over the shared prefix; the first unequal pair
    /// decides, and all-equal prefixes order by length.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for GrowVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for GrowVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, const N: usize> From<[T; N]> for GrowVec<T> {
    /// Reserves `⌊N * 1.5⌋` slots and moves each value in place.
    fn from(values: [T; N]) -> Self {
        let mut vec = Self::with_capacity(scaled_capacity(N));
        for value in values {
            unsafe { vec.push_unchecked(value) };
        }
        vec
    }
}

impl<T: Clone> From<&[T]> for GrowVec<T> {
    /// Reserves `⌊values.len() * 1.5⌋` slots and clones each value in
    /// place.
    fn from(values: &[T]) -> Self {
        let mut vec = Self::with_capacity(scaled_capacity(values.len()));
        for value in values {
            unsafe { vec.push_unchecked(value.clone()) };
        }
        vec
    }
}

impl<T> FromIterator<T> for GrowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T> Extend<T> for GrowVec<T> {
    /// Pre-reserves `⌊(len + lower bound) * 1.5⌋` slots when the iterator
    /// reports a nonzero lower bound, then appends one element at a time.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > 0 {
            let required = self.len.saturating_add(lower);
            if required > self.cap {
                self.reallocate(scaled_capacity(required));
            }
        }
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
