#![no_std]

//! `GrowVec`: a growable vector implementation over manually managed raw memory.
//!
//! `GrowVec` owns a contiguous buffer of element slots allocated as raw,
//! untyped memory. Elements are constructed in place when an operation adds
//! them and destroyed in place when an operation removes them; slots beyond
//! the logical length stay uninitialized. The container tracks its length
//! and capacity separately and never allocates until it holds an element.
//!
//! This crate is `no_std` compatible and depends only on `core` and `alloc`.
//!
//! # Growth Policy
//!
//! Whenever the buffer must grow to hold a required minimum number of
//! elements, the new capacity is that minimum multiplied by 1.5, truncated
//! to a whole slot count. Pushing into a full vector therefore produces the
//! capacity sequence 1, 3, 6, 10, 16, 25, … Two operations bypass the
//! factor and reallocate to exact counts: [`GrowVec::reserve`] (which takes
//! the absolute target capacity and only ever grows) and
//! [`GrowVec::shrink_to_fit`] (which drops capacity to the current length,
//! releasing the buffer entirely when the vector is empty).
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut vec = GrowVec::from_elem(0u8, 3);
//! assert_eq!((vec.len(), vec.capacity()), (3, 4)); // 3 * 1.5 = 4.5, truncated
//!
//! vec.reserve(10);
//! assert_eq!(vec.capacity(), 10); // exact, no factor
//!
//! vec.clear();
//! vec.shrink_to_fit();
//! assert_eq!(vec.capacity(), 0); // empty vector holds no buffer
//! ```
//!
//! # Time Complexity
//! - `push()`: amortized O(1) - grows by a constant factor
//! - indexing, `try_get()`: O(1)
//! - `pop()`: O(1)
//! - `insert()`, `remove()`: O(n) - shifts the tail by one slot
//! - `drain()`, `retain()`: O(n)
//! - `clear()`: O(n) in element drops; capacity is retained
//!
//! # Examples
//!
//! Building and mutating a sequence:
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut vec = GrowVec::from([2, 3, 4, 5, 6, 7]);
//!
//! let removed: Vec<i32> = vec.drain(1..3).collect();
//! assert_eq!(removed, [3, 4]);
//! assert_eq!(vec, [2, 5, 6, 7]);
//!
//! vec.insert(1, 9);
//! assert_eq!(vec, [2, 9, 5, 6, 7]);
//! assert_eq!(vec.remove(1), 9);
//! assert_eq!(vec, [2, 5, 6, 7]);
//! ```
//!
//! Checked access is the one operation with an explicit error; unchecked
//! and panicking access exist beside it:
//!
//! ```
//! use growvec::GrowVec;
//!
//! let vec = GrowVec::from([10, 20]);
//! assert_eq!(vec.try_get(1), Ok(&20));
//! assert!(vec.try_get(2).is_err());
//! assert_eq!(vec[0], 10); // panics when out of range
//! ```
//!
//! # Move and Swap Semantics
//!
//! Moving a `GrowVec` transfers buffer ownership without touching any
//! element. `core::mem::take` is the assignment-style move: it leaves the
//! source valid and empty with zero capacity. `core::mem::swap` exchanges
//! the buffers of two vectors in O(1); the elements keep their addresses.
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut source = GrowVec::from([1, 2, 3]);
//! let taken = core::mem::take(&mut source);
//! assert_eq!(taken, [1, 2, 3]);
//! assert_eq!((source.len(), source.capacity()), (0, 0));
//! ```
//!
//! # Iterator Support
//!
//! The borrowing iterators [`Iter`] and [`IterMut`] are thin cursors over
//! the buffer - a pair of raw position pointers - with exact length and
//! double-ended stepping. A mutable iterator converts into a read-only one
//! but never the other way. The borrow checker ties both to the vector, so
//! no iterator can survive a reallocation or an element shift.
//!
//! ```
//! use growvec::{GrowVec, Iter};
//!
//! let mut vec = GrowVec::from(['a', 'b', 'c']);
//!
//! let reversed: Vec<char> = vec.iter().rev().copied().collect();
//! assert_eq!(reversed, ['c', 'b', 'a']);
//!
//! for slot in vec.iter_mut() {
//!     *slot = slot.to_ascii_uppercase();
//! }
//! let read_only: Iter<'_, char> = vec.iter_mut().into();
//! assert_eq!(read_only.as_slice(), &['A', 'B', 'C']);
//! ```
//!
//! # `no_std` Compatibility
//!
//! This crate is designed to work in `no_std` environments:
//! - Uses only `core` and `alloc` functionality
//! - Allocation failure diverges through `alloc::alloc::handle_alloc_error`
//! - Zero-sized element types are not supported and panic on first use of
//!   the buffer
//!
//! Enable the optional `std` feature for std environments:
//! ```toml
//! [dependencies]
//! growvec = { version = "0.1", features = ["std"] }
//! ```

extern crate alloc;

mod core;
mod drain;
mod error;
mod iter;

// Re-export public types and traits
pub use core::GrowVec;
pub use drain::Drain;
pub use error::GrowVecError;
pub use iter::{IntoIter, Iter, IterMut};
