//! FIFO staging buffer whose read cursor advances across its storage.
//!
//! [`ShiftBuffer`] owns one contiguous block of slots.  Live elements occupy the window
//! `[start, start + len)`; every slot outside that window is uninitialized.  Appends
//! place new elements behind the window, removals advance `start`.  Nothing is compacted
//! on removal; when an append runs out of trailing room the window is either shifted back
//! to slot 0 or relocated into a larger block.
//!
//! # Panic behavior
//! Element construction is delegated to the element type (`Clone`) or to a caller-supplied
//! iterator, and destruction to `Drop`.  Any of those may panic.  The buffer never catches
//! such a panic; it commits elements one at a time so that by the time the panic leaves
//! the buffer, `len()` reflects exactly what has been committed and nothing is leaked:
//!
//! | Operation | Committed when element `k` panics |
//! |-----------|-----------------------------------|
//! | [`write`](ShiftBuffer::write) | elements `[0, k)` appended |
//! | [`shove`](ShiftBuffer::shove) | elements `[0, k)` appended, the rest stay in the iterator |
//! | [`read`](ShiftBuffer::read) | elements `[0, k]` transferred (the panic comes from dropping the displaced destination value) |
//! | [`skip`](ShiftBuffer::skip) | elements `[0, k]` removed |
//! | [`Clone`] | nothing: the partial copy is dropped, the source is untouched |
//!
//! Growth only promises that the buffer stays valid and leak-free.  Which of the old or
//! newly appended elements are present after a panic raised while a growth-triggering
//! append was in progress is unspecified.

use core::fmt;
use core::mem;
use core::ptr;
use core::slice;

use tracing::debug;

use crate::error::ShiftBufferError;
use crate::raw::{RawStorage, raise_allocation_error};

/// A first-in first-out buffer for bulk transfer of elements.
///
/// # Example
/// ```rust
/// use shift_collections::ShiftBuffer;
///
/// let mut buffer: ShiftBuffer<u8> = ShiftBuffer::new();
/// buffer.write(&[1, 2, 3, 4]).unwrap();
///
/// let mut out = [0u8; 3];
/// buffer.read(&mut out).unwrap();
/// assert_eq!(out, [1, 2, 3]);
/// assert_eq!(buffer.len(), 1);
/// ```
pub struct ShiftBuffer<T> {
    storage: RawStorage<T>,
    start: usize,
    len: usize,
}

// SAFETY: the buffer exclusively owns its allocation and every live element, exactly like
// `Vec<T>`.
unsafe impl<T: Send> Send for ShiftBuffer<T> {}
// SAFETY: shared access only ever hands out `&T`.
unsafe impl<T: Sync> Sync for ShiftBuffer<T> {}

impl<T> ShiftBuffer<T> {
    /// Capacity used by [`new`](ShiftBuffer::new) and [`Default`].
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Factor by which the capacity is multiplied when the buffer has to grow.
    pub const GROWTH_FACTOR: usize = 2;

    /// Creates an empty buffer with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY) slots.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer able to hold at least `capacity` elements without growing.
    ///
    /// A capacity of zero is rounded up to one so that a fresh buffer can always accept
    /// an element.
    ///
    /// # Panics
    /// Panics on capacity overflow and aborts through `handle_alloc_error` if the
    /// allocator fails, like `Vec::with_capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: RawStorage::allocate(capacity),
            start: 0,
            len: 0,
        }
    }

    /// Fallible counterpart of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ShiftBufferError> {
        Ok(Self {
            storage: RawStorage::try_allocate(capacity)?,
            start: 0,
            len: 0,
        })
    }

    /// Number of elements currently held.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of element slots in the current allocation.
    ///
    /// Zero-sized element types report `usize::MAX`.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Live elements in FIFO order (front first).
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the window `[start, start + len)` lies inside the allocation and holds
        // `len` initialized elements.
        unsafe { slice::from_raw_parts(self.window_ptr(), self.len) }
    }

    /// Mutable view of the live elements in FIFO order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`; `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.window_ptr(), self.len) }
    }

    /// Iterates over the live elements, oldest first.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Element at logical `index` (0 is the oldest element), or `None`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// The element the next read would return.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Appends copies of `items` behind the last element.
    ///
    /// `items` stays untouched and owned by the caller.  Room for all of `items` is made
    /// before the first clone, so allocation failures are reported without any element
    /// having been appended.  If `T::clone` panics on `items[k]`, the clones of
    /// `items[..k]` remain in the buffer and the panic propagates.
    ///
    /// Writing an empty slice never allocates.
    pub fn write(&mut self, items: &[T]) -> Result<(), ShiftBufferError>
    where
        T: Clone,
    {
        if items.is_empty() {
            return Ok(());
        }
        self.make_room(items.len())?;

        for item in items {
            let value = item.clone();
            // SAFETY: `make_room` left trailing room for all of `items`.
            unsafe { self.append_unchecked(value) };
        }
        Ok(())
    }

    /// Moves the elements produced by `items` behind the last element.
    ///
    /// Exactly `items.len()` slots are reserved up front; elements are then pulled one by
    /// one.  If producing element `k` panics, elements `[0, k)` stay in the buffer and
    /// whatever the iterator still holds remains the iterator's to drop.  Pass
    /// `iter.by_ref()` to keep ownership of unconsumed elements when an error is returned.
    ///
    /// ```rust
    /// use shift_collections::ShiftBuffer;
    ///
    /// let mut source = vec![String::from("a"), String::from("b")];
    /// let mut buffer = ShiftBuffer::new();
    /// buffer.shove(source.drain(..)).unwrap();
    ///
    /// assert!(source.is_empty());
    /// assert_eq!(buffer.as_slice(), ["a", "b"]);
    /// ```
    pub fn shove<I>(&mut self, items: I) -> Result<(), ShiftBufferError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut items = items.into_iter();
        let count = items.len();
        if count == 0 {
            return Ok(());
        }
        self.make_room(count)?;

        // `ExactSizeIterator` is a safe trait, so never trust it for more than `count`.
        for _ in 0..count {
            let Some(value) = items.next() else {
                break;
            };
            // SAFETY: `make_room` left trailing room for `count` elements.
            unsafe { self.append_unchecked(value) };
        }
        Ok(())
    }

    /// Appends a single element, growing if needed.
    ///
    /// Room is made before `item` is placed, so on error the buffer is unchanged and
    /// `item` is dropped.
    pub fn push_back(&mut self, item: T) -> Result<(), ShiftBufferError> {
        self.make_room(1)?;
        // SAFETY: `make_room(1)` succeeded.
        unsafe { self.append_unchecked(item) };
        Ok(())
    }

    /// Moves the oldest `destination.len()` elements into `destination`, in order.
    ///
    /// Fails with [`ShiftBufferError::InsufficientItems`] before touching anything if the
    /// buffer holds fewer elements.  Each element is removed from the buffer and then
    /// assigned into its destination slot, dropping the value it displaces.  If that drop
    /// panics for slot `k`, elements `[0, k]` have been transferred and the rest are still
    /// in the buffer.
    ///
    /// Reading never allocates.
    pub fn read(&mut self, destination: &mut [T]) -> Result<(), ShiftBufferError> {
        self.ensure_available(destination.len())?;

        for slot in destination.iter_mut() {
            // SAFETY: `ensure_available` checked there are enough elements.
            let value = unsafe { self.take_front_unchecked() };
            let displaced = mem::replace(slot, value);
            drop(displaced);
        }
        Ok(())
    }

    /// Drops the oldest `count` elements without moving them anywhere.
    pub fn skip(&mut self, count: usize) -> Result<(), ShiftBufferError> {
        self.ensure_available(count)?;
        self.discard_front(count);
        Ok(())
    }

    /// Drops up to `count` of the oldest elements, one at a time.
    pub(crate) fn discard_front(&mut self, count: usize) {
        for _ in 0..count.min(self.len) {
            // SAFETY: the loop never runs more often than there are elements.
            drop(unsafe { self.take_front_unchecked() });
        }
    }

    /// Removes and returns the oldest element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // SAFETY: the buffer is not empty.
            Some(unsafe { self.take_front_unchecked() })
        }
    }

    /// Drops every element, keeping the allocation.
    pub fn clear(&mut self) {
        let window = ptr::slice_from_raw_parts_mut(self.window_ptr(), self.len);
        // Forget the window first so a panicking `Drop` cannot cause a double drop.
        self.start = 0;
        self.len = 0;
        // SAFETY: `window` held initialized elements that are no longer tracked.
        unsafe { ptr::drop_in_place(window) };
    }

    /// Ensures that `additional` more elements can be appended without reallocating.
    ///
    /// This may shift the window to the front of the allocation or grow it.  On error the
    /// buffer is unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ShiftBufferError> {
        self.make_room(additional)
    }

    /// Fallible counterpart of [`Clone::clone`].
    ///
    /// The copy gets a fresh allocation sized to the current element count.  If a clone
    /// panics, the elements already copied are dropped, the new allocation is released
    /// and `self` is left untouched.
    pub fn try_clone(&self) -> Result<Self, ShiftBufferError>
    where
        T: Clone,
    {
        let mut copy = Self::try_with_capacity(self.len)?;
        // Unwinding out of `write` drops `copy`, which releases whatever it already holds.
        copy.write(self.as_slice())?;
        Ok(copy)
    }

    #[inline(always)]
    fn window_ptr(&self) -> *mut T {
        // SAFETY: `start <= capacity` is maintained by every operation.
        unsafe { self.storage.slot(self.start) }
    }

    /// Writes `value` into the slot right behind the window.
    ///
    /// # Safety
    /// `start + len < capacity` must hold.
    #[inline(always)]
    unsafe fn append_unchecked(&mut self, value: T) {
        unsafe { self.storage.slot(self.start + self.len).write(value) };
        self.len += 1;
    }

    /// Moves the front element out and advances the window.
    ///
    /// # Safety
    /// The buffer must not be empty.
    #[inline(always)]
    unsafe fn take_front_unchecked(&mut self) -> T {
        debug_assert!(self.len > 0);
        // SAFETY: the front slot holds an initialized element which stops being tracked
        // as soon as the window advances below.
        let value = unsafe { ptr::read(self.window_ptr()) };
        self.start += 1;
        self.len -= 1;
        if self.len == 0 {
            self.start = 0;
        }
        value
    }

    fn ensure_available(&self, requested: usize) -> Result<(), ShiftBufferError> {
        if requested > self.len {
            Err(ShiftBufferError::InsufficientItems {
                requested,
                available: self.len,
            })
        } else {
            Ok(())
        }
    }

    /// Guarantees trailing room for `additional` elements behind the window.
    fn make_room(&mut self, additional: usize) -> Result<(), ShiftBufferError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(ShiftBufferError::CapacityOverflow)?;
        let capacity = self.storage.capacity();

        if capacity - self.start >= needed {
            return Ok(());
        }

        // Shifting is only worth it once the gap in front is at least as large as the
        // window; that also keeps source and destination from overlapping.
        if needed <= capacity && self.start >= self.len {
            self.shift_to_front();
            return Ok(());
        }

        self.grow(needed)
    }

    #[cold]
    fn shift_to_front(&mut self) {
        debug!(
            start = self.start,
            len = self.len,
            capacity = self.storage.capacity(),
            "shift buffer moving window to front"
        );
        // SAFETY: `start >= len`, so `[start, start + len)` and `[0, len)` are disjoint
        // regions of the same allocation.  The bitwise copy moves every element; the old
        // slots are treated as uninitialized from here on.
        unsafe {
            ptr::copy_nonoverlapping(self.window_ptr(), self.storage.slot(0), self.len);
        }
        self.start = 0;
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self, needed: usize) -> Result<(), ShiftBufferError> {
        let old_capacity = self.storage.capacity();
        let new_capacity = old_capacity.saturating_mul(Self::GROWTH_FACTOR).max(needed);

        // Allocate before touching anything so a failure leaves the buffer as it was.
        let new_storage = RawStorage::try_allocate(new_capacity)?;

        // SAFETY: the new block holds at least `needed >= len` slots and is distinct from
        // the old one.  After the copy the elements live only in the new block; the old
        // block is released without dropping its (now moved-out) contents.
        unsafe {
            ptr::copy_nonoverlapping(self.window_ptr(), new_storage.slot(0), self.len);
        }
        let old_storage = mem::replace(&mut self.storage, new_storage);
        self.start = 0;
        drop(old_storage);

        debug!(
            old_capacity,
            new_capacity = self.storage.capacity(),
            len = self.len,
            "shift buffer grew"
        );
        Ok(())
    }
}

impl<T> Drop for ShiftBuffer<T> {
    fn drop(&mut self) {
        // SAFETY: the window holds exactly the live elements; the allocation itself is
        // released by `RawStorage`'s own drop, which also runs while unwinding.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.window_ptr(), self.len));
        }
    }
}

impl<T: Clone> Clone for ShiftBuffer<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => raise_allocation_error(err),
        }
    }
}

impl<T> Default for ShiftBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ShiftBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ShiftBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq> Eq for ShiftBuffer<T> {}

impl<T> Extend<T> for ShiftBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.reserve(lower) {
            raise_allocation_error(err);
        }
        for item in iter {
            if let Err(err) = self.push_back(item) {
                raise_allocation_error(err);
            }
        }
    }
}

impl<T> FromIterator<T> for ShiftBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl<'a, T> IntoIterator for &'a ShiftBuffer<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
