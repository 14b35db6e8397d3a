//! Owned block of uninitialized element slots.
//!
//! [`RawStorage`] only reserves and releases memory.  It never constructs, reads or drops a
//! `T`; tracking which slots are live is entirely the owner's job.  Dropping a
//! `RawStorage` frees the block without touching its contents.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc, handle_alloc_error};

use tracing::warn;

use crate::error::ShiftBufferError;

/// A single heap allocation able to hold `capacity` values of `T`.
///
/// The handle is movable but not clonable; two live `RawStorage`s never alias.
pub(crate) struct RawStorage<T> {
    ptr: NonNull<T>,
    capacity: usize,
    layout: Layout,
    _marker: PhantomData<T>,
}

impl<T> RawStorage<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Reserves room for at least `capacity` elements (at least one).
    ///
    /// Zero-sized types never allocate and report a capacity of `usize::MAX`.
    pub(crate) fn try_allocate(capacity: usize) -> Result<Self, ShiftBufferError> {
        if Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity: usize::MAX,
                layout: Layout::new::<T>(),
                _marker: PhantomData,
            });
        }

        let capacity = capacity.max(1);
        let layout =
            Layout::array::<T>(capacity).map_err(|_| ShiftBufferError::CapacityOverflow)?;

        // SAFETY: `layout` has a non-zero size because `T` is not zero-sized and
        // `capacity >= 1`.
        let raw = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(raw) {
            Some(ptr) => Ok(Self {
                ptr,
                capacity,
                layout,
                _marker: PhantomData,
            }),
            None => {
                warn!(
                    capacity,
                    bytes = layout.size(),
                    "shift buffer storage allocation failed"
                );
                Err(ShiftBufferError::AllocationFailed { layout })
            }
        }
    }

    /// Infallible counterpart of [`try_allocate`](Self::try_allocate).
    pub(crate) fn allocate(capacity: usize) -> Self {
        match Self::try_allocate(capacity) {
            Ok(storage) => storage,
            Err(err) => raise_allocation_error(err),
        }
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    /// `index <= capacity` must hold.  The returned pointer may refer to an
    /// uninitialized slot.
    #[inline(always)]
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        unsafe { self.ptr.as_ptr().add(index) }
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        if !Self::IS_ZST {
            // SAFETY: `ptr` was obtained from `alloc` with exactly this layout and has
            // not been freed; the contents are the owner's responsibility.
            unsafe { dealloc(self.ptr.as_ptr().cast(), self.layout) }
        }
    }
}

/// Turns an allocation error into the same diverging behavior `Vec` uses.
#[cold]
pub(crate) fn raise_allocation_error(err: ShiftBufferError) -> ! {
    match err {
        ShiftBufferError::AllocationFailed { layout } => handle_alloc_error(layout),
        _ => panic!("capacity overflow"),
    }
}
