//! # Shift Collections
//!
//! A first-in first-out staging buffer for bulk data, built directly on raw storage.
//!
//! This crate provides [`ShiftBuffer`], a container that accumulates elements in chunks and
//! hands them back in the same order.  It is meant for the places where data arrives in
//! pieces of one size and is consumed in pieces of another: protocol decoders, codec
//! input queues, batching layers.
//!
//! ## Key Features
//!
//! * **Explicit copy or move:** [`ShiftBuffer::write`] clones from a slice the caller keeps,
//!   [`ShiftBuffer::shove`] moves elements out of an iterator.
//! * **No compaction on read:** removals only advance a cursor.  The live window is shifted
//!   back to the start of the allocation or relocated only when an append runs out of room.
//! * **Never default-constructs:** unused slots stay uninitialized, so `T` needs neither
//!   `Default` nor `Clone` unless you call an operation that copies.
//! * **Panic safety:** every bulk operation commits element by element.  When `Clone`,
//!   `Drop` or a source iterator panics, the buffer has already accounted for the exact
//!   prefix that went through and leaks nothing.
//! * **Byte streams:** `ShiftBuffer<u8>` implements `std::io::{Read, BufRead, Write}`.
//!
//! ## Capacity
//!
//! * A new buffer always has room for at least one element.
//! * When an append needs more room than is left behind the window, the window is moved to
//!   the front if the allocation is large enough and the gap in front is at least as large
//!   as the window.  Otherwise the capacity is multiplied by
//!   [`ShiftBuffer::GROWTH_FACTOR`] (or raised to what the append needs, if larger).
//! * Fallible entry points return [`ShiftBufferError`] instead of aborting when the
//!   allocator gives up.
//!
//! ## Examples
//!
//! ### Copying in, moving out
//!
//! ```rust
//! use shift_collections::ShiftBuffer;
//!
//! let mut buffer: ShiftBuffer<u8> = ShiftBuffer::with_capacity(16);
//!
//! let items: Vec<u8> = (1..=10).collect();
//! buffer.write(&items).unwrap();
//! assert_eq!(buffer.len(), 10);
//!
//! let mut retrieved = [0u8; 10];
//! buffer.read(&mut retrieved).unwrap();
//! assert_eq!(&retrieved[..], &items[..]);
//! assert!(buffer.is_empty());
//! ```
//!
//! ### Reading more than is there
//!
//! ```rust
//! use shift_collections::{ShiftBuffer, ShiftBufferError};
//!
//! let mut buffer: ShiftBuffer<u32> = ShiftBuffer::new();
//! buffer.write(&[1, 2]).unwrap();
//!
//! let mut out = [0u32; 3];
//! assert_eq!(
//!     buffer.read(&mut out),
//!     Err(ShiftBufferError::InsufficientItems { requested: 3, available: 2 })
//! );
//! assert_eq!(buffer.len(), 2);
//! ```
//!
//! ## Features
//!
//! * `serde`: `Serialize` / `Deserialize` for `ShiftBuffer<T>` as a plain sequence.
//!
//! Run `cargo test --all-features` to include the feature-gated tests.

// --- Module Declarations ---

pub mod error;
pub mod io;
mod raw;
pub mod serde;
pub mod shift_buffer;

// --- Re-exports ---

pub use error::ShiftBufferError;
pub use shift_buffer::ShiftBuffer;
