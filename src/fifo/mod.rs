//! The expiry queue.
//!
//! A doubly-linked list threaded through the stored games themselves: each
//! game carries `before_index`/`after_index`, and `SystemInfo` holds the head
//! and tail. Games are appended at the tail whenever their deadline is
//! refreshed, so deadlines are non-decreasing from head to tail and the sweep
//! only ever looks at the head.
//!
//! ## Ownership of writes
//!
//! Queue operations rewrite *neighbouring* games in the store directly. The
//! game being moved is updated in place and left for the caller to persist,
//! along with the `SystemInfo`, since the caller is usually changing other
//! fields of both anyway.

pub mod queue;

pub use queue::ExpiryQueue;
