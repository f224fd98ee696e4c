//! A single-slot, last-value-wins handoff.
//!
//! The decode path publishes one snapshot per poll cycle; the consumer only
//! ever cares about the most recent one. A queue would add input lag for no
//! benefit, so the slot holds exactly one value and a new publication
//! unconditionally replaces an unread one.
//!
//! ## Algorithm
//!
//! The slot is a sequence lock. The writer bumps a sequence word to an odd
//! value, stores the data, then bumps it to the next even value with release
//! ordering. The reader loads the word, copies the data, and re-checks the
//! word; a mismatch (or an odd value) means the copy may be torn and is
//! retried a bounded number of times, falling back to the reader's cached
//! last-good value.
//!
//! Single writer, single reader: [`Latest::split`] takes `&mut self`, so at
//! most one [`Publisher`] and one [`Watcher`] pair can exist per slot.

use core::{
    cell::UnsafeCell,
    mem::MaybeUninit,
    ptr,
    sync::atomic::{AtomicU32, Ordering, fence},
};

/// Maximum read attempts before falling back to the cached value.
///
/// A retry only happens while a publication is in flight; with the writer's
/// critical section being a single `Copy` store, three attempts are already
/// generous.
const MAX_READ_RETRIES: u32 = 3;

/// The shared slot behind a [`Publisher`]/[`Watcher`] pair.
///
/// `T` must be `Copy`: the value is moved in and out of the slot by plain
/// bitwise copies, which is what makes the torn-read check sufficient.
pub struct Latest<T> {
    /// Even = slot stable, odd = store in flight, zero = never published.
    seq: AtomicU32,
    slot: UnsafeCell<MaybeUninit<T>>,
}

// SAFETY: Latest<T> is safe to share across contexts because:
// - `seq` is only touched through atomic operations
// - `slot` is only written by the unique Publisher, and every read of it is
//   validated against `seq` before the copy is used
// - T: Copy means the slot never needs Drop and holds no borrowed data beyond
//   what Send already permits
unsafe impl<T: Copy + Send> Sync for Latest<T> {}

impl<T: Copy> Latest<T> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            seq: AtomicU32::new(0),
            slot: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Splits the slot into its unique producer and consumer handles.
    ///
    /// The `&mut` receiver guarantees no other handles to this slot exist at
    /// the time of the split, which is what makes the single-writer store in
    /// [`Publisher::publish`] sound.
    pub fn split(&mut self) -> (Publisher<'_, T>, Watcher<'_, T>) {
        let shared = &*self;
        (Publisher { shared }, Watcher { shared, last: None })
    }
}

impl<T: Copy> Default for Latest<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The producing half of a [`Latest`] slot.
///
/// Owned by the poll scheduler; publishing never blocks and never fails.
pub struct Publisher<'a, T: Copy> {
    shared: &'a Latest<T>,
}

impl<T: Copy> Publisher<'_, T> {
    /// Stores a new value, replacing any unread previous one.
    pub fn publish(&mut self, value: T) {
        let seq = &self.shared.seq;

        // Mark the store as in flight. Relaxed is enough for the odd store
        // itself; the release fence keeps it ordered before the data write.
        let s = seq.load(Ordering::Relaxed);
        seq.store(s.wrapping_add(1), Ordering::Relaxed);
        fence(Ordering::Release);

        // SAFETY: this is the only Publisher for the slot (split() takes
        // &mut Latest) and publish takes &mut self, so no other write can
        // be in flight. Readers validate against `seq` before trusting
        // their copy.
        unsafe { (*self.shared.slot.get()).write(value) };

        // Even again: the slot is stable and the data write is visible to
        // any reader that observes this store.
        seq.store(s.wrapping_add(2), Ordering::Release);
    }
}

/// The consuming half of a [`Latest`] slot.
///
/// `read` is non-blocking and always returns the freshest consistent value
/// this watcher has seen; it holds a cached copy so a publication racing
/// with the read degrades to "previous value", never to a torn one.
pub struct Watcher<'a, T: Copy> {
    shared: &'a Latest<T>,
    last: Option<T>,
}

impl<T: Copy> Watcher<'_, T> {
    /// Returns the most recently published value, or `None` if nothing has
    /// ever been published.
    pub fn read(&mut self) -> Option<T> {
        let seq = &self.shared.seq;

        for _ in 0..MAX_READ_RETRIES {
            let s1 = seq.load(Ordering::Acquire);
            if s1 == 0 {
                // Nothing published yet.
                return self.last;
            }
            if s1 & 1 == 1 {
                // Store in flight; try again.
                continue;
            }

            // SAFETY: s1 is even and non-zero, so a publication completed
            // before the load above; acquire ordering makes its data write
            // visible. The volatile read pairs with the re-check below to
            // detect a store racing with the copy.
            let value = unsafe { ptr::read_volatile((*self.shared.slot.get()).as_ptr()) };

            fence(Ordering::Acquire);
            if seq.load(Ordering::Relaxed) == s1 {
                self.last = Some(value);
                return self.last;
            }
        }

        // A store kept racing with us; the previous snapshot is still valid.
        self.last
    }
}
