//! Signal/slot notifications for Horizon Reflow.
//!
//! Models, views and controllers announce state changes through [`Signal`]s.
//! Connected slots run synchronously on the emitting thread, in connection
//! order, which matches the single-owner update model of the collection
//! engine: a batch is committed, then everyone interested hears about it
//! before the next update starts.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - Emits notifications to connected slots
//! - [`ConnectionId`] - Identifies a connection for later disconnection
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Example
//!
//! ```
//! use horizon_reflow_core::Signal;
//!
//! let count_changed = Signal::<usize>::new();
//!
//! let id = count_changed.connect(|count| {
//!     println!("collection now holds {count} items");
//! });
//!
//! count_changed.emit(4);
//! count_changed.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle to one slot connected to a [`Signal`].
    ///
    /// Returned by [`Signal::connect`] and accepted by [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A change notification with any number of connected slots.
///
/// `Args` is the payload handed to every slot by reference. Use `()` for
/// payload-free signals and tuples for several values.
///
/// Slots are cloned out of the connection table before they run, so a slot
/// may connect or disconnect other slots (or itself) while the signal is
/// being emitted. Changes made that way take effect on the next emission.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Creates a signal without slots.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Adds `slot`, to run on every later emission.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Adds `slot` for as long as the returned guard lives.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }

    /// Removes one slot. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Removes every slot.
    pub fn disconnect_all(&self) {
        let mut connections = self.connections.lock();
        crate::reflow_debug!(removed = connections.len(), "disconnecting all slots");
        connections.clear();
    }

    /// Number of slots currently connected.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Mutes or unmutes the signal. A muted signal drops emissions.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether the signal is muted.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Runs every slot with `args`, oldest connection first.
    #[tracing::instrument(skip_all, target = "horizon_reflow_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slots so the lock is not held while user code runs.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(
            target: targets::SIGNAL,
            connection_count = slots.len(),
            "emitting signal"
        );

        for slot in slots {
            slot(&args);
        }
    }
}

/// RAII guard returned by [`Signal::connect_scoped`].
///
/// The connection is removed when the guard is dropped.
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        if self.signal.disconnect(self.id) {
            crate::reflow_trace!(connection = ?self.id, "scoped connection dropped");
        }
    }
}
