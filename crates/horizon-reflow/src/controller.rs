//! Update orchestration.
//!
//! [`CollectionController`] ties the pieces together: it stores each new
//! sequence in the [`SequenceModel`], diffs it against the previous one with
//! the configured [`DiffStrategy`] and applies the result to its
//! [`VisualCollection`] as one batch.
//!
//! Updates take `&mut self`, so only the owner can run them and never two at
//! once. Other threads hand work to the owner through an [`UpdateSender`];
//! the owner drains the queue in FIFO order with
//! [`process_pending`](CollectionController::process_pending).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_reflow::controller::CollectionController;
//! use horizon_reflow::model::SequenceModel;
//! use horizon_reflow::palette::Color;
//! use horizon_reflow::view::{CollectionView, SwatchAdapter};
//!
//! let model = Arc::new(SequenceModel::new(vec![Color::RED, Color::GREEN]));
//! let view = CollectionView::new(model.clone(), SwatchAdapter);
//! let mut controller = CollectionController::new(model, view);
//!
//! let sender = controller.sender();
//! std::thread::spawn(move || sender.replace(vec![Color::GREEN, Color::RED]))
//!     .join()
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(controller.process_pending().unwrap(), 1);
//! assert_eq!(controller.current(), vec![Color::GREEN, Color::RED]);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};

use horizon_reflow_core::logging::{span_names, targets};
use horizon_reflow_core::{PerfSpan, Signal};

use crate::batch::{BatchApplier, VisualCollection};
use crate::config::CollectionConfig;
use crate::diff::{DiffStrategy, OperationSet};
use crate::error::UpdateError;
use crate::model::{Item, SequenceModel};

/// Computes a new sequence from the current one.
pub type TransformFn<T> = Box<dyn FnOnce(&[T]) -> Vec<T> + Send>;

/// Work queued for a controller.
pub enum UpdateRequest<T> {
    /// Show this sequence.
    Replace(Vec<T>),
    /// Show the sequence computed from the current one when the request runs.
    Transform(TransformFn<T>),
    /// Rebuild the view from the current sequence without animation.
    ReloadData,
}

impl<T: fmt::Debug> fmt::Debug for UpdateRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(items) => f.debug_tuple("Replace").field(items).finish(),
            Self::Transform(_) => f.write_str("Transform(..)"),
            Self::ReloadData => f.write_str("ReloadData"),
        }
    }
}

/// A cloneable handle for queueing updates from any thread.
pub struct UpdateSender<T> {
    tx: Sender<UpdateRequest<T>>,
}

impl<T> Clone for UpdateSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Item> UpdateSender<T> {
    /// Queues a request.
    ///
    /// Fails with [`UpdateError::QueueDisconnected`] once the controller is gone.
    pub fn send(&self, request: UpdateRequest<T>) -> Result<(), UpdateError> {
        self.tx
            .send(request)
            .map_err(|_| UpdateError::QueueDisconnected)
    }

    /// Queues a replacement sequence.
    pub fn replace(&self, items: Vec<T>) -> Result<(), UpdateError> {
        self.send(UpdateRequest::Replace(items))
    }

    /// Queues a transformation of whatever sequence is current when it runs.
    pub fn transform<F>(&self, f: F) -> Result<(), UpdateError>
    where
        F: FnOnce(&[T]) -> Vec<T> + Send + 'static,
    {
        self.send(UpdateRequest::Transform(Box::new(f)))
    }

    /// Queues a full reload.
    pub fn reload_data(&self) -> Result<(), UpdateError> {
        self.send(UpdateRequest::ReloadData)
    }
}

/// What one update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    pub strategy: DiffStrategy,
    /// Length of the previous sequence.
    pub before: usize,
    /// Length of the new sequence.
    pub after: usize,
    pub inserted: usize,
    pub removed: usize,
    pub moved: usize,
    pub reloaded: usize,
    /// Time spent diffing and applying.
    pub elapsed: Duration,
}

impl fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} diff {} -> {}: {} inserted, {} removed, {} moved, {} reloaded in {:?}",
            self.strategy.name(),
            self.before,
            self.after,
            self.inserted,
            self.removed,
            self.moved,
            self.reloaded,
            self.elapsed
        )
    }
}

/// Drives a visual collection from successive sequences.
pub struct CollectionController<T: Item, V> {
    model: Arc<SequenceModel<T>>,
    view: V,
    strategy: DiffStrategy,
    applier: BatchApplier,
    tx: Sender<UpdateRequest<T>>,
    rx: Receiver<UpdateRequest<T>>,

    /// Emitted after an update was applied.
    pub updated: Signal<UpdateSummary>,
}

impl<T: Item, V: VisualCollection> CollectionController<T, V> {
    /// Creates a controller for `view`, which must be showing the contents of `model`.
    pub fn new(model: Arc<SequenceModel<T>>, view: V) -> Self {
        let (tx, rx) = unbounded();
        Self {
            model,
            view,
            strategy: DiffStrategy::default(),
            applier: BatchApplier::new(),
            tx,
            rx,
            updated: Signal::new(),
        }
    }

    /// Set the diff strategy.
    pub fn with_strategy(mut self, strategy: DiffStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set whether moves with identical source and destination are dropped.
    pub fn with_skip_stationary_moves(mut self, skip: bool) -> Self {
        self.applier = self.applier.with_skip_stationary_moves(skip);
        self
    }

    /// Applies the strategy and batch settings of `config`.
    pub fn with_config(self, config: &CollectionConfig) -> Self {
        self.with_strategy(config.strategy)
            .with_skip_stationary_moves(config.skip_stationary_moves)
    }

    /// The diff strategy in use.
    pub fn strategy(&self) -> DiffStrategy {
        self.strategy
    }

    /// The shared sequence model.
    pub fn model(&self) -> &Arc<SequenceModel<T>> {
        &self.model
    }

    /// The visual collection.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the visual collection, for driving animations.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// A copy of the current sequence.
    pub fn current(&self) -> Vec<T> {
        self.model.snapshot()
    }

    /// A handle other threads can queue updates through.
    pub fn sender(&self) -> UpdateSender<T> {
        UpdateSender {
            tx: self.tx.clone(),
        }
    }

    /// Number of queued requests.
    pub fn pending_count(&self) -> usize {
        self.rx.len()
    }

    /// Shows `new`, animating the difference to the current sequence.
    ///
    /// Returns the operations that were applied. If the view rejects the
    /// batch the previous sequence is restored and the error returned; the
    /// update is not retried.
    pub fn update(&mut self, new: Vec<T>) -> Result<OperationSet, UpdateError> {
        let _perf = PerfSpan::new(span_names::UPDATE);
        let start = Instant::now();

        let old = self.model.replace(new);
        let strategy = self.strategy;
        let operations = self.model.with_items(|new| strategy.diff(&old, new));
        let before = old.len();

        let operations = match self.applier.apply(operations, &mut self.view) {
            Ok(operations) => operations,
            Err(err) => {
                tracing::warn!(
                    target: targets::CONTROLLER,
                    %err,
                    "update rejected; restoring previous sequence"
                );
                self.model.replace(old);
                return Err(err.into());
            }
        };

        let summary = UpdateSummary {
            strategy,
            before,
            after: self.model.len(),
            inserted: operations.insertions().len(),
            removed: operations.removals().len(),
            moved: operations.moves().len(),
            reloaded: operations.reloads().len(),
            elapsed: start.elapsed(),
        };
        tracing::info!(target: targets::CONTROLLER, %summary, "update applied");
        self.updated.emit(summary);
        Ok(operations)
    }

    /// Rebuilds the view from the current sequence without animation.
    pub fn reload_data(&mut self) {
        tracing::debug!(
            target: targets::CONTROLLER,
            items = self.model.len(),
            "reloading data"
        );
        self.view.reset();
    }

    /// Runs one request.
    ///
    /// Returns the applied operations, or `None` for a reload.
    pub fn apply_request(
        &mut self,
        request: UpdateRequest<T>,
    ) -> Result<Option<OperationSet>, UpdateError> {
        match request {
            UpdateRequest::Replace(items) => self.update(items).map(Some),
            UpdateRequest::Transform(f) => {
                // The closure may touch the shared model, so no lock is held.
                let current = self.model.snapshot();
                self.update(f(&current)).map(Some)
            }
            UpdateRequest::ReloadData => {
                self.reload_data();
                Ok(None)
            }
        }
    }

    /// Runs every queued request in arrival order.
    ///
    /// Stops at the first failing request and returns its error; requests
    /// queued behind it stay queued. Returns the number of requests run.
    pub fn process_pending(&mut self) -> Result<usize, UpdateError> {
        let mut processed = 0;
        while let Ok(request) = self.rx.try_recv() {
            tracing::trace!(target: targets::CONTROLLER, ?request, "processing request");
            self.apply_request(request)?;
            processed += 1;
        }
        Ok(processed)
    }

    /// Waits up to `timeout` for one request and runs it.
    ///
    /// Returns `false` if nothing arrived in time.
    pub fn process_next_timeout(&mut self, timeout: Duration) -> Result<bool, UpdateError> {
        // The controller holds a sender itself, so the only error is a timeout.
        let Ok(request) = self.rx.recv_timeout(timeout) else {
            return Ok(false);
        };
        self.apply_request(request)?;
        Ok(true)
    }
}
