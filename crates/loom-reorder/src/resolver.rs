//! Drag-reorder resolver.
//!
//! [`ReorderResolver`] turns a continuous drag translation into a live drop
//! index and per-row visual offsets, then commits one move into the host's
//! storage when the gesture ends.
//!
//! # State Machine
//!
//! `Idle -> Dragging -> Idle`. A session starts with [`begin_drag`], is
//! updated by [`update_drag`] and ends with either [`end_drag`] (commit) or
//! [`cancel_drag`] / [`expire_stale`] (no change to the storage).
//!
//! # Invariants
//!
//! 1. At most one session is active per resolver.
//! 2. The live index is always within `0..len`.
//! 3. Committing any preview applies exactly one move, so the storage holds
//!    a permutation of what it held before.
//! 4. `end_drag` always commits the last live index. Ending a gesture never
//!    silently discards a reorder; callers that want a drop zone check use
//!    `cancel_drag` instead.
//!
//! # Failure Modes
//!
//! Calling an operation in the wrong state, or handing over storage whose
//! length differs from the tracked item count, returns a [`ReorderError`]
//! and leaves the resolver unchanged.
//!
//! [`begin_drag`]: ReorderResolver::begin_drag
//! [`update_drag`]: ReorderResolver::update_drag
//! [`end_drag`]: ReorderResolver::end_drag
//! [`cancel_drag`]: ReorderResolver::cancel_drag
//! [`expire_stale`]: ReorderResolver::expire_stale

use std::fmt;
use std::time::Instant;

use loom_core::{ItemId, Point, ReorderError};

use crate::config::ReorderConfig;
use crate::extents::ItemExtents;
use crate::gate::PressGate;
use crate::sequence::{Reorderable, Sequence};

/// Callback fired whenever the live index moves.
pub type IndexChangedHook = Box<dyn FnMut(IndexChange) + Send>;

/// Resolver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// Live index transition reported during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexChange {
    pub from: usize,
    pub to: usize,
}

/// An in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    dragged_id: Option<ItemId>,
    origin_index: usize,
    live_index: usize,
    current_offset: f64,
    started_at: Instant,
    last_update: Instant,
}

impl DragSession {
    /// Id of the dragged item, when the drag was started by id.
    pub fn dragged_id(&self) -> Option<ItemId> {
        self.dragged_id
    }

    /// Index of the dragged item when the drag started.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Slot the item would land in if released now.
    pub fn live_index(&self) -> usize {
        self.live_index
    }

    /// Latest translation along the reorder axis.
    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn last_update(&self) -> Instant {
        self.last_update
    }
}

/// Result of one drag update.
#[derive(Debug, Clone, PartialEq)]
pub struct DragUpdate {
    /// Slot the dragged item would land in if released now
    pub live_index: usize,
    /// Visual offset for every row, indexed by pre-drag position
    pub offsets: Vec<f64>,
    /// Set when this update moved the live index
    pub changed: Option<IndexChange>,
}

impl DragUpdate {
    /// Offset of one row; rows out of range have none.
    pub fn offset(&self, index: usize) -> f64 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }
}

/// A committed reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub from: usize,
    pub to: usize,
    pub dragged_id: Option<ItemId>,
}

impl Commit {
    /// True when the item was dropped back where it started.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Tracks one list's drag-to-reorder interaction.
pub struct ReorderResolver {
    config: ReorderConfig,
    extents: ItemExtents,
    session: Option<DragSession>,
    on_index_changed: Option<IndexChangedHook>,
}

impl fmt::Debug for ReorderResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderResolver")
            .field("len", &self.extents.len())
            .field("session", &self.session)
            .field("has_hook", &self.on_index_changed.is_some())
            .finish()
    }
}

impl ReorderResolver {
    /// Create a resolver for a list with the given extents.
    pub fn new(extents: ItemExtents, config: ReorderConfig) -> Result<Self, ReorderError> {
        extents.validate()?;
        Ok(Self {
            config,
            extents,
            session: None,
            on_index_changed: None,
        })
    }

    /// Create a resolver for `count` rows of equal extent.
    pub fn uniform(count: usize, extent: f64, config: ReorderConfig) -> Result<Self, ReorderError> {
        Self::new(ItemExtents::uniform(extent, count), config)
    }

    /// Install the hook fired on every live index change.
    pub fn on_index_changed(mut self, hook: impl FnMut(IndexChange) + Send + 'static) -> Self {
        self.on_index_changed = Some(Box::new(hook));
        self
    }

    pub fn set_on_index_changed(&mut self, hook: Option<IndexChangedHook>) {
        self.on_index_changed = hook;
    }

    /// Replace the item extents, e.g. after rows were added or removed.
    pub fn set_extents(&mut self, extents: ItemExtents) -> Result<(), ReorderError> {
        if let Some(session) = &self.session {
            return Err(ReorderError::SessionActive { origin: session.origin_index });
        }
        extents.validate()?;
        self.extents = extents;
        Ok(())
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub fn extents(&self) -> &ItemExtents {
        &self.extents
    }

    /// Number of rows tracked.
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    pub fn state(&self) -> DragState {
        if self.session.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// A press gate using this resolver's thresholds.
    pub fn press_gate(&self) -> PressGate {
        PressGate::new(&self.config)
    }

    /// Start dragging the row at `origin_index`.
    pub fn begin_drag(&mut self, origin_index: usize) -> Result<&DragSession, ReorderError> {
        self.start(origin_index, None)
    }

    /// Start dragging the item with the given id.
    pub fn begin_drag_item<T>(
        &mut self,
        sequence: &Sequence<T>,
        id: ItemId,
    ) -> Result<&DragSession, ReorderError> {
        self.check_len(sequence.len())?;
        let origin_index = sequence.index_of(id).ok_or(ReorderError::UnknownItem(id))?;
        self.start(origin_index, Some(id))
    }

    fn start(
        &mut self,
        origin_index: usize,
        dragged_id: Option<ItemId>,
    ) -> Result<&DragSession, ReorderError> {
        if let Some(session) = &self.session {
            return Err(ReorderError::SessionActive { origin: session.origin_index });
        }
        let len = self.extents.len();
        if len == 0 {
            return Err(ReorderError::EmptySequence);
        }
        if origin_index >= len {
            return Err(ReorderError::OriginOutOfRange { index: origin_index, len });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(origin = origin_index, len, "drag session started");

        let now = Instant::now();
        let session = self.session.insert(DragSession {
            dragged_id,
            origin_index,
            live_index: origin_index,
            current_offset: 0.0,
            started_at: now,
            last_update: now,
        });
        Ok(&*session)
    }

    /// Feed the cumulative translation since the drag started.
    ///
    /// NaN translations are treated as no movement.
    pub fn update_drag(&mut self, translation: f64) -> Result<DragUpdate, ReorderError> {
        let spacing = self.config.effective_spacing();
        let session = self.session.as_mut().ok_or(ReorderError::NoActiveSession)?;
        let translation = if translation.is_nan() { 0.0 } else { translation };

        let candidate = self.extents.resolve(session.origin_index, translation, spacing);
        session.current_offset = translation;
        session.last_update = Instant::now();

        let changed = (candidate != session.live_index).then(|| {
            let change = IndexChange { from: session.live_index, to: candidate };
            session.live_index = candidate;
            change
        });

        let offsets = row_offsets(&self.extents, session, spacing);
        let live_index = session.live_index;

        if let Some(change) = changed {
            #[cfg(feature = "tracing")]
            tracing::trace!(from = change.from, to = change.to, "live index changed");

            if let Some(hook) = self.on_index_changed.as_mut() {
                hook(change);
            }
        }

        Ok(DragUpdate { live_index, offsets, changed })
    }

    /// Finish the gesture, moving the dragged item to the live index.
    ///
    /// On error the session stays active so the caller can still cancel it.
    pub fn end_drag<S>(&mut self, sequence: &mut S) -> Result<Commit, ReorderError>
    where
        S: Reorderable + ?Sized,
    {
        if self.session.is_none() {
            return Err(ReorderError::NoActiveSession);
        }
        self.check_len(sequence.len())?;
        let session = self.session.take().ok_or(ReorderError::NoActiveSession)?;

        let commit = Commit {
            from: session.origin_index,
            to: session.live_index,
            dragged_id: session.dragged_id,
        };
        sequence.move_item(commit.from, commit.to);

        #[cfg(feature = "tracing")]
        tracing::debug!(from = commit.from, to = commit.to, "drag committed");

        Ok(commit)
    }

    /// Abandon the gesture without touching the storage.
    pub fn cancel_drag(&mut self) -> Result<DragSession, ReorderError> {
        let session = self.session.take().ok_or(ReorderError::NoActiveSession)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(origin = session.origin_index, "drag cancelled");

        Ok(session)
    }

    /// Cancel a session that has not been updated within the configured timeout.
    ///
    /// Returns the cancelled session, if any. Hosts call this from a tick or
    /// when the list regains focus, to recover from a lost gesture-end event.
    pub fn expire_stale(&mut self, now: Instant) -> Option<DragSession> {
        let timeout = self.config.session_timeout?;
        let stale = self
            .session
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.last_update) >= timeout);
        if !stale {
            return None;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?timeout, "stale drag session expired");

        self.session.take()
    }

    /// Current visual offset of every row; all zero when idle.
    pub fn offsets(&self) -> Vec<f64> {
        match &self.session {
            Some(session) => row_offsets(&self.extents, session, self.config.effective_spacing()),
            None => vec![0.0; self.extents.len()],
        }
    }

    /// Current offsets as displacements along the configured axis.
    pub fn displacements(&self) -> Vec<Point> {
        let axis = self.config.axis;
        self.offsets().into_iter().map(|o| axis.point_along(o)).collect()
    }

    fn check_len(&self, found: usize) -> Result<(), ReorderError> {
        let expected = self.extents.len();
        if found == expected {
            Ok(())
        } else {
            Err(ReorderError::LengthMismatch { expected, found })
        }
    }
}

/// Offsets that open a gap at the live index.
///
/// The dragged row follows the pointer; rows it has passed slide one stride
/// of the dragged row back toward the origin.
fn row_offsets(extents: &ItemExtents, session: &DragSession, spacing: f64) -> Vec<f64> {
    let origin = session.origin_index;
    let live = session.live_index;
    let shift = extents.stride(origin, spacing);

    (0..extents.len())
        .map(|i| {
            if i == origin {
                session.current_offset
            } else if origin < live && i > origin && i <= live {
                -shift
            } else if live < origin && i >= live && i < origin {
                shift
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    fn resolver(count: usize) -> ReorderResolver {
        ReorderResolver::uniform(count, 40.0, ReorderConfig::default().with_spacing(10.0)).unwrap()
    }

    #[test]
    fn test_drag_forward_two_slots() {
        let mut r = resolver(5);
        let mut rows = vec!['A', 'B', 'C', 'D', 'E'];

        r.begin_drag(2).unwrap();
        let live: Vec<usize> = [0.0, 50.0, 100.0]
            .iter()
            .map(|&t| r.update_drag(t).unwrap().live_index)
            .collect();
        assert_eq!(live, [2, 3, 4]);

        let commit = r.end_drag(&mut rows).unwrap();
        assert_eq!(commit, Commit { from: 2, to: 4, dragged_id: None });
        assert_eq!(rows, ['A', 'B', 'D', 'E', 'C']);
        assert_eq!(r.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_backward() {
        let mut r = resolver(5);
        let mut rows = vec!['A', 'B', 'C', 'D', 'E'];

        r.begin_drag(3).unwrap();
        let update = r.update_drag(-60.0).unwrap();
        assert_eq!(update.live_index, 2);
        assert_eq!(update.changed, Some(IndexChange { from: 3, to: 2 }));

        r.end_drag(&mut rows).unwrap();
        assert_eq!(rows, ['A', 'B', 'D', 'C', 'E']);
    }

    #[test]
    fn test_offsets_open_gap() {
        let mut r = resolver(5);
        r.begin_drag(1).unwrap();

        let update = r.update_drag(110.0).unwrap();
        assert_eq!(update.live_index, 3);
        assert_eq!(update.offsets, [0.0, 110.0, -50.0, -50.0, 0.0]);

        let update = r.update_drag(-45.0).unwrap();
        assert_eq!(update.live_index, 0);
        assert_eq!(update.offsets, [50.0, -45.0, 0.0, 0.0, 0.0]);
        assert_eq!(update.offset(9), 0.0);
    }

    #[test]
    fn test_zero_translation_commits_unchanged_order() {
        let mut r = resolver(3);
        let mut rows = vec![1, 2, 3];

        r.begin_drag(1).unwrap();
        let update = r.update_drag(0.0).unwrap();
        assert_eq!(update.changed, None);

        let commit = r.end_drag(&mut rows).unwrap();
        assert!(commit.is_noop());
        assert_eq!(rows, [1, 2, 3]);
    }

    #[test]
    fn test_end_without_update_is_noop() {
        let mut r = resolver(3);
        let mut rows = vec![1, 2, 3];
        r.begin_drag(0).unwrap();
        assert!(r.end_drag(&mut rows).unwrap().is_noop());
        assert_eq!(rows, [1, 2, 3]);
    }

    #[test]
    fn test_live_index_clamped() {
        let mut r = resolver(4);
        r.begin_drag(1).unwrap();
        assert_eq!(r.update_drag(1e9).unwrap().live_index, 3);
        assert_eq!(r.update_drag(-1e9).unwrap().live_index, 0);
        assert_eq!(r.update_drag(f64::NAN).unwrap().live_index, 1);
        assert_eq!(r.session().map(DragSession::current_offset), Some(0.0));
    }

    #[test]
    fn test_hook_fires_on_each_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut r = resolver(5).on_index_changed(move |change| {
            sink.lock().unwrap().push(change);
        });

        r.begin_drag(0).unwrap();
        r.update_drag(10.0).unwrap();
        r.update_drag(30.0).unwrap();
        r.update_drag(40.0).unwrap();
        r.update_drag(130.0).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            [IndexChange { from: 0, to: 1 }, IndexChange { from: 1, to: 3 }]
        );
    }

    #[test]
    fn test_cancel_leaves_storage_untouched() {
        let mut r = resolver(3);
        r.begin_drag(0).unwrap();
        r.update_drag(100.0).unwrap();

        let session = r.cancel_drag().unwrap();
        assert_eq!(session.live_index(), 2);
        assert_eq!(r.offsets(), [0.0, 0.0, 0.0]);
        assert_eq!(r.cancel_drag(), Err(ReorderError::NoActiveSession));
    }

    #[test]
    fn test_restartable_after_commit() {
        let mut r = resolver(3);
        let mut rows = vec!['x', 'y', 'z'];

        r.begin_drag(0).unwrap();
        r.update_drag(50.0).unwrap();
        r.end_drag(&mut rows).unwrap();

        r.begin_drag(2).unwrap();
        r.update_drag(-100.0).unwrap();
        r.end_drag(&mut rows).unwrap();

        assert_eq!(rows, ['z', 'y', 'x']);
    }

    #[test]
    fn test_contract_violations() {
        let mut r = resolver(3);
        let mut rows = vec![0, 1, 2];

        assert_eq!(r.update_drag(1.0), Err(ReorderError::NoActiveSession));
        assert_eq!(r.end_drag(&mut rows), Err(ReorderError::NoActiveSession));
        assert_eq!(
            r.begin_drag(3).unwrap_err(),
            ReorderError::OriginOutOfRange { index: 3, len: 3 }
        );

        r.begin_drag(1).unwrap();
        assert_eq!(r.begin_drag(0).unwrap_err(), ReorderError::SessionActive { origin: 1 });
        assert_eq!(
            r.set_extents(ItemExtents::uniform(40.0, 4)),
            Err(ReorderError::SessionActive { origin: 1 })
        );
    }

    #[test]
    fn test_length_mismatch_keeps_session() {
        let mut r = resolver(3);
        let mut short = vec![0, 1];

        r.begin_drag(0).unwrap();
        r.update_drag(50.0).unwrap();
        assert_eq!(
            r.end_drag(&mut short),
            Err(ReorderError::LengthMismatch { expected: 3, found: 2 })
        );
        assert!(r.is_dragging());
        assert_eq!(short, [0, 1]);
    }

    #[test]
    fn test_empty_list_cannot_drag() {
        let mut r = resolver(0);
        assert_eq!(r.begin_drag(0).unwrap_err(), ReorderError::EmptySequence);
    }

    #[test]
    fn test_invalid_extent_rejected() {
        let err = ReorderResolver::uniform(3, -1.0, ReorderConfig::default()).unwrap_err();
        assert!(matches!(err, ReorderError::InvalidExtent { .. }));
    }

    #[test]
    fn test_drag_by_id_over_sequence() {
        let mut seq = Sequence::from_items(
            ["A", "B", "C", "D"].into_iter().enumerate().map(|(i, s)| (ItemId(i as u64), s)),
        )
        .unwrap();
        let mut r = resolver(4);

        let session = r.begin_drag_item(&seq, ItemId(0)).unwrap();
        assert_eq!(session.origin_index(), 0);
        r.update_drag(100.0).unwrap();
        let commit = r.end_drag(&mut seq).unwrap();

        assert_eq!(commit.dragged_id, Some(ItemId(0)));
        assert_eq!(seq.index_of(ItemId(0)), Some(commit.to));
        assert_eq!(seq.iter().map(|(_, s)| *s).collect::<Vec<_>>(), ["B", "C", "A", "D"]);
    }

    #[test]
    fn test_drag_unknown_id() {
        let seq = Sequence::from_items([(ItemId(1), ()), (ItemId(2), ())]).unwrap();
        let mut r = resolver(2);
        assert_eq!(r.begin_drag_item(&seq, ItemId(9)).unwrap_err(), ReorderError::UnknownItem(ItemId(9)));
        assert!(!r.is_dragging());
    }

    #[test]
    fn test_expire_stale() {
        let config = ReorderConfig::default().with_session_timeout(Some(Duration::from_secs(2)));
        let mut r = ReorderResolver::uniform(3, 40.0, config).unwrap();

        r.begin_drag(1).unwrap();
        assert_eq!(r.expire_stale(Instant::now()), None);
        assert!(r.is_dragging());

        let later = Instant::now() + Duration::from_secs(3);
        let expired = r.expire_stale(later).unwrap();
        assert_eq!(expired.origin_index(), 1);
        assert!(!r.is_dragging());
    }

    #[test]
    fn test_no_timeout_never_expires() {
        let config = ReorderConfig::default().with_session_timeout(None);
        let mut r = ReorderResolver::uniform(3, 40.0, config).unwrap();
        r.begin_drag(1).unwrap();
        assert_eq!(r.expire_stale(Instant::now() + Duration::from_secs(3600)), None);
        assert!(r.is_dragging());
    }

    #[test]
    fn test_variable_extents_offsets_use_dragged_stride() {
        let extents = ItemExtents::variable(vec![20.0, 60.0, 20.0, 20.0]);
        let mut r = ReorderResolver::new(extents, ReorderConfig::default()).unwrap();

        r.begin_drag(1).unwrap();
        let update = r.update_drag(30.0).unwrap();
        assert_eq!(update.live_index, 3);
        assert_eq!(update.offsets, [0.0, 30.0, -60.0, -60.0]);
    }

    #[test]
    fn test_displacements_follow_axis() {
        let config = ReorderConfig::default().with_axis(loom_core::Axis::Horizontal);
        let mut r = ReorderResolver::uniform(2, 30.0, config).unwrap();
        r.begin_drag(0).unwrap();
        r.update_drag(20.0).unwrap();
        assert_eq!(r.displacements(), [Point::new(20.0, 0.0), Point::new(-30.0, 0.0)]);
    }

    #[test]
    fn test_set_extents_when_idle() {
        let mut r = resolver(3);
        r.set_extents(ItemExtents::uniform(40.0, 5)).unwrap();
        assert_eq!(r.len(), 5);
        r.begin_drag(4).unwrap();
    }
}
