use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Identity of a control registered with an [`UpdateQueue`].
    pub struct ControlId;
}

bitflags::bitflags! {
    /// Pending work for a control before the next frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct UpdateFlags: u8 {
        /// Re-run the layout pass for the control before the next paint.
        const POLISH = 0b01;
        /// Repaint the control.
        const REPAINT = 0b10;
    }
}

/// Coalescing queue of per-control polish/repaint requests.
///
/// Requests OR into the control's pending flags, so asking twice for the
/// same work before the frame pass runs is free. The frame pass calls
/// [`UpdateQueue::drain`] and performs layout/paint for whatever
/// accumulated.
#[derive(Clone, Default)]
pub struct UpdateQueue(Rc<RefCell<SlotMap<ControlId, UpdateFlags>>>);

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> ControlId {
        self.0.borrow_mut().insert(UpdateFlags::empty())
    }

    pub fn unregister(&self, id: ControlId) {
        self.0.borrow_mut().remove(id);
    }

    /// Adds `flags` to the control's pending work. Requests for controls
    /// that were never registered (or already unregistered) are dropped.
    pub fn request(&self, id: ControlId, flags: UpdateFlags) {
        if let Some(pending) = self.0.borrow_mut().get_mut(id) {
            log::trace!("update request {flags:?} for {id:?}");
            *pending |= flags;
        }
    }

    pub fn pending(&self, id: ControlId) -> UpdateFlags {
        self.0.borrow().get(id).copied().unwrap_or_default()
    }

    /// Returns and clears the control's pending flags.
    pub fn take(&self, id: ControlId) -> UpdateFlags {
        match self.0.borrow_mut().get_mut(id) {
            Some(pending) => std::mem::take(pending),
            None => UpdateFlags::empty(),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.0.borrow().values().any(|f| !f.is_empty())
    }

    /// Returns and clears every control with pending work, for the frame
    /// pass.
    pub fn drain(&self) -> Vec<(ControlId, UpdateFlags)> {
        let mut queue = self.0.borrow_mut();
        let mut out = Vec::new();
        for (id, flags) in queue.iter_mut() {
            if !flags.is_empty() {
                out.push((id, std::mem::take(flags)));
            }
        }
        out
    }
}
