use std::cell::Cell;

use veneer_core::{ControlId, Rect, Size, Skin, UpdateFlags, UpdateQueue};

/// Shared toolkit services handed to every control on construction:
/// the skin hint table and the update queue. Cloning is cheap; all clones
/// refer to the same underlying state.
#[derive(Clone, Default)]
pub struct UiContext {
    pub skin: Skin,
    pub updates: UpdateQueue,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Which size a layout pass is asking a control for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeHint {
    Minimum,
    Preferred,
    Maximum,
}

/// Common state and services of every control.
///
/// Controls hold one of these in a field and delegate to it — there is no
/// inheritance. It owns the cached implicit size, the polish/repaint
/// requests, the layout policy flags, and the fallback geometry a control
/// uses for regions it does not theme.
pub struct ControlBase {
    id: ControlId,
    parent: Option<ControlId>,
    skin: Skin,
    updates: UpdateQueue,
    implicit_size: Cell<Option<Size>>,
    polish_on_resize: Cell<bool>,
    auto_layout_children: Cell<bool>,
}

impl ControlBase {
    pub fn new(ctx: &UiContext, parent: Option<ControlId>) -> Self {
        let id = ctx.updates.register();
        log::trace!("control {id:?} attached, parent {parent:?}");
        Self {
            id,
            parent,
            skin: ctx.skin.clone(),
            updates: ctx.updates.clone(),
            implicit_size: Cell::new(None),
            polish_on_resize: Cell::new(false),
            auto_layout_children: Cell::new(false),
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    pub fn skin(&self) -> &Skin {
        &self.skin
    }

    /// Drops the cached implicit size. The next [`ControlBase::implicit_size`]
    /// call recomputes it; nothing is recomputed eagerly.
    pub fn reset_implicit_size(&self) {
        self.implicit_size.set(None);
    }

    /// Cached preferred size, filled from `compute` on first use.
    pub fn implicit_size(&self, compute: impl FnOnce() -> Size) -> Size {
        match self.implicit_size.get() {
            Some(size) => size,
            None => {
                let size = compute();
                self.implicit_size.set(Some(size));
                size
            }
        }
    }

    /// Requests a layout recompute for this control before the next paint.
    pub fn polish(&self) {
        self.updates.request(self.id, UpdateFlags::POLISH);
    }

    /// Requests a repaint of this control.
    pub fn update(&self) {
        self.updates.request(self.id, UpdateFlags::REPAINT);
    }

    /// Whether a size-affecting property change should re-polish
    /// immediately.
    pub fn polish_on_resize(&self) -> bool {
        self.polish_on_resize.get()
    }

    pub fn set_polish_on_resize(&self, on: bool) {
        self.polish_on_resize.set(on);
    }

    /// Whether the control lays out its children itself.
    pub fn auto_layout_children(&self) -> bool {
        self.auto_layout_children.get()
    }

    pub fn set_auto_layout_children(&self, on: bool) {
        self.auto_layout_children.set(on);
    }

    /// Fallback content area for a control of outer `size`: the whole rect
    /// at the origin.
    pub fn layout_rect_for_size(&self, size: Size) -> Rect {
        Rect::from_size(size)
    }

    /// Fallback intrinsic size: a bare item has none.
    pub fn contents_size_hint(&self, _which: SizeHint, _constraint: Size) -> Size {
        Size::ZERO
    }
}

impl Drop for ControlBase {
    fn drop(&mut self) {
        self.updates.unregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implicit_size_is_cached_until_reset() {
        let ctx = UiContext::new();
        let base = ControlBase::new(&ctx, None);

        let computed = Cell::new(0);
        let measure = || {
            computed.set(computed.get() + 1);
            Size::new(10.0, 10.0)
        };

        assert_eq!(base.implicit_size(&measure), Size::new(10.0, 10.0));
        assert_eq!(base.implicit_size(&measure), Size::new(10.0, 10.0));
        assert_eq!(computed.get(), 1);

        base.reset_implicit_size();
        base.implicit_size(&measure);
        assert_eq!(computed.get(), 2);
    }

    #[test]
    fn drop_unregisters_from_queue() {
        let ctx = UiContext::new();
        let id = {
            let base = ControlBase::new(&ctx, None);
            base.polish();
            base.id()
        };
        assert_eq!(ctx.updates.pending(id), UpdateFlags::empty());
        assert!(!ctx.updates.has_pending());
    }

    #[test]
    fn polish_and_update_coalesce() {
        let ctx = UiContext::new();
        let base = ControlBase::new(&ctx, None);

        base.polish();
        base.update();
        base.polish();
        assert_eq!(
            ctx.updates.pending(base.id()),
            UpdateFlags::POLISH | UpdateFlags::REPAINT
        );
    }
}
