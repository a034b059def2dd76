use veneer_core::{
    ControlId, Event, Margins, Rect, Scene, SceneNode, Size, SubId, SubcontrolId,
};

use crate::control::{ControlBase, SizeHint, UiContext};

use std::cell::Cell;

/// A styleable container: optionally draws a themed panel behind its
/// contents and reserves the panel's padding around them.
///
/// The box owns almost no state. Its padding and the panel's strut size
/// live in the shared skin under the [`StyledBox::PANEL`] subcontrol; the
/// box only holds the lookup key and a flag saying whether the panel takes
/// part in geometry at all.
///
/// Every setter is equality-gated: calling it with the current effective
/// value performs no store write, no invalidation, no scheduling, and no
/// notification.
pub struct StyledBox {
    base: ControlBase,
    has_panel: Cell<bool>,
    padding_changed: Event<Margins>,
}

impl StyledBox {
    /// The box's only themed subcontrol.
    pub const PANEL: SubcontrolId = SubcontrolId::new("StyledBox", "Panel");

    pub fn new(ctx: &UiContext, parent: Option<ControlId>) -> Self {
        Self::with_panel(true, ctx, parent)
    }

    pub fn with_panel(has_panel: bool, ctx: &UiContext, parent: Option<ControlId>) -> Self {
        Self {
            base: ControlBase::new(ctx, parent),
            has_panel: Cell::new(has_panel),
            padding_changed: Event::new(),
        }
    }

    pub fn base(&self) -> &ControlBase {
        &self.base
    }

    pub fn has_panel(&self) -> bool {
        self.has_panel.get()
    }

    /// Shows or hides the panel. Toggling always changes visible geometry,
    /// so this polishes and repaints unconditionally, unlike a padding
    /// change.
    pub fn set_panel(&self, on: bool) {
        if on != self.has_panel.get() {
            self.has_panel.set(on);

            self.base.reset_implicit_size();
            self.base.polish();
            self.base.update();
        }
    }

    /// Effective panel padding: the skin override if one is set, else the
    /// themed default.
    pub fn padding(&self) -> Margins {
        self.base.skin().padding_hint(Self::PANEL)
    }

    /// Sets the panel padding. Accepts a scalar for uniform margins.
    /// Components are clamped to be non-negative before anything else
    /// happens, so the equality gate compares normalized values.
    pub fn set_padding(&self, padding: impl Into<Margins>) {
        let pd = Margins::ZERO.expanded_to(padding.into());

        if pd != self.base.skin().padding_hint(Self::PANEL) {
            self.base.skin().set_hint(Self::PANEL.padding(), pd);
            self.base.reset_implicit_size();

            if self.base.polish_on_resize() || self.base.auto_layout_children() {
                self.base.polish();
            }

            self.padding_changed.emit(&pd);
        }
    }

    /// Removes the padding override, revealing the themed default. Fires
    /// `padding_changed` with the default value iff an override existed.
    pub fn reset_padding(&self) {
        if self.base.skin().reset_hint(Self::PANEL.padding()) {
            self.base.reset_implicit_size();

            if self.base.polish_on_resize() || self.base.auto_layout_children() {
                self.base.polish();
            }

            self.padding_changed.emit(&self.padding());
        }
    }

    pub fn on_padding_changed(&self, f: impl Fn(&Margins) + 'static) -> SubId {
        self.padding_changed.subscribe(f)
    }

    /// Content area for a box of outer `size`: the panel rect stripped of
    /// the panel padding. Without a panel the whole rect is content.
    pub fn layout_rect_for_size(&self, size: Size) -> Rect {
        if !self.has_panel.get() {
            return self.base.layout_rect_for_size(size);
        }

        let skin = self.base.skin();
        skin.inner_box(Self::PANEL, skin.subcontrol_rect(size, Self::PANEL))
    }

    /// Preferred size comes from the panel's strut hint, independent of the
    /// constraint. Everything else falls back to the base item.
    pub fn contents_size_hint(&self, which: SizeHint, constraint: Size) -> Size {
        if self.has_panel.get() && which == SizeHint::Preferred {
            return self.base.skin().strut_size_hint(Self::PANEL);
        }

        self.base.contents_size_hint(which, constraint)
    }

    /// Paints the themed panel background for a box of outer `size`.
    pub fn paint(&self, scene: &mut Scene, size: Size) {
        if !self.has_panel.get() || size.is_empty() {
            return;
        }

        let skin = self.base.skin();
        let color = skin.background_hint(Self::PANEL);
        if color.is_transparent() {
            return;
        }

        scene.push(SceneNode::Rect {
            rect: skin.subcontrol_rect(size, Self::PANEL),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use veneer_core::{Color, UpdateFlags};

    use super::*;

    fn recorded(boxed: &StyledBox) -> Rc<RefCell<Vec<Margins>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        boxed.on_padding_changed(move |m| sink.borrow_mut().push(*m));
        seen
    }

    #[test]
    fn default_constructed_box_has_panel() {
        let ctx = UiContext::new();
        let b = StyledBox::new(&ctx, None);
        assert!(b.has_panel());
    }

    #[test]
    fn set_panel_is_equality_gated() {
        let ctx = UiContext::new();
        let b = StyledBox::new(&ctx, None);
        let id = b.base().id();

        b.set_panel(false);
        assert!(!b.has_panel());
        assert_eq!(
            ctx.updates.take(id),
            UpdateFlags::POLISH | UpdateFlags::REPAINT
        );

        // same value again: strict no-op
        b.set_panel(false);
        assert_eq!(ctx.updates.pending(id), UpdateFlags::empty());
    }

    #[test]
    fn set_padding_normalizes_negative_components() {
        let ctx = UiContext::new();
        let b = StyledBox::new(&ctx, None);

        b.set_padding(Margins::new(-1.0, 2.0, -3.0, 4.0));
        assert_eq!(b.padding(), Margins::new(0.0, 2.0, 0.0, 4.0));
    }

    #[test]
    fn set_padding_with_current_value_is_a_noop() {
        let ctx = UiContext::new();
        let b = StyledBox::new(&ctx, None);
        b.base().set_polish_on_resize(true);
        let id = b.base().id();
        let seen = recorded(&b);

        b.set_padding(10.0);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(ctx.updates.take(id), UpdateFlags::POLISH);

        // prime the implicit-size cache so invalidation would be visible
        let computed = Cell::new(0);
        let measure = || {
            computed.set(computed.get() + 1);
            Size::ZERO
        };
        b.base().implicit_size(&measure);

        b.set_padding(b.padding());
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(ctx.updates.pending(id), UpdateFlags::empty());
        b.base().implicit_size(&measure);
        assert_eq!(computed.get(), 1);
    }

    #[test]
    fn padding_change_polishes_only_under_layout_policy() {
        let ctx = UiContext::new();
        let b = StyledBox::new(&ctx, None);
        let id = b.base().id();

        // neither policy flag set: invalidate and notify, but no polish
        b.set_padding(3.0);
        assert_eq!(ctx.updates.pending(id), UpdateFlags::empty());

        b.base().set_auto_layout_children(true);
        b.set_padding(5.0);
        assert_eq!(ctx.updates.take(id), UpdateFlags::POLISH);
    }

    #[test]
    fn reset_padding_reverts_to_themed_default() {
        let ctx = UiContext::new();
        ctx.skin
            .set_default(StyledBox::PANEL.padding(), Margins::uniform(2.0));
        let b = StyledBox::new(&ctx, None);
        let seen = recorded(&b);

        b.set_padding(10.0);
        b.reset_padding();
        assert_eq!(b.padding(), Margins::uniform(2.0));
        assert_eq!(
            *seen.borrow(),
            vec![Margins::uniform(10.0), Margins::uniform(2.0)]
        );

        // no override left: strict no-op
        b.reset_padding();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn set_padding_equal_to_default_never_fires() {
        let ctx = UiContext::new();
        ctx.skin
            .set_default(StyledBox::PANEL.padding(), Margins::uniform(2.0));
        let b = StyledBox::new(&ctx, None);
        let seen = recorded(&b);

        b.set_padding(2.0);
        assert!(seen.borrow().is_empty());

        // and since no override was written, reset has nothing to undo
        b.reset_padding();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn panel_off_falls_back_to_base_geometry() {
        let ctx = UiContext::new();
        ctx.skin
            .set_default(StyledBox::PANEL.margin(), Margins::uniform(1.0));
        ctx.skin
            .set_default(StyledBox::PANEL.strut_size(), Size::new(20.0, 10.0));
        let b = StyledBox::with_panel(false, &ctx, None);

        b.set_padding(5.0);
        assert_eq!(b.padding(), Margins::uniform(5.0));

        let size = Size::new(100.0, 50.0);
        assert_eq!(
            b.layout_rect_for_size(size),
            b.base().layout_rect_for_size(size)
        );
        assert_eq!(
            b.contents_size_hint(SizeHint::Preferred, size),
            b.base().contents_size_hint(SizeHint::Preferred, size)
        );
    }

    #[test]
    fn panel_on_layout_rect_is_inset_by_exactly_the_padding() {
        let ctx = UiContext::new();
        ctx.skin
            .set_default(StyledBox::PANEL.margin(), Margins::uniform(1.0));
        let b = StyledBox::new(&ctx, None);
        b.set_padding(2.0);

        let rect = b.layout_rect_for_size(Size::new(100.0, 50.0));
        let panel = ctx
            .skin
            .subcontrol_rect(Size::new(100.0, 50.0), StyledBox::PANEL);
        assert_eq!(panel, Rect::new(1.0, 1.0, 98.0, 48.0));
        assert_eq!(rect, Rect::new(3.0, 3.0, 94.0, 44.0));
    }

    #[test]
    fn preferred_hint_is_the_panel_strut() {
        let ctx = UiContext::new();
        ctx.skin
            .set_default(StyledBox::PANEL.strut_size(), Size::new(20.0, 10.0));
        let b = StyledBox::new(&ctx, None);

        let constraint = Size::new(500.0, 500.0);
        assert_eq!(
            b.contents_size_hint(SizeHint::Preferred, constraint),
            Size::new(20.0, 10.0)
        );
        // only the preferred hint consults the strut
        assert_eq!(
            b.contents_size_hint(SizeHint::Minimum, constraint),
            Size::ZERO
        );
    }

    #[test]
    fn scenario_uniform_padding_fires_once() {
        let ctx = UiContext::new();
        let b = StyledBox::new(&ctx, None);
        assert!(b.has_panel());
        let seen = recorded(&b);

        b.set_padding(10.0);
        assert_eq!(b.padding(), Margins::uniform(10.0));
        assert_eq!(*seen.borrow(), vec![Margins::uniform(10.0)]);
    }

    #[test]
    fn scenario_padding_updates_even_without_panel() {
        let ctx = UiContext::new();
        let b = StyledBox::with_panel(false, &ctx, None);

        b.set_padding(5.0);
        assert_eq!(b.padding(), Margins::uniform(5.0));

        let size = Size::new(40.0, 30.0);
        assert_eq!(b.layout_rect_for_size(size), Rect::from_size(size));
    }

    #[test]
    fn reentrant_observer_terminates_via_equality_gate() {
        let ctx = UiContext::new();
        let b = Rc::new(StyledBox::new(&ctx, None));
        let calls = Rc::new(RefCell::new(0));

        let weak = Rc::downgrade(&b);
        let counter = calls.clone();
        b.on_padding_changed(move |m| {
            *counter.borrow_mut() += 1;
            if let Some(b) = weak.upgrade() {
                // re-entering the setter with the value it just applied
                // must be a no-op
                b.set_padding(*m);
            }
        });

        b.set_padding(10.0);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(b.padding(), Margins::uniform(10.0));
    }

    #[test]
    fn paint_fills_the_panel_rect() {
        let ctx = UiContext::new();
        ctx.skin
            .set_default(StyledBox::PANEL.margin(), Margins::uniform(1.0));
        ctx.skin
            .set_default(StyledBox::PANEL.background(), Color::from_hex("#1E1E1E"));
        let b = StyledBox::new(&ctx, None);

        let mut scene = Scene::new();
        b.paint(&mut scene, Size::new(10.0, 10.0));
        assert_eq!(
            scene.nodes,
            vec![SceneNode::Rect {
                rect: Rect::new(1.0, 1.0, 8.0, 8.0),
                color: Color::from_hex("#1E1E1E"),
            }]
        );

        b.set_panel(false);
        scene.clear();
        b.paint(&mut scene, Size::new(10.0, 10.0));
        assert!(scene.nodes.is_empty());
    }
}
