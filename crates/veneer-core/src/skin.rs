//! # Skin hints
//!
//! Controls do not store their themed properties as plain fields. Each
//! themeable region of a control is a *subcontrol* with a stable identity,
//! and its properties (padding, strut size, background, ...) are resolved
//! per call from a shared [`Skin`]:
//!
//! ```rust
//! use veneer_core::{Margins, Skin, SubcontrolId};
//!
//! const PANEL: SubcontrolId = SubcontrolId::new("StyledBox", "Panel");
//!
//! let skin = Skin::new();
//! skin.set_default(PANEL.padding(), Margins::uniform(4.0));
//! assert_eq!(skin.padding_hint(PANEL), Margins::uniform(4.0));
//!
//! skin.set_hint(PANEL.padding(), Margins::uniform(8.0)); // per-app override
//! skin.reset_hint(PANEL.padding()); // back to the themed default
//! ```
//!
//! Overrides shadow themed defaults; resetting a hint removes the override
//! and reveals the default again. Reads never fail: a missing or mistyped
//! hint yields the aspect's zero value.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::SkinError;
use crate::{Color, Margins, Rect, Size};

/// Identity of a named, independently themeable region within a control.
///
/// Controls expose theirs as consts, e.g. `StyledBox::PANEL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubcontrolId {
    pub control: &'static str,
    pub subcontrol: &'static str,
}

impl SubcontrolId {
    pub const fn new(control: &'static str, subcontrol: &'static str) -> Self {
        Self {
            control,
            subcontrol,
        }
    }

    pub const fn padding(self) -> HintKey {
        HintKey {
            id: self,
            aspect: Aspect::Padding,
        }
    }

    pub const fn margin(self) -> HintKey {
        HintKey {
            id: self,
            aspect: Aspect::Margin,
        }
    }

    pub const fn strut_size(self) -> HintKey {
        HintKey {
            id: self,
            aspect: Aspect::StrutSize,
        }
    }

    pub const fn background(self) -> HintKey {
        HintKey {
            id: self,
            aspect: Aspect::Background,
        }
    }
}

/// Which themed property of a subcontrol a hint describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Aspect {
    Padding,
    Margin,
    StrutSize,
    Background,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HintKey {
    pub id: SubcontrolId,
    pub aspect: Aspect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HintValue {
    Margins(Margins),
    Size(Size),
    Color(Color),
}

impl HintValue {
    fn type_name(&self) -> &'static str {
        match self {
            HintValue::Margins(_) => "margins",
            HintValue::Size(_) => "size",
            HintValue::Color(_) => "color",
        }
    }
}

impl From<Margins> for HintValue {
    fn from(m: Margins) -> Self {
        HintValue::Margins(m)
    }
}

impl From<Size> for HintValue {
    fn from(s: Size) -> Self {
        HintValue::Size(s)
    }
}

impl From<Color> for HintValue {
    fn from(c: Color) -> Self {
        HintValue::Color(c)
    }
}

/// The hint storage itself: themed defaults plus per-app overrides.
#[derive(Default)]
pub struct SkinHintTable {
    defaults: HashMap<HintKey, HintValue>,
    overrides: HashMap<HintKey, HintValue>,
}

impl SkinHintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective value: override if present, else themed default.
    pub fn hint(&self, key: HintKey) -> Option<HintValue> {
        self.overrides
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .copied()
    }

    /// Theme-side registration.
    pub fn set_default(&mut self, key: HintKey, value: impl Into<HintValue>) {
        self.defaults.insert(key, value.into());
    }

    /// Installs or replaces an override. Returns whether the *effective*
    /// value changed, so an override equal to the themed default reports no
    /// change.
    pub fn set_hint(&mut self, key: HintKey, value: impl Into<HintValue>) -> bool {
        let value = value.into();
        let changed = self.hint(key) != Some(value);
        self.overrides.insert(key, value);
        changed
    }

    /// Removes the override for `key`, revealing the themed default.
    /// Returns whether an override existed.
    pub fn reset_hint(&mut self, key: HintKey) -> bool {
        self.overrides.remove(&key).is_some()
    }
}

fn mismatch<T>(key: HintKey, expected: &'static str, found: &HintValue, fallback: T) -> T {
    let err = SkinError::HintTypeMismatch {
        key,
        expected,
        found: found.type_name(),
    };
    log::warn!("{err}");
    fallback
}

/// Cheap-to-clone handle to a [`SkinHintTable`] shared by every control
/// attached to the same toolkit context. Also resolves subcontrol geometry
/// from the registered margin/padding hints.
#[derive(Clone, Default)]
pub struct Skin(Rc<RefCell<SkinHintTable>>);

impl Skin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hint(&self, key: HintKey) -> Option<HintValue> {
        self.0.borrow().hint(key)
    }

    pub fn set_default(&self, key: HintKey, value: impl Into<HintValue>) {
        self.0.borrow_mut().set_default(key, value);
    }

    pub fn set_hint(&self, key: HintKey, value: impl Into<HintValue>) -> bool {
        self.0.borrow_mut().set_hint(key, value)
    }

    pub fn reset_hint(&self, key: HintKey) -> bool {
        self.0.borrow_mut().reset_hint(key)
    }

    /// Effective padding of a subcontrol, `Margins::ZERO` when unset.
    pub fn padding_hint(&self, id: SubcontrolId) -> Margins {
        match self.hint(id.padding()) {
            None => Margins::ZERO,
            Some(HintValue::Margins(m)) => m,
            Some(other) => mismatch(id.padding(), "margins", &other, Margins::ZERO),
        }
    }

    /// Effective outer margin of a subcontrol, `Margins::ZERO` when unset.
    pub fn margin_hint(&self, id: SubcontrolId) -> Margins {
        match self.hint(id.margin()) {
            None => Margins::ZERO,
            Some(HintValue::Margins(m)) => m,
            Some(other) => mismatch(id.margin(), "margins", &other, Margins::ZERO),
        }
    }

    /// Minimum intrinsic size of a subcontrol, independent of any layout
    /// constraint. `Size::ZERO` when unset.
    pub fn strut_size_hint(&self, id: SubcontrolId) -> Size {
        match self.hint(id.strut_size()) {
            None => Size::ZERO,
            Some(HintValue::Size(s)) => s,
            Some(other) => mismatch(id.strut_size(), "size", &other, Size::ZERO),
        }
    }

    /// Fill color of a subcontrol, transparent when unset.
    pub fn background_hint(&self, id: SubcontrolId) -> Color {
        match self.hint(id.background()) {
            None => Color::TRANSPARENT,
            Some(HintValue::Color(c)) => c,
            Some(other) => mismatch(id.background(), "color", &other, Color::TRANSPARENT),
        }
    }

    /// Rect a subcontrol occupies within a control of outer size `outer`:
    /// the outer rect inset by the subcontrol's margin hint.
    pub fn subcontrol_rect(&self, outer: Size, id: SubcontrolId) -> Rect {
        Rect::from_size(outer).inset_by(self.margin_hint(id))
    }

    /// `rect` minus the subcontrol's padding: the area left for content.
    pub fn inner_box(&self, id: SubcontrolId, rect: Rect) -> Rect {
        rect.inset_by(self.padding_hint(id))
    }
}
