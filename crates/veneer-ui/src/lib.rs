//! Skinnable controls.
//!
//! Controls compose a [`ControlBase`] (identity, implicit-size cache,
//! polish/repaint requests, layout policy flags) with themed properties
//! resolved from the shared [`veneer_core::Skin`]. A setter that observes no
//! change does nothing at all; one that does applies the new state,
//! invalidates the cached implicit size, schedules re-layout/repaint per
//! policy, and notifies observers before returning.
//!
//! ```rust
//! use veneer_ui::{StyledBox, UiContext};
//!
//! let ctx = UiContext::new();
//! let boxed = StyledBox::new(&ctx, None);
//! boxed.set_padding(10.0);
//! assert_eq!(boxed.padding(), veneer_core::Margins::uniform(10.0));
//! ```

pub mod control;
pub mod styled_box;

pub use control::{ControlBase, SizeHint, UiContext};
pub use styled_box::StyledBox;
