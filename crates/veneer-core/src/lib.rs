//! # Veneer core
//!
//! Veneer is a small skinnable-controls toolkit. This crate holds the pieces
//! controls are built from:
//!
//! - [`Skin`] — the shared hint table. Themed properties (padding, strut
//!   sizes, colors) live here, keyed by subcontrol identity, instead of as
//!   fields on the controls. Per-app overrides shadow themed defaults.
//! - [`Event`] — synchronous change notification delivered to observers at
//!   the point of the mutating call.
//! - [`UpdateQueue`] — coalescing polish/repaint scheduling. Setters request
//!   work; the frame pass drains it.
//! - Geometry ([`Size`], [`Rect`], [`Margins`]) and [`Color`].
//!
//! Everything is single-threaded and synchronous: the toolkit's event loop
//! serializes all property mutation and read-back on one thread, so the
//! shared pieces are `Rc<RefCell<_>>` handles, not locks.
//!
//! The contract every change-notifying setter follows:
//!
//! ```text
//! if new != current {
//!     apply;
//!     invalidate cached implicit size;
//!     request re-layout / repaint as policy dictates;
//!     notify observers with the new value;
//! }
//! ```
//!
//! Calling a setter with the current effective value is a strict no-op —
//! no invalidation, no scheduling, no notification. That equality gate is
//! also what terminates recursion when an observer re-enters a setter from
//! its callback.

pub mod color;
pub mod error;
pub mod event;
pub mod geometry;
pub mod scene;
pub mod scheduler;
pub mod skin;

pub use color::*;
pub use error::*;
pub use event::*;
pub use geometry::*;
pub use scene::*;
pub use scheduler::*;
pub use skin::*;
