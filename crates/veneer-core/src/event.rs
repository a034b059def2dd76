use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

pub type SubId = usize;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Synchronous observer list.
///
/// Emission happens after the owning control has fully updated its state and
/// before the mutating call returns, so observers always see consistent
/// state. The subscriber list is snapshotted before delivery: an observer may
/// subscribe, emit, or re-enter the emitting control's setters from inside
/// its callback. Recursion through a setter terminates via the setter's
/// equality gate, not via any lock.
pub struct Event<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    subs: SmallVec<[Subscriber<T>; 2]>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Inner {
            subs: SmallVec::new(),
        })))
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        inner.subs.push(Rc::new(f));
        inner.subs.len() - 1
    }

    /// Delivers `value` to every subscriber present when the call started.
    pub fn emit(&self, value: &T) {
        let subs: SmallVec<[Subscriber<T>; 2]> = self.0.borrow().subs.clone();
        for s in &subs {
            s(value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.borrow().subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().subs.is_empty()
    }
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}
