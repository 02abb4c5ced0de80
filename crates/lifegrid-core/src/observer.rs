//! One-to-many push notification.
//!
//! A [`Subject`] delivers a payload to every attached [`Listener`], in
//! attachment order, synchronously. Subjects hold listeners through
//! [`Weak`] handles: attaching never extends a listener's lifetime, and a
//! listener that has been dropped is pruned on the next [`Subject::notify`].
//!
//! A single listener may be attached to any number of subjects. The grid
//! uses this to attach one display listener to every cell.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::warn;

/// Receiver of payloads pushed by a [`Subject`].
pub trait Listener<P> {
    /// Called once per [`Subject::notify`] the listener is attached to.
    fn on_notify(&mut self, payload: &P);
}

/// Shared handle callers keep to a listener they attach.
///
/// The caller owns the `Rc`; subjects only keep a [`Weak`] to it.
pub type SharedListener<P> = Rc<RefCell<dyn Listener<P>>>;

/// A publisher that pushes payloads of type `P` to attached listeners.
pub struct Subject<P> {
    listeners: Vec<Weak<RefCell<dyn Listener<P>>>>,
}

impl<P> Subject<P> {
    /// Create a subject with no listeners.
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Attach a listener.
    ///
    /// Returns `false` without attaching twice if the listener is already
    /// registered, so a payload is never delivered to it more than once.
    pub fn attach(&mut self, listener: &SharedListener<P>) -> bool {
        if self.has_listener(listener) {
            return false;
        }
        self.listeners.push(Rc::downgrade(listener));
        true
    }

    /// Detach a listener. Detaching one that is not attached is a no-op.
    ///
    /// Returns whether anything was removed.
    pub fn detach(&mut self, listener: &SharedListener<P>) -> bool {
        let before = self.listeners.len();
        self.listeners
            .retain(|weak| !std::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(listener)));
        self.listeners.len() != before
    }

    /// Whether `listener` is currently attached.
    pub fn has_listener(&self, listener: &SharedListener<P>) -> bool {
        self.listeners
            .iter()
            .any(|weak| std::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(listener)))
    }

    /// Number of attached listeners that are still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Deliver `payload` to every attached listener in attachment order.
    ///
    /// Dropped listeners are pruned. A listener that is already borrowed
    /// (a re-entrant notification) is skipped and logged. Returns the number
    /// of listeners that received the payload.
    pub fn notify(&mut self, payload: &P) -> usize {
        let mut delivered: usize = 0;
        self.listeners.retain(|weak| {
            let Some(listener) = weak.upgrade() else {
                return false;
            };
            if let Ok(mut receiver) = listener.try_borrow_mut() {
                receiver.on_notify(payload);
                delivered = delivered.saturating_add(1);
            } else {
                warn!("listener is already borrowed, notification skipped");
            }
            true
        });
        delivered
    }
}

impl<P> Default for Subject<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Subject<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every payload it receives.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<u32>,
    }

    impl Listener<u32> for Recorder {
        fn on_notify(&mut self, payload: &u32) {
            self.seen.push(*payload);
        }
    }

    /// Appends its own tag to a shared log, to observe delivery order.
    struct Tagged {
        tag: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Listener<u32> for Tagged {
        fn on_notify(&mut self, _payload: &u32) {
            self.log.borrow_mut().push(self.tag);
        }
    }

    fn recorder() -> (Rc<RefCell<Recorder>>, SharedListener<u32>) {
        let concrete = Rc::new(RefCell::new(Recorder::default()));
        let shared: SharedListener<u32> = concrete.clone();
        (concrete, shared)
    }

    #[test]
    fn notify_reaches_all_listeners() {
        let mut subject = Subject::new();
        let (a, a_handle) = recorder();
        let (b, b_handle) = recorder();
        subject.attach(&a_handle);
        subject.attach(&b_handle);

        assert_eq!(subject.notify(&7), 2);
        assert_eq!(a.borrow().seen, vec![7]);
        assert_eq!(b.borrow().seen, vec![7]);
    }

    #[test]
    fn delivery_follows_attachment_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first: SharedListener<u32> = Rc::new(RefCell::new(Tagged {
            tag: "first",
            log: Rc::clone(&log),
        }));
        let second: SharedListener<u32> = Rc::new(RefCell::new(Tagged {
            tag: "second",
            log: Rc::clone(&log),
        }));

        let mut subject = Subject::new();
        subject.attach(&first);
        subject.attach(&second);
        subject.notify(&1);

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn attach_is_idempotent() {
        let mut subject = Subject::new();
        let (a, handle) = recorder();
        assert!(subject.attach(&handle));
        assert!(!subject.attach(&handle));

        subject.notify(&1);
        assert_eq!(a.borrow().seen.len(), 1);
    }

    #[test]
    fn detach_stops_delivery() {
        let mut subject = Subject::new();
        let (a, handle) = recorder();
        subject.attach(&handle);
        assert!(subject.detach(&handle));

        assert_eq!(subject.notify(&3), 0);
        assert!(a.borrow().seen.is_empty());
    }

    #[test]
    fn detach_unknown_listener_is_noop() {
        let mut subject = Subject::new();
        let (_a, attached) = recorder();
        let (_b, stranger) = recorder();
        subject.attach(&attached);

        assert!(!subject.detach(&stranger));
        assert_eq!(subject.listener_count(), 1);
    }

    #[test]
    fn subject_does_not_own_listeners() {
        let mut subject = Subject::new();
        {
            let (_a, handle) = recorder();
            subject.attach(&handle);
            assert_eq!(subject.listener_count(), 1);
        }
        assert_eq!(subject.listener_count(), 0);
        assert_eq!(subject.notify(&9), 0);
    }

    #[test]
    fn listener_shared_across_subjects() {
        let mut left = Subject::new();
        let mut right = Subject::new();
        let (a, handle) = recorder();
        left.attach(&handle);
        right.attach(&handle);

        left.notify(&1);
        right.notify(&2);
        assert_eq!(a.borrow().seen, vec![1, 2]);
    }

    #[test]
    fn borrowed_listener_is_skipped() {
        let mut subject = Subject::new();
        let (a, handle) = recorder();
        subject.attach(&handle);

        let guard = a.borrow_mut();
        assert_eq!(subject.notify(&5), 0);
        drop(guard);

        assert_eq!(subject.notify(&6), 1);
        assert_eq!(a.borrow().seen, vec![6]);
    }
}
