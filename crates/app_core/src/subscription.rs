use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Registration guard. Dropping it runs the release hook exactly once.
#[must_use = "dropping a Subscription unregisters it immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription that owns nothing. Returned when a platform signal
    /// could not be attached.
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Keep the registration alive for as long as its source lives.
    pub fn detach(mut self) {
        self.release = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

type Callback<T> = Rc<dyn Fn(&T)>;

/// Ordered list of observers for a single-threaded store.
pub struct Observers<T> {
    next_id: Cell<u64>,
    entries: Rc<RefCell<Vec<(u64, Callback<T>)>>>,
}

impl<T: 'static> Observers<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, Rc::new(callback)));

        let entries = Rc::downgrade(&self.entries);
        Subscription::new(move || {
            if let Some(entries) = entries.upgrade() {
                entries.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Calls every observer in subscription order. Observers may subscribe,
    /// unsubscribe or trigger another notify while this runs.
    pub fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<T: 'static> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}
