//! Change notifications emitted by node sets, edge sets and graphs.

/// A structural change, delivered synchronously after the mutation completed.
#[derive(Debug, PartialEq, Eq)]
pub enum Change<'a, T> {
    /// An element was inserted.
    Added(&'a T),
    /// An element was removed.
    Removed(&'a T),
    /// The collection was cleared.
    Reset,
}

impl<T> Clone for Change<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Change<'_, T> {}

impl<'a, T> Change<'a, T> {
    /// The affected element, if any.
    pub fn element(&self) -> Option<&'a T> {
        match *self {
            Self::Added(item) | Self::Removed(item) => Some(item),
            Self::Reset => None,
        }
    }

    /// Short name for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Added(_) => "add",
            Self::Removed(_) => "remove",
            Self::Reset => "reset",
        }
    }
}

type Callback<T> = Box<dyn for<'c> FnMut(Change<'c, T>)>;

/// Registered change callbacks, invoked in registration order.
///
/// Callbacks only see the change value. They hold no handle on the
/// collection that fired them, so they cannot mutate it mid-notification.
pub struct Observers<T> {
    callbacks: Vec<Callback<T>>,
}

impl<T> Observers<T> {
    /// Create an empty callback list.
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: for<'c> FnMut(Change<'c, T>) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Drop every registered callback.
    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub(crate) fn notify(&mut self, change: Change<'_, T>) {
        for callback in self.callbacks.iter_mut() {
            callback(change);
        }
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<u32> = Observers::new();

        let first = Rc::clone(&seen);
        observers.subscribe(move |c| first.borrow_mut().push(format!("first:{}", c.name())));
        let second = Rc::clone(&seen);
        observers.subscribe(move |c| second.borrow_mut().push(format!("second:{}", c.name())));

        observers.notify(Change::Added(&5));
        observers.notify(Change::Reset);

        assert_eq!(
            *seen.borrow(),
            vec!["first:add", "second:add", "first:reset", "second:reset"]
        );
    }

    #[test]
    fn test_change_element() {
        assert_eq!(Change::Removed(&3).element(), Some(&3));
        assert_eq!(Change::<u8>::Reset.element(), None);
    }
}
