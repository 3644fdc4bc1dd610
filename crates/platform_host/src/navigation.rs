//! Navigation-history contracts used to turn a platform "back" into a modal dismissal.

use std::{cell::RefCell, rc::Rc};

use crate::subscription::{Listener, ListenerRegistry, Subscription};

/// Host service over the platform's navigation history.
///
/// The gallery only needs one kind of synthetic entry (an open preview), so the contract speaks in
/// terms of that entry rather than arbitrary history state.
pub trait NavigationHost {
    /// Pushes a synthetic entry marking an open preview.
    fn push_modal_entry(&self) -> Result<(), String>;

    /// Returns whether the current history entry is the synthetic preview entry.
    fn is_modal_entry_current(&self) -> bool;

    /// Navigates back one entry. Completion is reported through [`Self::on_back_navigation`].
    fn back(&self) -> Result<(), String>;

    /// Registers a listener for back navigations (platform back button or [`Self::back`]).
    fn on_back_navigation(&self, listener: Listener<()>) -> Subscription;
}

#[derive(Debug, Clone, Copy, Default)]
/// Navigation host without history; the synthetic entry is never current.
pub struct NoopNavigationHost;

impl NavigationHost for NoopNavigationHost {
    fn push_modal_entry(&self) -> Result<(), String> {
        Ok(())
    }

    fn is_modal_entry_current(&self) -> bool {
        false
    }

    fn back(&self) -> Result<(), String> {
        Ok(())
    }

    fn on_back_navigation(&self, _listener: Listener<()>) -> Subscription {
        Subscription::noop()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Entry kinds tracked by [`MemoryNavigationHost`].
pub enum HistoryEntry {
    /// The page's own entry.
    Page,
    /// Synthetic preview entry.
    Modal,
}

#[derive(Debug, Clone)]
/// In-memory history stack; `back` pops synchronously and notifies listeners.
pub struct MemoryNavigationHost {
    stack: Rc<RefCell<Vec<HistoryEntry>>>,
    listeners: ListenerRegistry<()>,
}

impl Default for MemoryNavigationHost {
    fn default() -> Self {
        Self {
            stack: Rc::new(RefCell::new(vec![HistoryEntry::Page])),
            listeners: ListenerRegistry::default(),
        }
    }
}

impl MemoryNavigationHost {
    /// Snapshot of the history stack, oldest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.stack.borrow().clone()
    }

    /// Simulates the user pressing the platform back button.
    pub fn press_back_button(&self) {
        let popped = {
            let mut stack = self.stack.borrow_mut();
            if stack.len() > 1 {
                stack.pop();
                true
            } else {
                false
            }
        };
        if popped {
            self.listeners.emit(());
        }
    }
}

impl NavigationHost for MemoryNavigationHost {
    fn push_modal_entry(&self) -> Result<(), String> {
        self.stack.borrow_mut().push(HistoryEntry::Modal);
        Ok(())
    }

    fn is_modal_entry_current(&self) -> bool {
        self.stack.borrow().last() == Some(&HistoryEntry::Modal)
    }

    fn back(&self) -> Result<(), String> {
        if self.stack.borrow().len() <= 1 {
            return Err("no history entry to go back to".to_string());
        }
        self.press_back_button();
        Ok(())
    }

    fn on_back_navigation(&self, listener: Listener<()>) -> Subscription {
        self.listeners.subscribe(listener)
    }
}
