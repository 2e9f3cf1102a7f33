//! Where `UsersState` lives while operations run.
//!
//! The controller only needs short synchronous access between await points.
//! In the browser the state is a Leptos `RwSignal`, so every change re-renders
//! the page; native code (and the test suite) uses a plain `Rc<RefCell<_>>`.

use super::state::UsersState;
use std::{cell::RefCell, rc::Rc};

/// Shared handle to the users state.
///
/// Accessors return `None` once the state is gone (an unmounted component),
/// which tells the controller to stop applying results.
pub trait StateStore: Clone + 'static {
    fn modify<R>(&self, f: impl FnOnce(&mut UsersState) -> R) -> Option<R>;

    fn read<R>(&self, f: impl FnOnce(&UsersState) -> R) -> Option<R>;
}

impl StateStore for Rc<RefCell<UsersState>> {
    fn modify<R>(&self, f: impl FnOnce(&mut UsersState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn read<R>(&self, f: impl FnOnce(&UsersState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

#[cfg(target_arch = "wasm32")]
impl StateStore for leptos::prelude::RwSignal<UsersState> {
    fn modify<R>(&self, f: impl FnOnce(&mut UsersState) -> R) -> Option<R> {
        use leptos::prelude::Update;
        self.try_update(f)
    }

    fn read<R>(&self, f: impl FnOnce(&UsersState) -> R) -> Option<R> {
        use leptos::prelude::WithUntracked;
        self.try_with_untracked(f)
    }
}
