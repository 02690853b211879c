//! Remembers which navbar dropdown was open so it can be reopened after a
//! navigation or a back/forward cache restore.

use crate::utils::storage::KeyValueStore;

pub const LAST_OPEN_DROPDOWN_KEY: &str = "lastOpenDropdown";

pub struct DropdownMemory<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DropdownMemory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn remember(&self, id: &str) {
        if !id.is_empty() {
            self.store.set(LAST_OPEN_DROPDOWN_KEY, id);
        }
    }

    /// Forgets `id` only if it is the dropdown currently remembered.
    pub fn forget(&self, id: &str) {
        if !id.is_empty() && self.last().as_deref() == Some(id) {
            self.store.remove(LAST_OPEN_DROPDOWN_KEY);
        }
    }

    pub fn clear(&self) {
        self.store.remove(LAST_OPEN_DROPDOWN_KEY);
    }

    pub fn last(&self) -> Option<String> {
        self.store
            .get(LAST_OPEN_DROPDOWN_KEY)
            .filter(|id| !id.is_empty())
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::rc::Rc;

    use js_sys::{Array, Function, Reflect};
    use log::warn;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, Event, MouseEvent, PageTransitionEvent};

    use super::DropdownMemory;
    use crate::error::SiteError;
    use crate::utils::dom;
    use crate::utils::storage::LocalStore;

    /// `new bootstrap.Dropdown(el).show()`
    fn bootstrap_show(el: &Element) -> Result<(), SiteError> {
        let bootstrap = Reflect::get(&js_sys::global(), &"bootstrap".into()).map_err(SiteError::dom)?;
        let ctor = Reflect::get(&bootstrap, &"Dropdown".into())
            .map_err(SiteError::dom)?
            .dyn_into::<Function>()
            .map_err(|_| SiteError::Dom("bootstrap.Dropdown is not a constructor".to_string()))?;
        let dropdown = Reflect::construct(&ctor, &Array::of1(el)).map_err(SiteError::dom)?;
        let show = Reflect::get(&dropdown, &"show".into())
            .map_err(SiteError::dom)?
            .dyn_into::<Function>()
            .map_err(|_| SiteError::Dom("Dropdown.show missing".to_string()))?;
        show.call0(&dropdown).map_err(SiteError::dom)?;
        Ok(())
    }

    fn reopen_last(memory: &DropdownMemory<LocalStore>) {
        let Some(id) = memory.last() else {
            return;
        };
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&id))
        else {
            return;
        };
        if el.class_list().contains("dropdown-toggle") {
            if let Err(e) = bootstrap_show(&el) {
                warn!("Could not reopen dropdown {}: {}", id, e);
            }
        }
    }

    pub fn attach() -> Result<(), SiteError> {
        let memory = Rc::new(DropdownMemory::new(LocalStore));

        for toggle in dom::query_all(".nav-link.dropdown-toggle")? {
            let id = toggle.id();
            {
                let memory = memory.clone();
                let id = id.clone();
                dom::listen(&toggle, "show.bs.dropdown", move |_: Event| memory.remember(&id))?;
            }
            {
                let memory = memory.clone();
                dom::listen(&toggle, "hide.bs.dropdown", move |_: Event| memory.forget(&id))?;
            }
        }

        reopen_last(&memory);

        let document = dom::document()?;
        {
            let memory = memory.clone();
            dom::listen(&document, "click", move |e: MouseEvent| {
                let inside_dropdown = e
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(".dropdown").ok().flatten())
                    .is_some();
                if !inside_dropdown {
                    memory.clear();
                }
            })?;
        }

        // back/forward cache restores skip load handlers
        dom::listen(&dom::window()?, "pageshow", move |e: PageTransitionEvent| {
            if e.persisted() {
                reopen_last(&memory);
            }
        })?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::attach;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MockKeyValueStore;
    use mockall::predicate::eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for &MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    #[test]
    fn remembers_latest_open_dropdown() {
        let store = MemoryStore::default();
        let memory = DropdownMemory::new(&store);
        memory.remember("servicesDropdown");
        memory.remember("providersDropdown");
        assert_eq!(memory.last().as_deref(), Some("providersDropdown"));
    }

    #[test]
    fn hiding_another_dropdown_keeps_memory() {
        let store = MemoryStore::default();
        let memory = DropdownMemory::new(&store);
        memory.remember("providersDropdown");
        memory.forget("servicesDropdown");
        assert_eq!(memory.last().as_deref(), Some("providersDropdown"));
        memory.forget("providersDropdown");
        assert_eq!(memory.last(), None);
    }

    #[test]
    fn toggles_without_id_are_ignored() {
        let mut store = MockKeyValueStore::new();
        store.expect_set().never();
        store.expect_remove().never();
        store.expect_get().returning(|_| None);
        let memory = DropdownMemory::new(store);
        memory.remember("");
        memory.forget("");
    }

    #[test]
    fn clear_removes_key() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_remove()
            .with(eq(LAST_OPEN_DROPDOWN_KEY))
            .times(1)
            .return_const(());
        DropdownMemory::new(store).clear();
    }

    #[test]
    fn empty_stored_value_reads_as_nothing() {
        let store = MemoryStore::default();
        (&store).set(LAST_OPEN_DROPDOWN_KEY, "");
        assert_eq!(DropdownMemory::new(&store).last(), None);
    }
}
