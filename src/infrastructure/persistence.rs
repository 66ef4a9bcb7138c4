use std::cell::{Cell, RefCell};

use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

use crate::domain::{
    config::{
        KEY_ALIGNMENTS, KEY_COLORS, KEY_FACTOR, KEY_FILENAME1, KEY_FILENAME2, KEY_ID, KEY_THEME,
        KEY_VIEW_BOX, StateStore, UrlState,
    },
    errors::{DotplotError, DotplotResult},
    logging::{LogComponent, get_logger},
};

const KNOWN_KEYS: [&str; 8] = [
    KEY_VIEW_BOX,
    KEY_COLORS,
    KEY_THEME,
    KEY_ID,
    KEY_ALIGNMENTS,
    KEY_FILENAME1,
    KEY_FILENAME2,
    KEY_FACTOR,
];

/// Keeps `UrlState` in the page query string, rewritten in place with
/// `history.replaceState` so no navigation entry is added.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlStateStore;

impl UrlStateStore {
    fn window() -> DotplotResult<web_sys::Window> {
        web_sys::window().ok_or_else(|| DotplotError::Browser("no window".to_string()))
    }

    fn read() -> DotplotResult<UrlState> {
        let search = Self::window()?.location().search()?;
        let params = UrlSearchParams::new_with_str(&search)?;
        let pairs = KNOWN_KEYS
            .iter()
            .filter_map(|key| params.get(key).map(|value| (*key, value)));
        Ok(UrlState::from_pairs(pairs))
    }
}

impl StateStore for UrlStateStore {
    fn load(&self) -> UrlState {
        Self::read().unwrap_or_else(|e| {
            get_logger().warn(
                LogComponent::Infrastructure("UrlStateStore"),
                &format!("query string unreadable, using defaults: {}", e),
            );
            UrlState::default()
        })
    }

    fn save(&self, state: &UrlState) -> DotplotResult<()> {
        let window = Self::window()?;
        let params = UrlSearchParams::new()?;
        for (key, value) in state.to_pairs() {
            params.append(&key, &value);
        }
        let query = String::from(params.to_string());
        let url = format!("{}?{}", window.location().pathname()?, query);
        window.history()?.replace_state_with_url(&JsValue::NULL, "", Some(&url))?;
        Ok(())
    }
}

/// In-memory store, for tests and hosts without a location bar
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    state: RefCell<UrlState>,
    saves: Cell<usize>,
}

impl MemoryStateStore {
    pub fn new(initial: UrlState) -> Self {
        Self { state: RefCell::new(initial), saves: Cell::new(0) }
    }

    pub fn snapshot(&self) -> UrlState {
        self.state.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> UrlState {
        self.snapshot()
    }

    fn save(&self, state: &UrlState) -> DotplotResult<()> {
        *self.state.borrow_mut() = state.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
