use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::machine::{BrowserSettings, FeedbackBrowser};

pub const DEFAULT_IDLE_SECS: u64 = 1800;

struct Slot {
    browser: FeedbackBrowser,
    last_seen: Instant,
}

/// Per-session feedback browsers, keyed by the id stored in the session cookie.
///
/// The lock is only held for synchronous state transitions; callers must
/// never hold it across an await.
#[derive(Clone)]
pub struct FeedbackBrowsers {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
    settings: BrowserSettings,
    max_idle: Duration,
}

impl FeedbackBrowsers {
    pub fn new(settings: BrowserSettings, max_idle: Duration) -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            settings,
            max_idle,
        }
    }

    /// Run `f` against the session's browser, creating it on first use.
    pub fn with<R>(&self, session_id: &str, f: impl FnOnce(&mut FeedbackBrowser) -> R) -> R {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let slot = slots.entry(session_id.to_string()).or_insert_with(|| {
            log::debug!("Creating feedback browser for session {session_id}");
            Slot {
                browser: FeedbackBrowser::new(&self.settings),
                last_seen: Instant::now(),
            }
        });
        slot.last_seen = Instant::now();
        f(&mut slot.browser)
    }

    /// Drop browsers not touched within the idle window. Returns how many went.
    pub fn prune_idle(&self) -> usize {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let before = slots.len();
        slots.retain(|_, slot| slot.last_seen.elapsed() < self.max_idle);
        before - slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FeedbackBrowsers {
    fn default() -> Self {
        Self::new(BrowserSettings::default(), Duration::from_secs(DEFAULT_IDLE_SECS))
    }
}
