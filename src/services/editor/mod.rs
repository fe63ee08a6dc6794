//! Opening the external item editor.
//!
//! The editor lives outside the app (the admin site in a browser). We cannot
//! observe a browser tab closing, so [`BrowserEditor`] treats the app
//! regaining focus as the user coming back from the editor.

use anyhow::{Context, Result};

pub type CompletionCallback = Box<dyn FnOnce() + Send>;

pub trait ExternalEditor {
    /// Open `url`; `on_close` runs once the user is done with it.
    fn open(&mut self, url: &str, on_close: CompletionCallback) -> Result<()>;
}

/// Admin change page for one schedule item.
pub fn item_editor_url(admin_base_url: &str, item_id: &str) -> String {
    format!(
        "{}/admin/schedule/scheduleitem/{}/change/",
        admin_base_url.trim_end_matches('/'),
        urlencoding::encode(item_id)
    )
}

type Opener = Box<dyn Fn(&str) -> std::io::Result<()> + Send>;

pub struct BrowserEditor {
    opener: Opener,
    pending: Vec<(String, CompletionCallback)>,
}

impl Default for BrowserEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserEditor {
    pub fn new() -> Self {
        Self::with_opener(|url| webbrowser::open(url))
    }

    pub fn with_opener<F>(opener: F) -> Self
    where
        F: Fn(&str) -> std::io::Result<()> + Send + 'static,
    {
        Self {
            opener: Box::new(opener),
            pending: Vec::new(),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Run every pending completion. Returns how many ran.
    pub fn notify_focus_regained(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for (url, on_close) in pending {
            log::debug!("Editor for {} considered closed", url);
            on_close();
        }
        count
    }
}

impl ExternalEditor for BrowserEditor {
    fn open(&mut self, url: &str, on_close: CompletionCallback) -> Result<()> {
        (self.opener)(url).with_context(|| format!("Failed to open editor at {}", url))?;
        log::info!("Opened external editor {}", url);
        self.pending.push((url.to_string(), on_close));
        Ok(())
    }
}
