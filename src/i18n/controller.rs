//! Language controller: owns the current UI language and keeps the
//! document's annotated text in sync with it.

use crate::i18n::store::{lookup, lookup_plain, TranslationStore, TranslationTable};
use crate::i18n::Language;
use crate::preferences::{PreferenceStore, PREFERRED_LANGUAGE_KEY};
use crate::ui::document::{Document, NodeKind, LANGUAGE_SWITCHER_ID};
use crate::ui::feedback::Feedback;
use serde::Serialize;
use std::fmt::Display;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Broadcast buffer; slow subscribers lose the oldest notifications.
const EVENT_CAPACITY: usize = 16;

/// Notification sent after a successful language switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageChanged {
    pub language: Language,
}

pub struct LanguageController<P: PreferenceStore> {
    language: Language,
    table: &'static TranslationTable,
    preferences: P,
    events: broadcast::Sender<LanguageChanged>,
}

impl<P: PreferenceStore> LanguageController<P> {
    /// Create a controller, restoring the persisted language.
    ///
    /// A missing or unrecognized preference yields Chinese.
    pub fn new(preferences: P) -> Self {
        let language = preferences
            .get(PREFERRED_LANGUAGE_KEY)
            .map(|code| Language::resolve(&code))
            .unwrap_or_default();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        debug!("Language controller starting in {}", language);

        Self {
            language,
            table: TranslationStore::load(language),
            preferences,
            events,
        }
    }

    /// Load the table for the current language and sync the whole document.
    pub fn initialize<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.table = TranslationStore::load(self.language);
        self.full_dom_sync(doc);
    }

    /// Switch the UI language.
    ///
    /// Unknown codes resolve to Chinese. Switching to the current language
    /// does nothing. Otherwise the preference is persisted, the document is
    /// re-synced, a [`LanguageChanged`] event goes out and a confirmation
    /// toast is shown. Returns whether the language changed.
    pub fn switch_language<D>(&mut self, code: &str, ui: &mut D) -> bool
    where
        D: Document + Feedback + ?Sized,
    {
        let language = match Language::from_code(code) {
            Ok(language) => language,
            Err(e) => {
                warn!("{}, using {}", e, Language::default_language());
                Language::default_language()
            }
        };

        if language == self.language {
            debug!("Language already {}, nothing to do", language);
            return false;
        }

        self.language = language;
        self.table = TranslationStore::load(language);

        if let Err(e) = self.preferences.set(PREFERRED_LANGUAGE_KEY, language.code()) {
            warn!("Failed to persist language preference: {:#}", e);
        }

        self.full_dom_sync(ui);

        // No receivers is fine: nobody is listening yet
        let _ = self.events.send(LanguageChanged { language });

        info!("Language switched to {}", language);
        ui.success(&self.t_plain("language.switched"));

        true
    }

    /// Re-render every annotated node and the language selector.
    pub fn full_dom_sync<D: Document + ?Sized>(&self, doc: &mut D) {
        let nodes = doc.translatable_nodes();
        let titled = doc.titled_nodes();

        for node in &nodes {
            let text = lookup_plain(self.table, &node.key);
            match node.kind {
                NodeKind::Text => doc.set_text(node.id, &text),
                NodeKind::Input => doc.set_placeholder(node.id, &text),
            }
        }

        for node in &titled {
            doc.set_title(node.id, &lookup_plain(self.table, &node.key));
        }

        if !doc.set_control_value(LANGUAGE_SWITCHER_ID, self.language.code()) {
            debug!("No language switcher in document");
        }

        debug!(
            "Synced {} text nodes and {} titles to {}",
            nodes.len(),
            titled.len(),
            self.language
        );
    }

    /// Translate `key` in the current language.
    pub fn t<V: Display>(&self, key: &str, params: &[(&str, V)]) -> String {
        lookup(self.table, key, params)
    }

    pub fn t_plain(&self, key: &str) -> String {
        lookup_plain(self.table, key)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn table(&self) -> &'static TranslationTable {
        self.table
    }

    /// Receive a [`LanguageChanged`] for every future switch.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }
}
