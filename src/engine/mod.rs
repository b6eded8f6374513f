//! The conversion engine: one controller wiring detection, rates, selection,
//! mutations and the popup surface together

use crate::bridge::PopupBridge;
use crate::detector;
use crate::dom::{DocumentView, MutationRecord, NodeId};
use crate::format;
use crate::models::{ConversionEntry, ConversionRegistry, CurrencyPair, Message, MessageResponse, PairSide};
use crate::rates::{RateCache, RateSource};
use crate::scheduler::{Debouncer, TaskKey};
use crate::selection::{Overlay, SelectionController, SelectionState};
use crate::store::KeyValueStore;
use crate::watcher::MutationWatcher;

/// Preference key for the source currency.
pub const FROM_CURRENCY_KEY: &str = "fromCurrency";
/// Preference key for the target currency.
pub const TO_CURRENCY_KEY: &str = "toCurrency";

/// Tuning constants. The depth bound and debounce windows are empirically
/// tuned values carried over as configuration rather than hard-coded.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base currency the rate endpoint is queried for.
    pub base_currency: String,
    /// Pair used when no preference has been persisted yet.
    pub default_from: String,
    pub default_to: String,
    /// Ancestor-search depth, including the starting element.
    pub search_depth: usize,
    /// Trailing window for pointer-move probing, roughly one frame.
    pub pointer_debounce_ms: u64,
    /// Trailing window coalescing full reconversion passes.
    pub update_debounce_ms: u64,
    /// Age beyond which cached rates are refreshed.
    pub rates_ttl_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            default_from: "USD".to_string(),
            default_to: "EUR".to_string(),
            search_depth: 4,
            pointer_debounce_ms: 16,
            update_debounce_ms: 100,
            rates_ttl_ms: 24 * 60 * 60 * 1000,
        }
    }
}

/// Event-driven controller for in-page price conversion.
///
/// The host owns the document, clock and event sources and calls in on
/// initialization, pointer and click events, observer batches and
/// cross-context messages; debounced work runs when the host pumps
/// [`Engine::tick`]. Everything is synchronous and single-threaded.
pub struct Engine {
    config: Config,
    prefs: Box<dyn KeyValueStore>,
    rates: RateCache,
    pair: CurrencyPair,
    registry: ConversionRegistry,
    selection: SelectionController,
    watcher: MutationWatcher,
    debouncer: Debouncer,
    popup: PopupBridge,
}

impl Engine {
    pub fn new(
        config: Config,
        prefs: Box<dyn KeyValueStore>,
        cache_store: Box<dyn KeyValueStore>,
        source: Box<dyn RateSource>,
    ) -> Self {
        let rates = RateCache::new(
            cache_store,
            source,
            config.base_currency.clone(),
            config.rates_ttl_ms,
        );
        let pair = CurrencyPair::new(config.default_from.clone(), config.default_to.clone());
        let selection = SelectionController::new(config.search_depth);
        Self {
            config,
            prefs,
            rates,
            pair,
            registry: ConversionRegistry::new(),
            selection,
            watcher: MutationWatcher::new(),
            debouncer: Debouncer::new(),
            popup: PopupBridge::new(),
        }
    }

    /// Loads preferences, then rates, then arms the mutation watcher.
    ///
    /// Never fails: a failed rate load only leaves the engine partially
    /// initialized, with all rate-dependent operations as no-ops.
    pub fn init(&mut self, now_ms: u64) {
        let from = self
            .prefs
            .get(FROM_CURRENCY_KEY)
            .unwrap_or_else(|| self.config.default_from.clone());
        let to = self
            .prefs
            .get(TO_CURRENCY_KEY)
            .unwrap_or_else(|| self.config.default_to.clone());
        self.pair = CurrencyPair::new(from, to);

        self.rates.load(now_ms);
        if !self.rates.is_loaded() {
            tracing::warn!("no rates available; conversion disabled until a successful fetch");
        }

        self.watcher.connect();
    }

    /// Explicit teardown: selection off, overlay hidden, watcher detached,
    /// registry and pending work dropped.
    pub fn shutdown(&mut self) {
        self.selection.deactivate();
        self.watcher.disconnect();
        self.registry.clear();
        self.debouncer.cancel_all();
        self.popup.close_list();
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn overlay(&self) -> &Overlay {
        self.selection.overlay()
    }

    pub fn wants_selection_cursor(&self) -> bool {
        self.selection.wants_selection_cursor()
    }

    pub fn popup(&self) -> &PopupBridge {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut PopupBridge {
        &mut self.popup
    }

    /// Effective rate line for the popup, when rates are loaded.
    pub fn rate_info(&self) -> Option<String> {
        PopupBridge::rate_info(self.rates.table(), &self.pair)
    }

    /// Codes for the popup dropdown under the current filter.
    pub fn visible_codes(&self) -> Vec<String> {
        self.popup.visible_codes(self.rates.table())
    }

    // ---- events ----

    pub fn set_selection_mode(&mut self, enabled: bool) {
        if enabled {
            self.selection.activate();
        } else {
            self.selection.deactivate();
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, now_ms: u64) {
        if !self.selection.is_active() {
            return;
        }
        self.selection.pointer_moved(x, y);
        self.debouncer
            .schedule(TaskKey::PointerProbe, now_ms, self.config.pointer_debounce_ms);
    }

    /// Click while selection mode is active converts the picked element and
    /// exits selection mode. Returns whether the host must prevent the
    /// default click action.
    pub fn click(&mut self, doc: &mut dyn DocumentView, x: f64, y: f64) -> bool {
        if !self.selection.is_active() {
            return false;
        }
        if let Some(node) = self.selection.click(&*doc, x, y) {
            self.convert(doc, node);
        }
        true
    }

    /// Observer batch from the host; schedules a debounced reconversion when
    /// the batch touches a registered element.
    pub fn on_mutations(&mut self, doc: &dyn DocumentView, records: &[MutationRecord], now_ms: u64) {
        let registered = self.registry.nodes();
        if self.watcher.is_relevant(doc, &registered, records) {
            self.debouncer
                .schedule(TaskKey::UpdateAll, now_ms, self.config.update_debounce_ms);
        }
    }

    /// Runs any debounced work whose window has elapsed.
    pub fn tick(&mut self, now_ms: u64, doc: &mut dyn DocumentView) {
        for task in self.debouncer.due(now_ms) {
            match task {
                TaskKey::PointerProbe => self.selection.probe(&*doc),
                TaskKey::UpdateAll => self.update_all(doc),
            }
        }
    }

    /// Cross-context message entry point; every handled message is
    /// acknowledged.
    pub fn handle_message(&mut self, message: Message, now_ms: u64) -> MessageResponse {
        match message {
            Message::ToggleSelection { selection_mode } => {
                self.set_selection_mode(selection_mode);
            }
            Message::CurrencyUpdated {
                from_currency,
                to_currency,
            } => {
                self.set_pair(CurrencyPair::new(from_currency, to_currency), now_ms);
            }
        }
        MessageResponse::ok()
    }

    // ---- popup interactions ----

    /// Picker selection: updates one half of the pair, closes the dropdown,
    /// persists and schedules a reconversion.
    pub fn select_currency(&mut self, side: PairSide, code: &str, now_ms: u64) {
        let mut pair = self.pair.clone();
        match side {
            PairSide::From => pair.from = code.to_string(),
            PairSide::To => pair.to = code.to_string(),
        }
        self.popup.close_list();
        self.set_pair(pair, now_ms);
    }

    /// Swap control: exchanges the two sides and persists the swap.
    pub fn swap_currencies(&mut self, now_ms: u64) {
        let mut pair = self.pair.clone();
        pair.swap();
        self.set_pair(pair, now_ms);
    }

    fn set_pair(&mut self, pair: CurrencyPair, now_ms: u64) {
        self.pair = pair;
        self.prefs.set(FROM_CURRENCY_KEY, &self.pair.from);
        self.prefs.set(TO_CURRENCY_KEY, &self.pair.to);
        self.debouncer
            .schedule(TaskKey::UpdateAll, now_ms, self.config.update_debounce_ms);
    }

    // ---- conversion ----

    /// Registers and converts a single element in place. No-op without
    /// loaded rates or when no price is detectable in the element's text.
    pub fn convert(&mut self, doc: &mut dyn DocumentView, node: NodeId) {
        if !self.rates.is_loaded() {
            return;
        }
        let raw = match doc.text(node) {
            Some(text) => text.trim().to_string(),
            None => return,
        };
        let price = match detector::extract_price(&raw) {
            Some(price) => price,
            None => return,
        };
        self.registry.register(
            node,
            ConversionEntry {
                price,
                text: raw,
                currency: self.pair.from.clone(),
            },
        );
        if let Some(entry) = self.registry.get(node).cloned() {
            self.update_displayed(doc, node, &entry);
        }
    }

    /// Rewrites an element's text with its converted value. Idempotent for
    /// an unchanged entry, rate and target currency.
    pub fn update_displayed(&self, doc: &mut dyn DocumentView, node: NodeId, entry: &ConversionEntry) {
        let rate = match self
            .rates
            .table()
            .and_then(|t| t.rate_between(&entry.currency, &self.pair.to))
        {
            Some(rate) => rate,
            None => return,
        };
        let display = format::format_currency(entry.price * rate, &self.pair.to);
        doc.set_text(node, &display);
    }

    /// Full pass over the registry: prunes entries whose element left the
    /// document, re-renders the rest.
    pub fn update_all(&mut self, doc: &mut dyn DocumentView) {
        for node in self.registry.nodes() {
            if !doc.contains(node) {
                self.registry.remove(node);
                continue;
            }
            if let Some(entry) = self.registry.get(node).cloned() {
                self.update_displayed(doc, node, &entry);
            }
        }
    }
}
