//! In-Page Price Converter
//!
//! An embeddable engine that detects price-like text in a document tree,
//! lets a user pick an element via pointer hover/click, and rewrites its
//! displayed text as a converted currency amount using cached exchange
//! rates. The host supplies the document, storage, network and clock behind
//! narrow capability traits; the engine supplies the detection heuristic,
//! the rate cache, the selection state machine and the debounced
//! reconversion loop.

pub mod bridge;
pub mod detector;
pub mod dom;
pub mod engine;
pub mod format;
pub mod models;
pub mod rates;
pub mod scheduler;
pub mod selection;
pub mod store;
pub mod watcher;

pub use detector::extract_price;
pub use dom::{DocumentView, MemoryDocument, MutationRecord, NodeId, Rect};
pub use engine::{Config, Engine};
pub use models::{
    ConversionEntry, ConversionRegistry, CurrencyPair, Message, MessageResponse, PairSide,
    RateTable,
};
pub use rates::{RateCache, RateError, RateSource, StaticRateSource};
pub use store::{FileStore, KeyValueStore, MemoryStore};

#[cfg(feature = "http")]
pub use rates::HttpRateSource;
