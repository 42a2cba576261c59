#![forbid(unsafe_code)]

//! Calendar day-card generation.
//!
//! The pipeline resizes a randomly picked background photograph to a fixed
//! canvas, lays out calendar text with real font metrics according to
//! declarative placement directives, burns the text in, and encodes the
//! result. See [`card::CardAssembler`] for the orchestration entry point.

pub mod background;
pub mod card;
pub mod compose;
pub mod error;
pub mod fetch;
pub mod font;
pub mod layout;
pub mod mime;
pub mod model;
pub mod normalize;

pub use card::{CalendarInfo, CardAssembler, EncodedCard, quote_or_fallback};
pub use error::{CardError, CardResult};
pub use fetch::{ByteFetcher, HttpFetcher};
pub use font::{FontCache, FontHandle};
pub use layout::{PositionedRun, TextMeasure, split_overflow};
pub use model::{CardConfig, HAnchor, PlacementDirective, Rgb, VAnchor};
