//! Article extraction strategies.
//!
//! Every source resolves to one of two extraction modes:
//!
//! | Mode | Module | Input | Notes |
//! |------|--------|-------|-------|
//! | Feed | [`feed`] | RSS/Atom document | Preferred whenever a feed exists |
//! | Heuristic | [`heuristic`] | Raw HTML | Selector-free pattern guessing; manual overrides supported |
//!
//! [`discovery`] bridges the two: sources without a configured feed URL get
//! one discovery attempt (markup hints, then conventional paths) before
//! falling back to heuristic extraction.
//!
//! All three modules are pure transformations over already-fetched bytes
//! (discovery drives its own probes through the [`crate::fetch::Fetch`]
//! trait); the per-source orchestration and failure isolation live in
//! [`crate::aggregator`].

pub mod discovery;
pub mod feed;
pub mod heuristic;
