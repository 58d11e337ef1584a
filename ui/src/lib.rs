//! Shared UI crate for Worklet Dash. Aggregation, theming, charts and the
//! dashboard view live here; `web` and `desktop` only launch it.

pub mod components;
pub mod core;
pub mod export;
pub mod i18n;
pub mod theme;
pub mod views;
