//! Presentation of an analysis report.
//!
//! - [`view`] — pure display values (up-to-date count, score tier, list rows).
//! - [`ring`] — the animated health score gauge.
//! - [`terminal`] — colored, tabular output plus notifications.

pub mod ring;
pub mod terminal;
pub mod view;
