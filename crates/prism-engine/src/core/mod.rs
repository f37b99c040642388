//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform loop)
//! and the embedding application.

mod app;

pub use app::{App, AppControl};
