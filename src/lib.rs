//! SmartPark Library
//!
//! Core functionality for the SmartPark parking lot dashboard: the persisted
//! 100-spot lot, its presentation model, the About page animator and the
//! terminal UI built on top of them.

pub mod animator;
pub mod app;
pub mod cli;
pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod lot;
pub mod presenter;
pub mod storage;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use animator::{AboutPage, AboutSection, RevealObserver, SmoothScroll};
pub use app::{App, AppMode, AppState};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::DemoConfig;
pub use error::{Result, SmartParkError};
pub use lot::{LOT_CAPACITY, LotOptions, LotStore, OperationResult, Spot};
pub use presenter::{DashboardView, RefreshTimer, StatusKind, StatusLine, format_elapsed};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore};
