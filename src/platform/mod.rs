//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, files natively, memory in tests)
//! - Wall-clock time
//! - Deferred callbacks (feedback windows)

pub mod clock;
pub mod storage;
pub mod timers;

pub use clock::{Clock, FixedClock, SystemClock};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use timers::{TimerId, TimerQueue};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
