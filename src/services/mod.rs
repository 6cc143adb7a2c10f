//! Business logic services.

pub mod library;
pub mod registry;
pub mod resolver;
pub mod telegram;

pub use library::{LibraryStore, sanitize_filename};
pub use registry::FileRegistry;
pub use resolver::{ViewTarget, resolve_view};
pub use telegram::TelegramStreamer;
