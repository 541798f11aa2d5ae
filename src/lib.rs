pub mod config;
pub mod editor;
pub mod input;
pub mod terminal;

pub use config::{load_config, Settings};
pub use editor::{Buffer, BufferError, Cursor, Editor, Intent, Snapshot};
pub use terminal::Terminal;
