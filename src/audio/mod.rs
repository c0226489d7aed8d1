//! Audio input

pub mod loader;

pub use loader::{check_format, load_window, open_wav, read_window, window_len};
