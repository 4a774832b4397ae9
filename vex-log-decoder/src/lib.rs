//! VEX Log Decoder Library
//!
//! A stateless, reusable library for decoding the fixed-layout event records
//! written by a robot controller's SD card logger into readable lines.
//!
//! # Record layout
//!
//! ```text
//! 0001010101010 P 12 EX1
//! |-- 13 bits --|dev|port|action
//! ```
//!
//! - 13 binary digits: elapsed time in hundredths of a second
//! - 1 character: device letter (Device Registry)
//! - 0+ ASCII digits: port, display only
//! - remainder: action code (Action Registry)
//!
//! Lines shorter than 15 characters are passed through unchanged.
//!
//! The library does NOT:
//! - Choose, list or delete log files
//! - Render output or persist settings
//! - Log anything (it returns data or errors only)
//!
//! All of that lives in the application layer (vex-log-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use vex_log_decoder::Decoder;
//! use std::path::Path;
//!
//! let decoder = Decoder::new();
//!
//! let line = decoder.decode_line("0000000000000P12EX1").unwrap();
//! assert_eq!(line, "(0000000000000P12EX1) 0.00s Pneumatic 12 Cylinder 1 Extend");
//!
//! for decoded in decoder.decode_file(Path::new("V:/run1.txt")).unwrap() {
//!     println!("{}", decoded);
//! }
//! ```

// Public modules
pub mod decoder;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use decoder::Decoder;
pub use registry::{Registry, RegistryStats, ACTIONS, DEVICES, DEVICE_NAME_UNKNOWN};
pub use types::{DecodedEvent, DecodedLine, DecoderError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: the registries are populated on creation
        let decoder = Decoder::new();
        let stats = decoder.registry_stats();
        assert_eq!(stats.num_devices, 13);
        assert_eq!(stats.num_actions, 19);
    }

    #[test]
    fn test_decoder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Decoder>();
    }
}
