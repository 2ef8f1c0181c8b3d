//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `primer-adapters` (and the
//! terminal-facing ones in `primer-cli`) implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File reads and writes
//!   - `VersionControl`: Tracked-file listing, history-preserving moves, commits
//!   - `SetupReporter`: Progress sink for a setup run
//!   - `Prompter`: Questions to the user in interactive mode

pub mod output;

pub use output::{Filesystem, Prompter, SetupReporter, VersionControl};

#[cfg(test)]
pub use output::{MockFilesystem, MockPrompter, MockSetupReporter, MockVersionControl};
