//! The setup use case and the input helpers around it, written against
//! ports so no I/O happens here directly.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    SetupEvent, SetupOptions, SetupService, SetupSummary, confirm_retire, guess_repo_url,
    replace_file_contents, resolve_package_name, resolve_repo_url,
};

pub use ports::{Filesystem, Prompter, SetupReporter, VersionControl};

pub use error::ApplicationError;
