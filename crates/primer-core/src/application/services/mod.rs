//! Application services - orchestrate use cases.
//!
//! `setup_service` runs the one-shot rewrite of a fresh template copy;
//! `interactive` resolves its inputs by asking the user.

pub mod interactive;
pub mod setup_service;

pub use interactive::{
    confirm_retire, guess_repo_url, package_name_prompt, remote_repo_prompt,
    resolve_package_name, resolve_repo_url, RETIRE_PROMPT,
};
pub use setup_service::{
    replace_file_contents, SetupEvent, SetupOptions, SetupService, SetupSummary,
};
