//! Core of the template setup tool.
//!
//! [`domain`] holds the pure rules: name normalisation, URL guesses, the file
//! filter, literal substitutions and the setup plan. [`application`] runs a
//! setup against four ports (`Filesystem`, `VersionControl`, `SetupReporter`
//! and `Prompter`) that the caller implements; `primer-adapters` ships local,
//! git and in-memory versions.
//!
//! ```rust,ignore
//! use primer_core::prelude::*;
//!
//! let service = SetupService::new(filesystem, repository, reporter);
//! let summary = service.run_setup(
//!     &SetupPlan::default(),
//!     "https://github.com/good-org/amazing-project.git",
//!     "amazing_project",
//!     SetupOptions::default(),
//! )?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// The names most callers need.
pub mod prelude {
    pub use crate::application::{
        SetupEvent, SetupOptions, SetupService,
        ports::{Filesystem, Prompter, SetupReporter, VersionControl},
    };
    pub use crate::domain::{
        FileFilter, RetirePlan, SetupPlan, SubstitutionPair, Substitutions, TemplateIdentity,
        codecov_project_guess, get_package_name, make_name_safe, rtd_project_guess,
    };
    pub use crate::error::{PrimerError, PrimerResult};
}
