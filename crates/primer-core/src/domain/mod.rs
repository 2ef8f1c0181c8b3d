//! Pure setup rules. Nothing here touches the filesystem or git; callers
//! pass strings and paths in and get strings and paths back.

pub mod error;
pub mod filter;
pub mod naming;
pub mod plan;
pub mod remote;
pub mod substitution;

pub use error::DomainError;
pub use filter::{FileFilter, OS_METADATA_FILE, VCS_DIR};
pub use naming::{codecov_project_guess, get_package_name, make_name_safe, rtd_project_guess};
pub use plan::{
    CONFIG_FILE_NAME, RetirePlan, SETUP_GUIDE, SetupPlan, TEMPLATE_CODECOV, TEMPLATE_PACKAGE_NAME,
    TEMPLATE_REPO_URL, TEMPLATE_RTD, TemplateIdentity,
};
pub use remote::{
    DEFAULT_REMOTE, MSG_GIT_URL_NOT_FOUND, RepoUrlGuess, origin_url_from_config,
    remote_url_from_config,
};
pub use substitution::{SubstitutionPair, Substitutions};
