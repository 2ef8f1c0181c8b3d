//! `primer guess`: show the names a setup run would derive.

use serde::Serialize;

use primer_core::{
    application::{ApplicationError, guess_repo_url},
    domain::{DEFAULT_REMOTE, codecov_project_guess, get_package_name, rtd_project_guess},
};

use crate::{
    cli::GuessArgs,
    commands::open_repository,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Everything derived from one repository URL.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct Guesses {
    repo_url: String,
    package_name: String,
    rtd_project: String,
    codecov_project: String,
}

impl Guesses {
    fn from_url(repo_url: String) -> Self {
        Self {
            package_name: get_package_name(&repo_url),
            rtd_project: rtd_project_guess(&repo_url),
            codecov_project: codecov_project_guess(&repo_url),
            repo_url,
        }
    }
}

pub fn execute(args: GuessArgs, output: OutputManager) -> CliResult<()> {
    let repo_url = match args.url {
        Some(url) => url,
        None => {
            let repository = open_repository(args.path.as_deref())?;
            guess_repo_url(repository.as_ref())
                .url()
                .map(str::to_string)
                .ok_or_else(|| {
                    CliError::Core(
                        ApplicationError::RemoteUrlNotFound {
                            remote: DEFAULT_REMOTE.into(),
                        }
                        .into(),
                    )
                })?
        }
    };

    let guesses = Guesses::from_url(repo_url);

    if output.is_json() {
        output.json(&guesses)?;
    } else {
        output.print(&format!("Repository URL:  {}", guesses.repo_url))?;
        output.print(&format!("Package name:    {}", guesses.package_name))?;
        output.print(&format!("Docs project:    {}", guesses.rtd_project))?;
        output.print(&format!("Codecov project: {}", guesses.codecov_project))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_from_url() {
        let g = Guesses::from_url(
            "https://www.github.com/amazing-org/really-great-project.git".into(),
        );
        assert_eq!(g.package_name, "really_great_project");
        assert_eq!(g.rtd_project, "really-great-project");
        assert_eq!(g.codecov_project, "amazing-org/really-great-project");
    }
}
