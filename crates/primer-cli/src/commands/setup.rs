//! Implementation of the `primer setup` command.
//!
//! Responsibility: resolve the URL and package name
//! from flags, the origin remote or prompts, then hand over to
//! `SetupService`. No rewriting logic lives here.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use primer_adapters::LocalFilesystem;
use primer_core::{
    application::{
        ApplicationError, SetupOptions, SetupService, SetupSummary, confirm_retire,
        guess_repo_url, ports::{Prompter, VersionControl}, resolve_package_name,
        resolve_repo_url,
    },
    domain::{DEFAULT_REMOTE, RepoUrlGuess, get_package_name},
};

use crate::{
    cli::SetupArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, Tone},
    prompt::{OutputReporter, terminal_prompter},
};

/// JSON shape of a finished run.
#[derive(Debug, Serialize)]
struct SetupReport<'a> {
    repo_url: &'a str,
    package_name: &'a str,
    manifest_updated: bool,
    readme_updated: bool,
    updated_files: &'a [PathBuf],
    renamed: bool,
    retired: &'a [PathBuf],
}

/// Execute the `primer setup` command.
///
/// `repository` is already open so that `config` could be read from its root.
#[instrument(skip_all, fields(interactive = args.interactive))]
pub fn execute(
    args: SetupArgs,
    repository: Box<dyn VersionControl>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = repository.root();
    let filesystem = LocalFilesystem::new();

    let prompter = if args.interactive {
        Some(terminal_prompter()?)
    } else {
        None
    };
    let prompter = prompter.as_deref();

    let guess = guess_repo_url(repository.as_ref());
    let repo_url = choose_repo_url(args.repo_url, &guess, prompter)?;
    let package_name = choose_package_name(args.package_name, &repo_url, prompter)?;
    validate_package_name(&package_name)?;

    let retire = match (args.keep_setup_files, prompter) {
        (true, _) => false,
        (false, Some(p)) => confirm_retire(p)?,
        (false, None) => true,
    };
    let options = SetupOptions {
        commit_as_you_go: args.commit_as_you_go,
        retire,
    };

    output.say(
        Tone::Heading,
        &format!("Setting up '{package_name}' in {}", root.display()),
    )?;
    info!(repo_url = %repo_url, package = %package_name, ?options, "Setup started");

    let service = SetupService::new(
        Box::new(filesystem),
        repository,
        Box::new(OutputReporter::new(output.clone())),
    );
    let summary = service.run_setup(&config.plan, &repo_url, &package_name, options)?;

    if output.is_json() {
        output.json(&report(&repo_url, &package_name, &summary))?;
    } else if !summary.readme_updated {
        output.say(
            Tone::Skipped,
            "README was not changed; check its badges by hand",
        )?;
    }

    Ok(())
}

fn choose_repo_url(
    flag: Option<String>,
    guess: &RepoUrlGuess,
    prompter: Option<&dyn Prompter>,
) -> CliResult<String> {
    let chosen = match (flag, prompter) {
        (Some(url), _) => Some(url),
        (None, Some(p)) => resolve_repo_url(guess, p)?,
        (None, None) => guess.url().map(str::to_string),
    };
    chosen.ok_or_else(|| {
        CliError::Core(
            ApplicationError::RemoteUrlNotFound {
                remote: DEFAULT_REMOTE.into(),
            }
            .into(),
        )
    })
}

fn choose_package_name(
    flag: Option<String>,
    repo_url: &str,
    prompter: Option<&dyn Prompter>,
) -> CliResult<String> {
    Ok(match (flag, prompter) {
        (Some(name), _) => name,
        (None, Some(p)) => resolve_package_name(repo_url, p)?,
        (None, None) => get_package_name(repo_url),
    })
}

/// The name becomes a directory next to the manifest, so it must be a single
/// non-empty path component.
fn validate_package_name(name: &str) -> CliResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(CliError::bad_argument(
            "package name",
            format!("'{name}' is not a usable directory name"),
        ));
    }
    if trimmed.contains(['/', '\\']) {
        return Err(CliError::bad_argument(
            "package name",
            format!("'{name}' must not contain path separators"),
        ));
    }
    Ok(())
}

fn report<'a>(repo_url: &'a str, package_name: &'a str, summary: &'a SetupSummary) -> SetupReport<'a> {
    SetupReport {
        repo_url,
        package_name,
        manifest_updated: summary.manifest_updated,
        readme_updated: summary.readme_updated,
        updated_files: &summary.updated_files,
        renamed: summary.renamed,
        retired: &summary.retired,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use primer_core::error::PrimerResult;

    const URL: &str = "https://github.com/good-org/amazing-project.git";

    /// Replays canned replies in order.
    struct Scripted(std::sync::Mutex<Vec<&'static str>>);

    impl Scripted {
        fn new(replies: &[&'static str]) -> Self {
            let mut replies = replies.to_vec();
            replies.reverse();
            Self(std::sync::Mutex::new(replies))
        }
    }

    impl Prompter for Scripted {
        fn ask(&self, _prompt: &str) -> PrimerResult<String> {
            Ok(self.0.lock().unwrap().pop().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn flag_beats_guess() {
        let guess = RepoUrlGuess::Found("https://example.com/other.git".into());
        assert_eq!(choose_repo_url(Some(URL.into()), &guess, None).unwrap(), URL);
    }

    #[test]
    fn guess_used_without_prompter() {
        let guess = RepoUrlGuess::Found(URL.into());
        assert_eq!(choose_repo_url(None, &guess, None).unwrap(), URL);
    }

    #[test]
    fn no_url_anywhere_is_not_found() {
        let err = choose_repo_url(None, &RepoUrlGuess::NotFound, None).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn accepting_sentinel_is_not_found() {
        let prompter = Scripted::new(&[""]);
        let err = choose_repo_url(None, &RepoUrlGuess::NotFound, Some(&prompter)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn package_name_from_url_or_prompt() {
        assert_eq!(choose_package_name(None, URL, None).unwrap(), "amazing_project");

        let prompter = Scripted::new(&["better_name"]);
        assert_eq!(
            choose_package_name(None, URL, Some(&prompter)).unwrap(),
            "better_name"
        );
    }

    #[test]
    fn package_name_validation() {
        assert!(validate_package_name("amazing_project").is_ok());
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name("..").is_err());
        assert!(validate_package_name("a/b").is_err());
    }

    #[test]
    fn report_mirrors_summary() {
        let summary = SetupSummary {
            manifest_updated: true,
            updated_files: vec![PathBuf::from("README.md")],
            ..SetupSummary::default()
        };
        let json = serde_json::to_value(report(URL, "amazing_project", &summary)).unwrap();
        assert_eq!(json["manifest_updated"], true);
        assert_eq!(json["updated_files"][0], "README.md");
        assert_eq!(json["package_name"], "amazing_project");
    }
}
