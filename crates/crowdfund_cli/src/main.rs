//! CLI smoke entry point.
//!
//! # Responsibility
//! - Seed projects (built-in demo set or a JSON seed file).
//! - Run the canonical rule scenarios and print one line per outcome.
//!
//! Usage: `crowdfund_cli [--seed <projects.json>] [--log-dir <abs dir>]`

use clap::Parser;
use crowdfund_core::{
    default_log_level, init_logging, InMemoryProjectRepository, Project, ProjectRuleEngine,
    RuleResult,
};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug, Default)]
#[command(name = "crowdfund_cli", version, about = "Runs the crowdfund rule scenarios")]
struct CliArgs {
    /// JSON array of `{ "id", "owner", "title" }` project records.
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,
}

fn load_projects(seed_path: Option<&Path>) -> Result<Vec<Project>, String> {
    let Some(path) = seed_path else {
        return demo_projects();
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read seed file `{}`: {err}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|err| format!("invalid seed file `{}`: {err}", path.display()))
}

fn demo_projects() -> Result<Vec<Project>, String> {
    [(1, "user1", "Project One"), (2, "user2", "Project Two")]
        .into_iter()
        .map(|(id, owner, title)| Project::new(id, owner, title).map_err(|err| err.to_string()))
        .collect()
}

fn report<T: Debug>(label: &str, result: RuleResult<T>) {
    match result {
        Ok(value) => println!("{label}: ok {value:?}"),
        Err(err) => println!("{label}: err u{} ({err})", err.code()),
    }
}

fn run(args: CliArgs) -> Result<(), String> {
    if let Some(log_dir) = args.log_dir.as_deref() {
        init_logging(default_log_level().as_str(), log_dir)?;
    }

    let projects = load_projects(args.seed.as_deref())?;
    let repo = InMemoryProjectRepository::with_projects(projects).map_err(|err| err.to_string())?;
    let mut engine = ProjectRuleEngine::new(repo);
    println!(
        "crowdfund_core version={} projects={}",
        crowdfund_core::core_version(),
        engine.project_count()
    );

    let tags = vec!["tag1".to_string(), "tag2".to_string()];
    report(
        "set_project_tags(1, user1)",
        engine.set_project_tags(1, tags, "user1"),
    );
    report(
        "set_project_tags(3, user1)",
        engine.set_project_tags(3, vec!["tag1".to_string()], "user1"),
    );
    report(
        "set_project_tags(1, user2)",
        engine.set_project_tags(1, vec!["tag1".to_string()], "user2"),
    );
    report(
        "update_project_progress(1, 50, user1)",
        engine.update_project_progress(1, 50, "user1"),
    );
    report(
        "update_project_progress(1, 150, user1)",
        engine.update_project_progress(1, 150, "user1"),
    );
    println!("project 1 tags={:?}", engine.project_tags(1).unwrap_or_default());
    Ok(())
}

fn main() -> ExitCode {
    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("crowdfund_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{demo_projects, load_projects, run, CliArgs};
    use clap::Parser;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    #[test]
    fn parses_seed_and_log_dir() {
        let parsed =
            CliArgs::try_parse_from(["crowdfund_cli", "--seed", "p.json", "--log-dir", "/tmp/logs"])
                .unwrap();
        assert_eq!(parsed.seed, Some(PathBuf::from("p.json")));
        assert_eq!(parsed.log_dir.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn accepts_equals_form() {
        let parsed = CliArgs::try_parse_from(["crowdfund_cli", "--seed=p.json"]).unwrap();
        assert_eq!(parsed.seed, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn help_is_available() {
        let err = CliArgs::try_parse_from(["crowdfund_cli", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--seed"));
    }

    #[test]
    fn rejects_missing_flag_value_and_unknown_args() {
        assert!(CliArgs::try_parse_from(["crowdfund_cli", "--seed"]).is_err());
        assert!(CliArgs::try_parse_from(["crowdfund_cli", "--verbose"]).is_err());
    }

    #[test]
    fn demo_set_matches_owners() {
        let projects = demo_projects().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].owner, "user1");
        assert_eq!(projects[1].owner, "user2");
    }

    #[test]
    fn loads_projects_from_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 7, "owner": "alice", "title": "Solar Roof"}},
                {{"id": 9, "owner": "bob", "title": "Bike Lane"}}]"#
        )
        .unwrap();

        let projects = load_projects(Some(file.path())).unwrap();

        let summary: Vec<(u64, &str)> = projects
            .iter()
            .map(|project| (project.id, project.owner.as_str()))
            .collect();
        assert_eq!(summary, vec![(7, "alice"), (9, "bob")]);
    }

    #[test]
    fn invalid_seed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_projects(Some(file.path())).unwrap_err();
        assert!(err.contains("invalid seed file"));
    }

    #[test]
    fn missing_seed_file_is_reported() {
        let err = load_projects(Some(Path::new("/nonexistent/crowdfund-seed.json"))).unwrap_err();
        assert!(err.contains("failed to read seed file"));
    }

    #[test]
    fn run_with_demo_projects_succeeds() {
        assert_eq!(run(CliArgs::default()), Ok(()));
    }
}
