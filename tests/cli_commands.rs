// tests/cli_commands.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pile_config::backend::{ConfigBackend, MockBackend};
use pile_config::cli::Command;
use pile_config::config::ConfigStore;
use pile_config::execute;
use pile_config_test_utils::builders::GitConfigBuilder;

fn run(command: Command, store: &mut ConfigStore) -> anyhow::Result<String> {
    run_with_other(command, store, MockBackend::new())
}

fn run_with_other(
    command: Command,
    store: &mut ConfigStore,
    other: MockBackend,
) -> anyhow::Result<String> {
    let mut out = Vec::new();
    execute(&command, store, &mut out, |_: &Path| {
        Arc::new(other) as Arc<dyn ConfigBackend>
    })?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn show_prints_every_documented_field() {
    let (mut store, _) = GitConfigBuilder::new()
        .canonical("pile", "internal", "pile")
        .set("pile.upstream", "origin")
        .load();

    let text = run(Command::Show { toml: false }, &mut store).unwrap();
    assert!(text.contains("dir = pile\n"));
    assert!(text.contains("result-branch = internal\n"));
    assert!(text.contains("genbranch-use-cache = true\n"));
    assert!(text.contains("genbranch-user-name = \n"));
    assert!(text.ends_with("upstream = origin\n"));
}

#[test]
fn show_toml_is_parseable() {
    let (mut store, _) = GitConfigBuilder::new()
        .canonical("pile", "internal", "pile")
        .set("pile.genbranch.user-name", "Pile Bot")
        .load();

    let text = run(Command::Show { toml: true }, &mut store).unwrap();
    let parsed: toml::Table = toml::from_str(&text).unwrap();
    assert_eq!(parsed["dir"].as_str(), Some("pile"));
    assert_eq!(parsed["genbranch_user_name"].as_str(), Some("Pile Bot"));
    assert_eq!(parsed["format_compose"].as_bool(), Some(false));
    assert!(!parsed.contains_key("genbranch_user_email"));
}

#[test]
fn get_accepts_git_style_names() {
    let (mut store, _) = GitConfigBuilder::new()
        .canonical("pile", "internal", "pile")
        .load();

    for name in ["result-branch", "result_branch", "pile.result-branch"] {
        let text = run(Command::Get { name: name.to_string() }, &mut store).unwrap();
        assert_eq!(text, "internal\n", "{name}");
    }

    assert!(run(Command::Get { name: "nope".to_string() }, &mut store).is_err());
}

#[test]
fn check_fails_on_incomplete_config() {
    let (mut store, _) = GitConfigBuilder::new().set("pile.dir", "pile").load();
    assert!(run(Command::Check, &mut store).is_err());

    let (mut store, _) = GitConfigBuilder::new()
        .canonical("pile", "internal", "pile")
        .load();
    assert_eq!(run(Command::Check, &mut store).unwrap(), "ok\n");
}

#[test]
fn fields_filters_by_prefix() {
    let (mut store, _) = GitConfigBuilder::new().load();

    let text = run(Command::Fields { prefix: Some("genbranch-user".to_string()) }, &mut store)
        .unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("genbranch-user-name (string)"));
    assert!(text.contains("genbranch-user-email (string)"));

    let text = run(Command::Fields { prefix: Some("zzz".to_string()) }, &mut store).unwrap();
    assert!(text.is_empty());
}

#[test]
fn destroy_errors_when_section_missing() {
    let (mut store, backend) = GitConfigBuilder::new()
        .canonical("pile", "internal", "pile")
        .load();

    run(Command::Destroy, &mut store).unwrap();
    assert!(backend.entries().is_empty());
    assert!(run(Command::Destroy, &mut store).is_err());
}

#[test]
fn adopt_copies_from_other_checkout() {
    let (mut store, backend) = GitConfigBuilder::new().load();
    let other = GitConfigBuilder::new()
        .canonical("../patches", "internal", "pile")
        .build();

    run_with_other(
        Command::Adopt { path: PathBuf::from("../other") },
        &mut store,
        other,
    )
    .unwrap();

    assert!(store.is_valid());
    assert_eq!(store.config().dir, "../patches");
    assert_eq!(backend.writes().len(), 3);
}
