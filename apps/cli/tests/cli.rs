use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const US_IMAGE: &str = "205134639408.dkr.ecr.us-west-2.amazonaws.com/release/devops/devops-teamcity/hla-typer";
const CN_IMAGE: &str = "436227880023.dkr.ecr.cn-northwest-1.amazonaws.com.cn/release/devops/devops-teamcity/hla-typer";

fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".yo-rc.json"), r#"{ "generator-bix-tool": { "project": "hla-typer" } }"#).unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "name": "hla-typer", "version": "1.4.2" }"#).unwrap();
    dir
}

fn bix(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bix"));
    cmd.env_clear().env("HOME", dir).arg("-C").arg(dir);
    cmd
}

#[test]
fn help_lists_the_tasks() {
    Command::new(env!("CARGO_BIN_EXE_bix"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("publish-release"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn dry_run_build_redacts_the_artifactory_key() {
    let dir = project();
    bix(dir.path())
        .env("ARTIFACTORY_USERNAME", "ci")
        .env("ARTIFACTORY_APIKEY", "art-key")
        .args(["--dry-run", "build"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "$ docker build --no-cache=true -f docker/Dockerfile --build-arg USER=ci --build-arg *** -t hla-typer .",
        ))
        .stdout(predicate::str::contains("art-key").not());
}

#[test]
fn dry_run_release_walks_every_step_in_order() {
    let dir = project();
    let output = bix(dir.path())
        .env("GIT_USER", "ci-bot")
        .env("GIT_TOKEN", "tok")
        .args(["--dry-run", "publish-release"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let at = |needle: &str| stdout.find(needle).unwrap_or_else(|| panic!("`{needle}` missing from:\n{stdout}"));

    let check = at("? aws ecr describe-repositories --registry-id=436227880023");
    let us_push = at(&format!("$ docker push {US_IMAGE}:1.4.2"));
    let cn_push = at(&format!("$ docker push {CN_IMAGE}:1.4.2"));
    let latest = at(&format!("$ docker push {CN_IMAGE}:latest"));
    let tag = at("$ git tag 1.4.2");
    let push = at("$ git push *** 1.4.2");

    assert!(check < us_push && us_push < cn_push && cn_push < latest && latest < tag && tag < push);
    assert!(!stdout.contains("tok@"));
}

#[test]
fn dry_run_test_does_not_touch_the_results_directory() {
    let dir = project();
    bix(dir.path())
        .args(["--dry-run", "test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--entrypoint py.test hla-typer --verbose"));

    assert!(!dir.path().join("tests/results").exists());
}

#[cfg(unix)]
#[test]
fn non_utf8_environment_is_tolerated() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = project();
    bix(dir.path())
        .env("LEGACY_LATIN1", OsStr::from_bytes(b"caf\xe9"))
        .env("ARTIFACTORY_USERNAME", "ci")
        .env("ARTIFACTORY_APIKEY", "art-key")
        .args(["--dry-run", "build"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$ docker build"));
}

#[test]
fn invalid_log_filter_is_reported() {
    let dir = project();
    bix(dir.path())
        .args(["--log-filter", "bix=loud", "config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid env filter"));
}

#[test]
fn missing_project_files_fail_with_the_file_name() {
    let dir = tempfile::tempdir().unwrap();
    bix(dir.path())
        .args(["--dry-run", "docs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".yo-rc.json"));
}

#[test]
fn missing_credentials_are_named() {
    let dir = project();
    bix(dir.path())
        .args(["--dry-run", "build"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ARTIFACTORY_USERNAME"));
}

#[test]
fn config_merges_file_and_environment() {
    let dir = project();
    fs::write(dir.path().join("bix.toml"), "[registries.us]\nregion = \"us-east-1\"\n").unwrap();

    bix(dir.path())
        .env("BIX__GIT__EMAIL_DOMAIN", "example.org")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""region": "us-east-1""#))
        .stdout(predicate::str::contains(r#""region": "cn-northwest-1""#))
        .stdout(predicate::str::contains(r#""email_domain": "example.org""#));
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = project();
    bix(dir.path())
        .args(["--config", "/nonexistent/bix.toml", "config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration is malformed"));
}
