//! End-to-end tests for the lifecycle commands: `install`, `build` and
//! `test`.
//!
//! Scripts in the fixture echo their own name and arguments; the package
//! manager is replaced by `echo pnpm`.

#[allow(dead_code)]
mod common;
use common::prelude::*;

#[test]
fn test_build_all_services() {
    let fixture = TestFixture::sample();

    fixture
        .command()
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Building feed (echo)..."))
        .stdout(predicate::str::contains("pnpm --filter=@acme/feed build"))
        .stdout(predicate::str::contains("Skipping rabbitmq (no Building steps)"))
        .stdout(predicate::str::contains("Building worker (build.sh)..."))
        .stdout(predicate::str::contains("script build.sh"));
}

#[test]
fn test_build_service_forwards_extra_args() {
    let fixture = TestFixture::sample();

    fixture
        .command()
        .arg("build")
        .arg("worker")
        .arg("--")
        .arg("--prod")
        .arg("--minify")
        .assert()
        .success()
        .stdout(predicate::str::contains("script build.sh --prod --minify"))
        .stdout(predicate::str::contains("feed").not());
}

#[test]
fn test_build_all_services_forwards_extra_args() {
    let fixture = TestFixture::sample();

    fixture
        .command()
        .arg("build")
        .arg("--")
        .arg("--prod")
        .assert()
        .success()
        .stdout(predicate::str::contains("script build.sh --prod"))
        .stdout(predicate::str::contains(
            "pnpm --filter=@acme/feed build -- --prod",
        ))
        .stdout(predicate::str::contains("Skipping rabbitmq (no Building steps)"));
}

#[test]
fn test_script_takes_precedence_over_manifest() {
    let fixture = TestFixture::sample().with_file("services/feed/build.sh", files::ECHO_SCRIPT);

    fixture
        .command()
        .arg("build")
        .arg("feed")
        .assert()
        .success()
        .stdout(predicate::str::contains("script build.sh"))
        .stdout(predicate::str::contains("pnpm").not());
}

#[test]
fn test_install_package_manager_forwards_after_separator() {
    let fixture = TestFixture::sample();

    fixture
        .command()
        .arg("install")
        .arg("feed")
        .arg("--")
        .arg("--frozen-lockfile")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pnpm --filter=@acme/feed install -- --frozen-lockfile",
        ));
}

#[test]
fn test_manifest_without_name_uses_directory_name() {
    let fixture = TestFixture::sample().with_file("services/api/package.json", "{}");

    fixture
        .command()
        .arg("test")
        .arg("api")
        .assert()
        .success()
        .stdout(predicate::str::contains("pnpm --filter=api test"));
}

#[test]
fn test_explicit_service_without_steps_fails() {
    let fixture = TestFixture::sample();

    fixture
        .command()
        .arg("build")
        .arg("rabbitmq")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Service \"rabbitmq\" has no Building steps (no build.sh or package.json)",
        ));
}

#[test]
fn test_module_target_is_non_strict() {
    let fixture = TestFixture::sample();

    fixture
        .command()
        .arg("build")
        .arg("reader")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Building 2 service(s) for module \"reader\"",
        ))
        .stdout(predicate::str::contains("pnpm --filter=@acme/feed build"))
        .stdout(predicate::str::contains("Skipping rabbitmq (no Building steps)"))
        .stdout(predicate::str::contains("worker").not());
}

#[test]
fn test_module_wins_over_service_with_same_name() {
    let fixture = TestFixture::sample()
        .with_service("shared")
        .with_module("shared", &["feed"]);

    fixture
        .command()
        .arg("install")
        .arg("shared")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Installing 1 service(s) for module \"shared\"",
        ))
        .stdout(predicate::str::contains("pnpm --filter=@acme/feed install"));
}

#[test]
fn test_unknown_target_fails() {
    let fixture = TestFixture::sample();

    fixture
        .command()
        .arg("build")
        .arg("ghost")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Unknown service or module: \"ghost\"",
        ));
}

#[test]
fn test_skip_sentinel_only_applies_without_target() {
    let fixture = TestFixture::sample().with_file("services/worker/.dxskip", "");

    fixture
        .command()
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping worker (.dxskip)"))
        .stdout(predicate::str::contains("script build.sh").not());

    fixture
        .command()
        .arg("build")
        .arg("worker")
        .assert()
        .success()
        .stdout(predicate::str::contains("script build.sh"));
}

#[test]
fn test_failing_script_is_fatal() {
    let fixture = TestFixture::sample().with_file("services/worker/build.sh", "exit 3\n");

    fixture
        .command()
        .arg("build")
        .arg("worker")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command failed"));
}

#[test]
fn test_verbose_echoes_commands() {
    let fixture = TestFixture::sample();

    fixture
        .command()
        .arg("-v")
        .arg("install")
        .arg("worker")
        .assert()
        .success()
        .stdout(predicate::str::contains("$ sh install.sh"));
}
