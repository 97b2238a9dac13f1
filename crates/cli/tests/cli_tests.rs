use assert_cmd::Command;
use predicates::prelude::*;

fn wrapper() -> Command {
    let mut cmd = Command::cargo_bin("aws-get-secret").unwrap();
    cmd.env_clear()
        .env("PATH", std::env::var("PATH").unwrap_or_default())
        .env("AWS_EC2_METADATA_DISABLED", "true");
    cmd
}

#[test]
fn test_unknown_option_exits_non_zero() {
    wrapper()
        .args(["--bogus", "echo", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown option --bogus"));
}

#[test]
fn test_missing_command_exits_non_zero() {
    wrapper()
        .arg("-v")
        .assert()
        .failure()
        .stderr(predicate::str::contains("you must supply a command"));
}

#[cfg(unix)]
#[test]
fn test_template_reference_exits_non_zero() {
    wrapper()
        .env("SECRET", "aws:///my-secret?template=anything")
        .args(["echo", "should-not-run"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("should-not-run").not())
        .stderr(predicate::str::contains("template"));
}

#[cfg(unix)]
#[test]
fn test_without_references_runs_delegate() {
    wrapper()
        .env("GREETING", "hello")
        .args(["-r", "eu-west-1", "echo", "$GREETING", "world"])
        .assert()
        .success()
        .stdout("hello world\n");
}

#[cfg(unix)]
#[test]
fn test_delegate_exit_code_is_propagated() {
    wrapper().args(["exit", "4"]).assert().code(4);
}

#[test]
fn test_noop_delegate_succeeds() {
    wrapper().arg("noop").assert().success();
}

#[test]
fn test_verbose_logs_options_and_references_without_values() {
    // Credentials are present but the endpoint is closed, so the fetch fails fast
    wrapper()
        .env("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMIEXAMPLEKEY")
        .env("AWS_ENDPOINT_URL", "http://127.0.0.1:9")
        .env("API_TOKEN", "aws:///api-token?default=s3cr3t-default")
        .args(["-v", "-t", "2000", "noop"])
        .assert()
        .stderr(predicate::str::contains(r#""region":"us-east-2""#))
        .stderr(predicate::str::contains(r#""command":"noop""#))
        .stderr(predicate::str::contains("discovered secret references"))
        .stderr(predicate::str::contains("API_TOKEN=api-token"))
        .stderr(predicate::str::contains("s3cr3t-default").not());
}

#[test]
fn test_quiet_by_default() {
    wrapper()
        .arg("noop")
        .assert()
        .success()
        .stderr(predicate::str::contains("discovered secret references").not());
}

#[cfg(unix)]
#[test]
fn test_non_utf8_variables_are_passed_through() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    wrapper()
        .env("LEGACY", OsStr::from_bytes(b"caf\xe9"))
        .args(["printf", "%s", "\"${LEGACY-UNSET}\""])
        .assert()
        .success()
        .stdout(&b"caf\xe9"[..]);
}
