use aws_get_secret::{prepare_environment, run};
use getsecret_config::Options;
use getsecret_core::Error;
use getsecret_secrets::InMemorySecretSource;
use tempfile::TempDir;

mod common;
use common::{environment, tokens};

const ARN_ONE: &str = "arn:aws:secretsmanager:us-east-2:123456789012:secret:one";
const ARN_TWO: &str = "arn:aws:secretsmanager:us-east-2:123456789012:secret:two";
const ARN_THREE: &str = "arn:aws:secretsmanager:us-east-2:123456789012:secret:three";

#[tokio::test]
async fn test_prepare_replaces_references() {
    let source = InMemorySecretSource::new()
        .with_secret(ARN_ONE, "baz")
        .with_binary(ARN_TWO, b"value2".to_vec());
    let env = environment(&[
        ("FOOBAR", format!("aws:///{ARN_ONE}?default=foobar").as_str()),
        ("FOOBAR2", format!("aws:///{ARN_TWO}").as_str()),
        ("PLAIN", "untouched"),
    ]);

    let merged = prepare_environment(source, &env).await.unwrap();

    assert_eq!(merged.get("FOOBAR").unwrap(), "baz");
    assert_eq!(merged.get("FOOBAR2").unwrap(), "value2");
    assert_eq!(merged.get("PLAIN").unwrap(), "untouched");
    // The snapshot is left as it was
    assert_eq!(env.get("FOOBAR").unwrap(), &format!("aws:///{ARN_ONE}?default=foobar"));
}

#[tokio::test]
async fn test_prepare_fails_for_missing_secret() {
    let source = InMemorySecretSource::new().with_secret(ARN_ONE, "baz");
    let env = environment(&[
        ("FOOBAR", format!("aws:///{ARN_ONE}").as_str()),
        ("FOOBAR3", format!("aws:///{ARN_THREE}").as_str()),
    ]);

    let err = prepare_environment(source, &env).await.unwrap_err();

    assert!(matches!(err, Error::SecretNotFound { ref secret_id } if secret_id == ARN_THREE));
}

#[tokio::test]
async fn test_template_fails_before_any_fetch() {
    let source = InMemorySecretSource::new().with_secret(ARN_ONE, "baz");
    let observer = source.clone();
    let env = environment(&[
        ("FOOBAR", format!("aws:///{ARN_ONE}").as_str()),
        ("TEMPLATED", format!("aws:///{ARN_ONE}?template={{{{.}}}}").as_str()),
    ]);

    let err = prepare_environment(source, &env).await.unwrap_err();

    assert!(matches!(err, Error::Unsupported { .. }));
    assert_eq!(observer.fetch_count(), 0);
}

#[tokio::test]
async fn test_file_destination_is_not_exported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("secrets/out");
    let source = InMemorySecretSource::new().with_secret("my-secret", "s3cr3t");
    let reference = format!("aws:///my-secret?destination={}&chmod=0600", path.display());
    let env = environment(&[("CERT_FILE", reference.as_str())]);

    let merged = prepare_environment(source, &env).await.unwrap();

    assert_eq!(merged.get("CERT_FILE").unwrap(), &reference);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "s3cr3t");
}

#[tokio::test]
async fn test_role_is_assumed_before_fetching() {
    let source = InMemorySecretSource::new()
        .with_scoped_secret("s", "v", "temp")
        .with_role("arn:aws:iam::123456789012:role/reader", Some("temp".to_string()));
    let env = environment(&[("S", "aws:///s")]);

    let merged = prepare_environment(source, &env).await.unwrap();

    assert_eq!(merged.get("S").unwrap(), "v");
}

#[tokio::test]
async fn test_scoped_secret_needs_assumed_role() {
    let source = InMemorySecretSource::new().with_scoped_secret("s", "v", "temp");
    let env = environment(&[("S", "aws:///s")]);

    let err = prepare_environment(source, &env).await.unwrap_err();

    assert!(err.to_string().contains("AccessDeniedException"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_executes_delegate_with_secrets() {
    let source = InMemorySecretSource::new().with_secret("db", "hunter2");
    let env = environment(&[("DB_PASS", "aws:///db")]);
    let options =
        Options::from_args(&tokens(&["-v", "test", "\"$DB_PASS\"", "=", "hunter2"]), &env)
            .unwrap();

    let code = run(&options, source, &env).await.unwrap();

    assert_eq!(code, 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_mirrors_delegate_exit_code() {
    let env = environment(&[]);
    let options = Options::from_args(&tokens(&["exit", "7"]), &env).unwrap();

    let code = run(&options, InMemorySecretSource::new(), &env).await.unwrap();

    assert_eq!(code, 7);
}

#[cfg(unix)]
#[tokio::test]
async fn test_failed_resolution_skips_delegate() {
    let temp_dir = TempDir::new().unwrap();
    let marker = temp_dir.path().join("ran");
    let source = InMemorySecretSource::new()
        .with_secret("one", "1")
        .with_failure("two", "ThrottlingException")
        .with_secret("three", "3");
    let env = environment(&[
        ("ONE", "aws:///one"),
        ("TWO", "aws:///two"),
        ("THREE", "aws:///three"),
    ]);
    let marker_path = marker.display().to_string();
    let options = Options::from_args(&tokens(&["touch", &marker_path]), &env).unwrap();

    let err = run(&options, source, &env).await.unwrap_err();

    assert!(err.to_string().contains("ThrottlingException"));
    assert!(!marker.exists());
}
