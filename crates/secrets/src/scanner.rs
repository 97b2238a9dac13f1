use crate::reference::SecretReference;
use getsecret_core::{EnvironmentVariables, Result, SECRET_REFERENCE_PREFIX};

/// Find every secret reference in `env`, in snapshot order.
///
/// Fails on the first variable that carries the reference prefix but does not
/// parse, so a bad reference stops the run before anything is fetched.
pub fn find_all(env: &EnvironmentVariables) -> Result<Vec<SecretReference>> {
    env.iter()
        .filter(|(_, value)| value.starts_with(SECRET_REFERENCE_PREFIX))
        .map(|(variable, value)| SecretReference::parse(variable, value, env))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_references_in_order() {
        let env: EnvironmentVariables = [
            ("PATH", "/usr/bin"),
            ("API_KEY", "aws:///api-key"),
            ("NOT_A_REF", "aws://host/api-key"),
            ("DB_PASS", "aws:///db?default=local"),
        ]
        .into_iter()
        .collect();

        let references = find_all(&env).unwrap();
        let found: Vec<_> = references
            .iter()
            .map(|r| (r.variable.as_str(), r.secret_id.as_str()))
            .collect();
        assert_eq!(found, vec![("API_KEY", "api-key"), ("DB_PASS", "db")]);
    }

    #[test]
    fn test_no_references() {
        let env: EnvironmentVariables = [("HOME", "/root")].into_iter().collect();
        assert!(find_all(&env).unwrap().is_empty());
    }

    #[test]
    fn test_template_fails_the_scan() {
        let env: EnvironmentVariables = [("OK", "aws:///ok"), ("BAD", "aws:///bad?template=x")]
            .into_iter()
            .collect();
        assert!(find_all(&env).is_err());
    }
}
