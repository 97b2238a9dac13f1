//! STS AssumeRole input constraints, checked before any network call.

use getsecret_core::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SESSION_NAME_REGEX: Regex = Regex::new(r"^[\w+=,.@-]+$").unwrap();
}

const SESSION_NAME_LEN: std::ops::RangeInclusive<usize> = 2..=64;
const ROLE_ARN_LEN: std::ops::RangeInclusive<usize> = 20..=2048;

pub fn validate_session_name(session_name: &str) -> Result<()> {
    if !SESSION_NAME_LEN.contains(&session_name.len()) {
        return Err(Error::configuration(format!(
            "session name '{session_name}' must be between 2 and 64 characters"
        )));
    }
    if !SESSION_NAME_REGEX.is_match(session_name) {
        return Err(Error::configuration(format!(
            r"session name '{session_name}' must match [\w+=,.@-]*"
        )));
    }
    Ok(())
}

pub fn validate_role_arn(role_arn: &str) -> Result<()> {
    if !ROLE_ARN_LEN.contains(&role_arn.len()) {
        return Err(Error::configuration(format!(
            "role ARN '{role_arn}' must be between 20 and 2048 characters"
        )));
    }
    // Tab, line feed and carriage return are the only control characters allowed
    if role_arn
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        return Err(Error::configuration(format!(
            "role ARN '{}' contains control characters",
            role_arn.escape_debug()
        )));
    }
    Ok(())
}
