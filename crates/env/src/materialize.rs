use getsecret_core::EnvironmentVariables;
use getsecret_secrets::Resolution;

/// Layer the environment pairs among `resolutions` over a copy of `inherited`.
///
/// File resolutions contribute nothing. Pairs are applied in order, so for a
/// repeated key the later resolution wins.
#[must_use]
pub fn materialize(
    inherited: &EnvironmentVariables,
    resolutions: &[Resolution],
) -> EnvironmentVariables {
    inherited.merged_with(resolutions.iter().filter_map(|resolution| match resolution {
        Resolution::Env { key, value } => Some((key.as_str(), value.as_str())),
        Resolution::File { .. } => None,
    }))
}
