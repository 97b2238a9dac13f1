use getsecret_core::EnvironmentVariables;

/// Environment with `PATH` from the test process plus `vars`
pub fn environment(vars: &[(&str, &str)]) -> EnvironmentVariables {
    let mut env: EnvironmentVariables = EnvironmentVariables::from_process()
        .iter()
        .filter(|(key, _)| key.as_str() == "PATH")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    for (key, value) in vars {
        env.insert(*key, *value);
    }
    env
}

pub fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|t| (*t).to_string()).collect()
}
