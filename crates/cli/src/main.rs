use aws_get_secret::{driver, logging};
use getsecret_config::Options;
use getsecret_core::EnvironmentVariables;
use getsecret_secrets::AwsSecretSource;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Captured once; nothing below reads the process environment again
    let environment = EnvironmentVariables::from_process();
    let tokens: Vec<String> = std::env::args().skip(1).collect();

    let options = Options::from_args(&tokens, &environment)?;
    logging::init(options.verbose)?;

    let source = AwsSecretSource::new(
        options.region.clone(),
        options.role_arn.clone(),
        Some(options.session_name.clone()),
        options.timeout,
    )
    .await;

    let exit_code = driver::run(&options, source, &environment).await?;
    std::process::exit(exit_code);
}
