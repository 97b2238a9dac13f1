/// Constants used throughout the aws-get-secret codebase
// Reference prefix
pub const SECRET_REFERENCE_PREFIX: &str = "aws:///";

// Option environment variables
pub const REGION_VAR: &str = "AWS_GET_SECRET_REGION";
pub const ROLE_VAR: &str = "AWS_GET_SECRET_ROLE";
pub const SESSION_NAME_VAR: &str = "AWS_GET_SECRET_SESSION_NAME";
pub const TIMEOUT_VAR: &str = "AWS_GET_SECRET_TIMEOUT";
pub const VERBOSE_VAR: &str = "AWS_GET_SECRET_VERBOSE";

// Option defaults
pub const DEFAULT_REGION: &str = "us-east-2";
pub const DEFAULT_SESSION_NAME: &str = "param_session";
pub const DEFAULT_TIMEOUT_MS: f64 = 5000.0;

// Delegate command that skips execution
pub const NOOP_COMMAND: &str = "noop";

// Shell used to run the delegate command line
pub const DELEGATE_SHELL: &str = "sh";

// At most one automatic retry per backend call
pub const MAX_BACKEND_ATTEMPTS: u32 = 2;
