use figment::{Figment, providers::Env};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

pub trait ContextProvider<Config> {
    fn new(config: Config) -> impl Future<Output = Self>;
}

/// Install the global tracing subscriber.
///
/// Log level defaults to `info` and can be overridden by the `RUST_LOG`
/// env var. Output goes to stderr, stdout belongs to the countdown display.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        // remove the name of the module from every log entry
        .with_target(false)
        .init();
}

/// Extract the configuration from environment variables starting with
/// `env_prefix`. The prefix is stripped and the remaining key lowercased,
/// so `QUIZ_TIMER_DEADLINE` fills the `deadline` field.
///
/// # Errors
/// If a required field is missing or a value has the wrong type.
pub fn load_config<Config: DeserializeOwned>(
    env_prefix: &str,
) -> Result<Config, figment::Error> {
    Figment::new().merge(Env::prefixed(env_prefix)).extract()
}

/// Initialize the application context with configuration from environment
/// variables. The configuration is extracted using figment.
///
/// # Arguments
/// * `env_prefix` - prefix shared by every configuration variable
///
/// # Returns
/// The application context built from the configuration as specified by
/// the trait.
///
/// # Errors
/// If the configuration cannot be extracted from the environment variables.
///
pub async fn create_app_context<A, Config: DeserializeOwned>(
    env_prefix: &str,
) -> Result<A, figment::Error>
where
    A: ContextProvider<Config>,
{
    init_tracing();

    let config: Config = load_config(env_prefix)?;
    tracing::debug!("Loaded configuration from `{}*` variables", env_prefix);

    let context = A::new(config).await;

    Ok(context)
}
