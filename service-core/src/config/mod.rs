use crate::error::AppError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Locate a service's `config` directory.
///
/// Works both when the process runs from the workspace root and from inside
/// the service crate directory.
pub fn configuration_directory(service_dir: &str) -> Result<PathBuf, AppError> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with(service_dir) {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join(service_dir).join("config"))
    }
}

/// Load layered settings: `base.yaml`, then `APP_` prefixed environment
/// variables with `__` as the nesting separator (e.g. `APP_SERVER__PORT`).
pub fn load<T: DeserializeOwned>(configuration_directory: &Path) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<T>()?)
}
