use csdefense_core::error::ConfigError;
use csdefense_map::MapError;

/// The simulation could not be constructed from its configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Map(#[from] MapError),
}
