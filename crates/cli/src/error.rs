use atelier_camera::CameraError;
use atelier_catalog::CatalogError;
use atelier_core::error::CoreError;
use atelier_fashn::TryOnError;

/// Everything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("{}", .0.user_message())]
    Camera(#[from] CameraError),

    /// The camera was live but no snapshot could be taken.
    #[error("Could not capture a photo")]
    NoPhoto,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    TryOn(#[from] TryOnError),
}
