use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Host-side failures. Each is logged where it happens and never surfaces to the user.
pub enum GalleryError {
    /// Anonymous sign-in was rejected.
    #[error("anonymous sign-in failed: {0}")]
    Auth(String),
    /// Reading or writing the favorites document was rejected.
    #[error("favorites sync failed: {0}")]
    Sync(String),
    /// Fetching or saving a high-resolution asset failed.
    #[error("asset download failed: {0}")]
    Fetch(String),
}
