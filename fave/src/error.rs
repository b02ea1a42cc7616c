use fave_data::DataError;

/// Errors returned by [`FavoriteService`](crate::FavoriteService).
#[derive(Debug)]
pub enum FavoriteError {
    /// The entity's resource kind has no favorite join table.
    ///
    /// This is a wiring mistake in the caller, not a transient failure.
    UnsupportedResourceKind(String),
    /// Failure reported by the session, passed through unchanged.
    Data(DataError),
}

impl std::fmt::Display for FavoriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FavoriteError::UnsupportedResourceKind(kind) => {
                write!(f, "Resource kind '{kind}' cannot be favorited")
            }
            FavoriteError::Data(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FavoriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FavoriteError::Data(err) => Some(err),
            FavoriteError::UnsupportedResourceKind(_) => None,
        }
    }
}

impl From<DataError> for FavoriteError {
    fn from(err: DataError) -> Self {
        FavoriteError::Data(err)
    }
}
