use quietpix_image::ImageError;

/// An error type for the denoise module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DenoiseError {
    /// The requested method is not one of the supported transforms.
    #[error("Unknown method '{0}'")]
    UnknownMethod(String),

    /// The strength cannot be mapped to transform parameters.
    #[error("Invalid strength '{0}', expected a finite number")]
    InvalidStrength(String),

    /// The transform itself failed.
    #[error("Denoising failed. {0}")]
    Transform(#[from] ImageError),
}

impl DenoiseError {
    /// Whether the error was caused by the request rather than by the transform.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DenoiseError::UnknownMethod(_) | DenoiseError::InvalidStrength(_)
        )
    }
}
