use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

use quietpix_imgproc::denoise::{denoise, DenoiseMethod, Strength};
use quietpix_io::{functional::decode_image_rgb8, png::encode_image_png_rgb8};

use crate::error::ApiError;

/// Body of the liveness probe.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

/// Liveness probe.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

/// The form fields of a denoise request.
#[derive(Debug, Default)]
struct DenoiseForm {
    file: Option<Vec<u8>>,
    method: Option<String>,
    strength: Option<String>,
}

impl DenoiseForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = DenoiseForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("file") => form.file = Some(field.bytes().await?.to_vec()),
                Some("method") => form.method = Some(field.text().await?),
                Some("strength") => form.strength = Some(field.text().await?),
                name => log::debug!("ignoring form field {name:?}"),
            }
        }
        Ok(form)
    }
}

/// Denoise an uploaded image and answer with the result encoded as PNG.
///
/// Form fields:
///
/// * `file` - the image, in any format the decoder recognizes (required).
/// * `method` - one of `mean`, `median`, `wavelet`, `cdae` (default: `cdae`).
/// * `strength` - the denoising strength, nominally in `[0, 1]` (default: `0.5`).
pub async fn denoise_image(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let form = DenoiseForm::read(multipart?).await?;

    let method = match form.method {
        Some(name) => name.parse::<DenoiseMethod>()?,
        None => DenoiseMethod::default(),
    };
    let strength = match form.strength {
        Some(value) => value.parse::<Strength>()?,
        None => Strength::default(),
    };
    let file = form.file.ok_or(ApiError::MissingField("file"))?;

    log::debug!(
        "denoise request: {} bytes, method: {method}, strength: {}",
        file.len(),
        strength.value()
    );

    let png = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ApiError> {
        let start = std::time::Instant::now();

        let image = decode_image_rgb8(&file).map_err(ApiError::Decode)?;
        let denoised = denoise(&image, method, strength)?;
        let png = encode_image_png_rgb8(&denoised).map_err(ApiError::Encode)?;

        log::debug!(
            "denoised {} in {:?} ({method})",
            image.size(),
            start.elapsed()
        );
        Ok(png)
    })
    .await??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
