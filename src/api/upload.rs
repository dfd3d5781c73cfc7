//! Image uploads as `multipart/form-data`: the file sits in the `image` field (or `logo` for
//! team logos) and the part's `Content-Type` picks the extension. Files land in the configured
//! upload directory, which the server exposes under `/uploads`.

use crate::api::{ApiError, State};
use actix_multipart::{Multipart, MultipartError};
use actix_web::{post, web, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// `<field>-<millis>-<random>.<ext>`, unique enough for concurrent uploads.
fn unique_name(field: &str, ext: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}-{}.{}", field, millis, suffix, ext)
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::bad_request(format!("Invalid upload: {}", e))
}

/// Read the file part named `field` into memory. Other parts are skipped.
///
/// Returns the bytes and the extension matching the part's content type.
async fn read_image(mut payload: Multipart, field: &str) -> Result<(Vec<u8>, &'static str), ApiError> {
    while let Some(mut part) = payload.try_next().await.map_err(multipart_error)? {
        if part.name() != Some(field) {
            while part.try_next().await.map_err(multipart_error)?.is_some() {}
            continue;
        }
        let ext = part
            .content_type()
            .and_then(|mime| extension_for(mime.essence_str()))
            .ok_or_else(|| ApiError::bad_request("File type not allowed: only images are accepted"))?;
        let mut data = Vec::new();
        while let Some(chunk) = part.try_next().await.map_err(multipart_error)? {
            if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(ApiError::PayloadTooLarge(MAX_UPLOAD_BYTES));
            }
            data.extend_from_slice(&chunk);
        }
        if data.is_empty() {
            break;
        }
        return Ok((data, ext));
    }
    Err(ApiError::bad_request("No file uploaded"))
}

/// Validate and write the image; returns the stored file name.
async fn store_image(state: &State, payload: Multipart, field: &str) -> Result<String, ApiError> {
    let (data, ext) = read_image(payload, field).await?;
    let filename = unique_name(field, ext);
    let dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&filename), &data).await?;
    log::info!("Stored upload {} ({} bytes)", filename, data.len());
    Ok(filename)
}

#[post("/image")]
async fn image(state: State, req: HttpRequest, payload: Multipart) -> Result<HttpResponse, ApiError> {
    let filename = store_image(&state, payload, "image").await?;
    let conn = req.connection_info();
    let url = format!("{}://{}/uploads/{}", conn.scheme(), conn.host(), filename);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Image uploaded",
        "url": url,
        "filename": filename,
    })))
}

#[post("/team-logo")]
async fn team_logo(state: State, payload: Multipart) -> Result<HttpResponse, ApiError> {
    let filename = store_image(&state, payload, "logo").await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Logo uploaded",
        "url": format!("/uploads/{}", filename),
        "filename": filename,
    })))
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/upload").service(image).service(team_logo));
}
