use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::{NewProject, NewThumbnail};

const DEFAULT_THUMBNAIL_TITLE: &str = "Proposition";
const TOKEN_LEN: usize = 12;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub images: Vec<ImageInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: String,
}

/// Opaque client token: the first 12 hex chars of a random UUID.
pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()[..TOKEN_LEN].to_string()
}

/// Validates a creation request and issues the project's client token.
pub fn validate_new_project(req: CreateProjectRequest) -> Result<NewProject, AppError> {
    let name = req.name.trim();
    let client_name = req.client_name.trim();
    if name.is_empty() || client_name.is_empty() {
        return Err(AppError::InvalidPayload(
            "name and clientName are required".into(),
        ));
    }
    if req.images.is_empty() {
        return Err(AppError::InvalidPayload(
            "at least one image is required".into(),
        ));
    }

    let thumbnails = req
        .images
        .into_iter()
        .enumerate()
        .map(|(i, img)| {
            let image_url = img.image_url.trim();
            if image_url.is_empty() {
                return Err(AppError::InvalidPayload(format!(
                    "images[{i}].imageUrl is required"
                )));
            }
            let title = img
                .title
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_THUMBNAIL_TITLE);
            Ok(NewThumbnail {
                title: title.to_string(),
                image_url: image_url.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewProject {
        name: name.to_string(),
        client_name: client_name.to_string(),
        token: generate_token(),
        thumbnails,
    })
}
