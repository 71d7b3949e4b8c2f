use std::path::Path;

use tracing::debug;

use crate::errors::AppError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Client folder slugs map directly to directory names, so only a safe alphabet is allowed.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_image(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Lists the images of a client folder as public URLs (`/clients/{slug}/{file}`), sorted by
/// file name so the pool order is stable between calls.
pub async fn list_client_images(root: &Path, slug: &str) -> Result<Vec<String>, AppError> {
    if !is_valid_slug(slug) {
        return Err(AppError::NotFound(format!("Client folder '{slug}' not found")));
    }

    let dir = root.join(slug);
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot read client folder {}: {e}", dir.display());
            return Err(AppError::NotFound(format!("Client folder '{slug}' not found")));
        }
    };

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list {}: {e}", dir.display()))?
    {
        if !entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_image(name) {
                files.push(name.to_string());
            }
        }
    }

    if files.is_empty() {
        return Err(AppError::NotFound(format!(
            "Client folder '{slug}' has no images"
        )));
    }

    files.sort();
    Ok(files
        .into_iter()
        .map(|f| format!("/clients/{slug}/{f}"))
        .collect())
}
