//! # Gallery Client Core
//!
//! Thin client for the gallery service's HTTP endpoints. Every call is a
//! single attempt: a transport error bubbles up as `Err` and aborts the
//! running workflow, while an unexpected status is logged together with the
//! response body and reported as a plain `false`/`None` for the workflow to
//! classify.
//!
//! ## Listing checks
//!
//! The service renders its listings as HTML. The checker only ever needs
//! presence or absence of a gallery or file reference, so the marker syntax
//! (`<a href="/gallery/{name}">`, `<span class="file-name">{file}</span>`)
//! stays private to this module and the workflows get boolean predicates.

use anyhow::Result;
use log::{error, info, warn};
use reqwest::multipart;
use reqwest::StatusCode;
use std::time::Duration;

/// Client for one gallery service instance.
pub struct GalleryClient {
    base_url: String,
    http: reqwest::Client,
}

impl GalleryClient {
    /// Create a client for the service at `host:port`.
    ///
    /// The exercise addresses targets by IP, IPv6 included, so bare IPv6
    /// literals are bracketed for URL use.
    ///
    /// # Example
    /// ```ignore
    /// let client = GalleryClient::new("fd66:666:1::2", 5005, Duration::from_secs(10))?;
    /// ```
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };
        Self::from_base_url(format!("http://{}:{}", host, port), timeout)
    }

    /// Create a client from a complete base URL, e.g. `http://127.0.0.1:5005`.
    pub fn from_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Create a gallery protected by `password`.
    pub async fn create_gallery(
        &self,
        gallery_name: &str,
        description: &str,
        password: &str,
    ) -> Result<bool> {
        info!("Creating gallery {} with password {}", gallery_name, password);
        let response = self
            .http
            .post(format!("{}/create", self.base_url))
            .form(&[
                ("gallery_name", gallery_name),
                ("description", description),
                ("password", password),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            error!(
                "❌ create gallery failed: {}",
                response.text().await.unwrap_or_default()
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Upload PNG bytes as `file_name` into a gallery.
    pub async fn upload_image(
        &self,
        gallery_name: &str,
        file_name: &str,
        png_bytes: Vec<u8>,
    ) -> Result<bool> {
        info!("📤 Uploading {} to gallery {}", file_name, gallery_name);
        let part = multipart::Part::bytes(png_bytes)
            .file_name(file_name.to_string())
            .mime_str("image/png")?;
        let form = multipart::Form::new().part("mediafile", part);

        let response = self
            .http
            .post(format!("{}/gallery/{}/upload", self.base_url, gallery_name))
            .multipart(form)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            error!(
                "❌ upload image failed: {}",
                response.text().await.unwrap_or_default()
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Download an image through the public, unauthenticated path.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))`: Raw response body on HTTP 200
    /// - `Ok(None)`: Service answered with a non-success status
    /// - `Err`: Transport failure
    pub async fn download_image(
        &self,
        gallery_name: &str,
        file_name: &str,
    ) -> Result<Option<Vec<u8>>> {
        info!("Downloading {} from gallery {}", file_name, gallery_name);
        let response = self
            .http
            .get(format!(
                "{}/gallery/{}/download/{}",
                self.base_url, gallery_name, file_name
            ))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            error!(
                "❌ download image failed: {}",
                response.text().await.unwrap_or_default()
            );
            return Ok(None);
        }
        Ok(Some(response.bytes().await?.to_vec()))
    }

    /// Retrieve an image through the authenticated decrypt path.
    ///
    /// This is the second access path the service exposes next to plain
    /// download; both are expected to serve the originally uploaded content.
    pub async fn decrypt_image(
        &self,
        gallery_name: &str,
        file_name: &str,
        password: &str,
    ) -> Result<Option<Vec<u8>>> {
        info!(
            "Decrypting {} from gallery {} with password {}",
            file_name, gallery_name, password
        );
        let response = self
            .http
            .post(format!("{}/gallery/{}/decrypt", self.base_url, gallery_name))
            .json(&serde_json::json!({
                "fileId": file_name,
                "password": password,
            }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            error!("❌ decryption failed");
            return Ok(None);
        }
        Ok(Some(response.bytes().await?.to_vec()))
    }

    /// Whether the root listing references `gallery_name`.
    pub async fn gallery_listed(&self, gallery_name: &str) -> Result<bool> {
        let listing = self
            .http
            .get(format!("{}/", self.base_url))
            .send()
            .await?
            .text()
            .await?;
        Ok(listing.contains(&gallery_marker(gallery_name)))
    }

    /// Whether the gallery's own listing references `file_name`.
    pub async fn image_listed(&self, gallery_name: &str, file_name: &str) -> Result<bool> {
        let listing = self
            .http
            .get(format!("{}/gallery/{}", self.base_url, gallery_name))
            .send()
            .await?
            .text()
            .await?;
        Ok(listing.contains(&image_marker(file_name)))
    }

    /// Delete a single image using the gallery password.
    pub async fn delete_image(
        &self,
        gallery_name: &str,
        file_name: &str,
        password: &str,
    ) -> Result<bool> {
        info!("Deleting {} from gallery {}", file_name, gallery_name);
        let response = self
            .http
            .post(format!("{}/gallery/{}/delete", self.base_url, gallery_name))
            .json(&serde_json::json!({
                "fileId": file_name,
                "password": password,
            }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            warn!(
                "Deletion output: {}",
                response.text().await.unwrap_or_default()
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Delete a whole gallery using its password.
    pub async fn delete_gallery(&self, gallery_name: &str, password: &str) -> Result<bool> {
        info!("Deleting gallery {}", gallery_name);
        let response = self
            .http
            .post(format!(
                "{}/gallery/{}/delete_gal",
                self.base_url, gallery_name
            ))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            error!(
                "❌ deleting gallery failed: {}",
                response.text().await.unwrap_or_default()
            );
            return Ok(false);
        }
        Ok(true)
    }
}

/// Marker the root listing renders for a gallery reference.
fn gallery_marker(gallery_name: &str) -> String {
    format!("<a href=\"/gallery/{}\">", gallery_name)
}

/// Marker a gallery listing renders for a contained file.
fn image_marker(file_name: &str) -> String {
    format!("<span class=\"file-name\">{}</span>", file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv6_hosts_are_bracketed() {
        let client =
            GalleryClient::new("fd66:666:1::2", 5005, Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://[fd66:666:1::2]:5005");
    }

    #[test]
    fn ipv4_hosts_are_untouched() {
        let client = GalleryClient::new("10.0.3.7", 5005, Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://10.0.3.7:5005");
    }

    #[test]
    fn markers_match_the_service_markup() {
        assert_eq!(gallery_marker("abcd"), "<a href=\"/gallery/abcd\">");
        assert_eq!(
            image_marker("x.png"),
            "<span class=\"file-name\">x.png</span>"
        );
    }
}
