//! Unsplash random-photo API.
//!
//! One `GET /photos/random?orientation=landscape` per candidate, authenticated
//! with the application's access key (`Authorization: Client-ID <key>`).

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::{PhotoSource, RemotePhoto};
use crate::config::{resolve_env_var, SourceConfig};
use crate::error::{FetchError, FetchResult};

/// Unsplash photo source.
pub struct UnsplashSource {
    url: String,
    auth_key: Option<String>,
    orientation: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl UnsplashSource {
    pub fn new(config: &SourceConfig) -> Self {
        let auth_key = resolve_env_var(&config.auth_key);
        if auth_key.is_none() {
            tracing::warn!(
                "No Unsplash access key configured (source.auth_key); requests will be rejected"
            );
        }
        Self {
            url: config.random_photos_url(),
            auth_key,
            orientation: config.orientation.clone(),
            timeout: Duration::from_millis(config.request_timeout_ms),
            client: reqwest::Client::new(),
        }
    }
}

/// `/photos/random` response, reduced to the fields we use.
#[derive(Deserialize)]
struct RandomPhotoResponse {
    width: u32,
    height: u32,
    urls: PhotoUrls,
    user: PhotoUser,
}

#[derive(Deserialize)]
struct PhotoUrls {
    full: String,
}

#[derive(Deserialize)]
struct PhotoUser {
    name: String,
    links: UserLinks,
}

#[derive(Deserialize)]
struct UserLinks {
    html: String,
}

fn parse_random_photo(body: &str, url: &str) -> FetchResult<RemotePhoto> {
    let parsed: RandomPhotoResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    Ok(RemotePhoto {
        width: parsed.width,
        height: parsed.height,
        remote_location: parsed.urls.full,
        author: parsed.user.name,
        author_url: parsed.user.links.html,
    })
}

fn transport_error(url: &str, e: reqwest::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    }
}

impl UnsplashSource {
    /// `GET /photos/random`, bounded by the per-request timeout.
    fn random_photo_request(&self) -> reqwest::RequestBuilder {
        let request = self
            .client
            .get(&self.url)
            .query(&[("orientation", self.orientation.as_str())])
            .header("Accept-Version", "v1")
            .timeout(self.timeout);
        match &self.auth_key {
            Some(key) => request.header("Authorization", format!("Client-ID {key}")),
            None => request,
        }
    }

    /// Image download. No per-request timeout: a full-size photo on a slow
    /// link can take longer, and the retrieval deadline bounds it instead.
    fn download_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.get(url)
    }
}

#[async_trait]
impl PhotoSource for UnsplashSource {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn random_photo(&self) -> FetchResult<RemotePhoto> {
        let resp = self
            .random_photo_request()
            .send()
            .await
            .map_err(|e| transport_error(&self.url, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(&self.url, e))?;
        parse_random_photo(&body, &self.url)
    }

    async fn download(&self, url: &str, dest: &Path) -> FetchResult<u64> {
        use futures_util::StreamExt;
        use tokio::io::AsyncWriteExt;

        let resp = self
            .download_request(url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let io_error = |source| FetchError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::create(dest).await.map_err(io_error)?;
        let mut stream = resp.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Download {
                url: url.to_string(),
                message: e.to_string(),
            })?;
            file.write_all(&chunk).await.map_err(io_error)?;
            downloaded += chunk.len() as u64;
        }

        file.flush().await.map_err(io_error)?;
        Ok(downloaded)
    }
}
