// ABOUTME: Image providers that build a URL from the title without a network call
// ABOUTME: Unsplash featured-photo links and static placeholder images
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tracing::debug;

use super::ImageProvider;
use crate::errors::AppResult;

/// Unsplash featured photo matching the title
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsplashImageProvider;

#[async_trait]
impl ImageProvider for UnsplashImageProvider {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    async fn fetch_image(&self, title: &str) -> AppResult<Option<String>> {
        let url = format!(
            "https://source.unsplash.com/featured/?{}",
            urlencoding::encode(title.trim())
        );
        debug!(title, url = %url, "Using Unsplash image");
        Ok(Some(url))
    }
}

/// Placeholder image with the title as its caption
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderImageProvider;

#[async_trait]
impl ImageProvider for PlaceholderImageProvider {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn fetch_image(&self, title: &str) -> AppResult<Option<String>> {
        Ok(Some(format!(
            "https://via.placeholder.com/640x480?text={}",
            urlencoding::encode(title.trim())
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_urls_are_encoded() {
        let url = UnsplashImageProvider.fetch_image("계란 볶음밥").await.unwrap();
        assert_eq!(
            url.as_deref(),
            Some("https://source.unsplash.com/featured/?%EA%B3%84%EB%9E%80%20%EB%B3%B6%EC%9D%8C%EB%B0%A5")
        );

        let url = PlaceholderImageProvider.fetch_image("a b").await.unwrap();
        assert_eq!(url.as_deref(), Some("https://via.placeholder.com/640x480?text=a%20b"));
    }
}
