//! YouTube HTTP client

use super::{adapter, dto};
use crate::config::Endpoints;
use crate::resolver::domain::{Degraded, Provider, TrackIdentifier, TrackMetadata};
use crate::resolver::http::{FetchRequest, HttpFetcher};
use crate::resolver::oembed::OEmbedResponse;

/// YouTube client
pub struct YouTubeClient {
    fetcher: HttpFetcher,
    api_key: Option<String>,
    oembed_base: String,
    api_base: String,
}

impl YouTubeClient {
    /// Create a client. Searches are skipped when `api_key` is `None`.
    pub fn new(fetcher: HttpFetcher, endpoints: &Endpoints, api_key: Option<String>) -> Self {
        Self {
            fetcher,
            api_key,
            oembed_base: endpoints.youtube_oembed.trim_end_matches('/').to_string(),
            api_base: endpoints.youtube_api.trim_end_matches('/').to_string(),
        }
    }

    /// Look up title, channel and thumbnail via oEmbed
    pub async fn lookup(&self, id: &TrackIdentifier) -> Result<TrackMetadata, Degraded> {
        let url = format!(
            "{}/oembed?url={}&format=json",
            self.oembed_base,
            urlencoding::encode(&id.track_url())
        );

        let response: OEmbedResponse = self
            .fetcher
            .fetch_json(&url, FetchRequest::get())
            .await
            .map_err(|e| Degraded::upstream(Provider::Youtube, e))?
            .ok_or_else(|| Degraded::upstream(Provider::Youtube, "empty oEmbed response"))?;

        Ok(adapter::from_oembed(id, response))
    }

    /// Search videos and return the first hit
    pub async fn search(&self, query: &str) -> Result<Option<TrackMetadata>, Degraded> {
        let Some(api_key) = &self.api_key else {
            return Err(Degraded::CredentialMissing {
                provider: Provider::Youtube,
            });
        };

        let url = format!(
            "{}/youtube/v3/search?part=snippet&type=video&maxResults=1&q={}&key={}",
            self.api_base,
            urlencoding::encode(query),
            urlencoding::encode(api_key)
        );

        let response = self
            .fetcher
            .fetch_json::<dto::SearchResponse>(&url, FetchRequest::get())
            .await
            .map_err(|e| Degraded::upstream(Provider::Youtube, e))?;

        Ok(response.and_then(adapter::first_video))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::test_utils::endpoints_for;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, api_key: Option<&str>) -> YouTubeClient {
        let fetcher = HttpFetcher::new(&HttpConfig::default()).unwrap();
        YouTubeClient::new(
            fetcher,
            &endpoints_for(&server.uri()),
            api_key.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_lookup_via_oembed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .and(query_param("url", "https://www.youtube.com/watch?v=FGBhQbmPwH8"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Daft Punk - One More Time (Official Video)",
                "author_name": "Daft Punk",
                "thumbnail_url": "https://i.ytimg.com/vi/FGBhQbmPwH8/hqdefault.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = TrackIdentifier::new(Provider::Youtube, "FGBhQbmPwH8");
        let meta = client(&server, None).lookup(&id).await.unwrap();
        assert_eq!(meta.artist.as_deref(), Some("Daft Punk"));
        assert_eq!(
            meta.artwork_url.as_deref(),
            Some("https://i.ytimg.com/vi/FGBhQbmPwH8/hqdefault.jpg")
        );
    }

    #[tokio::test]
    async fn test_lookup_malformed_degrades() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Bad Request"))
            .mount(&server)
            .await;

        let id = TrackIdentifier::new(Provider::Youtube, "FGBhQbmPwH8");
        assert!(client(&server, None).lookup(&id).await.is_err());
    }

    #[tokio::test]
    async fn test_search_without_key_is_skipped() {
        let server = MockServer::start().await;
        let err = client(&server, None).search("anything").await.unwrap_err();
        assert_eq!(err, Degraded::CredentialMissing { provider: Provider::Youtube });
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_with_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/youtube/v3/search"))
            .and(query_param("q", "One More Time Daft Punk"))
            .and(query_param("key", "yt-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": {"kind": "youtube#video", "videoId": "FGBhQbmPwH8"},
                    "snippet": {
                        "title": "One More Time",
                        "channelTitle": "Daft Punk",
                        "thumbnails": {}
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hit = client(&server, Some("yt-key"))
            .search("One More Time Daft Punk")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.link.as_deref(), Some("https://www.youtube.com/watch?v=FGBhQbmPwH8"));
        assert_eq!(hit.artwork_url, None);
    }
}
