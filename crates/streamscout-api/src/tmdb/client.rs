//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::types::{
    MediaKind, RegionProviders, SearchMovieParams, TmdbErrorResponse, TmdbExternalIds,
    TmdbGenreList, TmdbListingResponse, TmdbPersonCredits, TmdbPersonSearchResponse,
    TmdbTitleDetails, TmdbWatchProvidersResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// How requests are authenticated.
#[derive(Debug, Clone)]
enum Credential {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as a bearer token.
    BearerToken(String),
}

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Request credential.
    credential: Credential,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    api_token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_token: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the v4 bearer token. Takes precedence over `api_key`.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - Neither `api_key` nor `api_token` is set (or both are empty).
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let token = self.api_token.filter(|t| !t.is_empty());
        let key = self.api_key.filter(|k| !k.is_empty());
        let credential = match (token, key) {
            (Some(token), _) => Credential::BearerToken(token),
            (None, Some(key)) => Credential::ApiKey(key),
            (None, None) => bail!("TMDB_API_KEY is required (api_key or api_token)"),
        };
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut http_builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            http_builder = http_builder.timeout(timeout);
        }
        let http_client = http_builder
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credential,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends an authenticated GET request and decodes the JSON body.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut builder = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query);
        builder = match &self.credential {
            Credential::ApiKey(key) => builder.query(&[("api_key", key.as_str())]),
            Credential::BearerToken(token) => builder.bearer_auth(token),
        };
        let request = builder
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(?query, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        tracing::trace!(%status, %body, "TMDB API response");

        if !status.is_success() {
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn top_rated(
        &self,
        kind: MediaKind,
        page: u32,
        language: &str,
    ) -> Result<TmdbListingResponse> {
        let path = format!("{}/top_rated", kind.path_segment());
        let query = [
            ("page", page.to_string()),
            ("language", String::from(language)),
        ];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn popular(
        &self,
        kind: MediaKind,
        page: u32,
        language: &str,
    ) -> Result<TmdbListingResponse> {
        let path = format!("{}/popular", kind.path_segment());
        let query = [
            ("page", page.to_string()),
            ("language", String::from(language)),
        ];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbListingResponse> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }
        if let Some(ref region) = params.region {
            query.push(("region", region.clone()));
        }

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all)]
    async fn genres(&self, kind: MediaKind, language: &str) -> Result<TmdbGenreList> {
        let path = format!("genre/{}/list", kind.path_segment());
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn watch_providers(
        &self,
        kind: MediaKind,
        id: u64,
        region: &str,
    ) -> Result<RegionProviders> {
        let path = format!("{}/{id}/watch/providers", kind.path_segment());
        let mut response: TmdbWatchProvidersResponse = self.get_json(&path, &[]).await?;
        response
            .results
            .remove(&region.to_uppercase())
            .with_context(|| format!("no provider data for region {region}"))
    }

    #[instrument(skip_all)]
    async fn external_ids(&self, kind: MediaKind, id: u64) -> Result<TmdbExternalIds> {
        let path = format!("{}/{id}/external_ids", kind.path_segment());
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn localized_title(&self, kind: MediaKind, id: u64, language: &str) -> Result<String> {
        let path = format!("{}/{id}", kind.path_segment());
        let query = [("language", String::from(language))];
        let details: TmdbTitleDetails = self.get_json(&path, &query).await?;
        let title = match kind {
            MediaKind::Movie => details.title,
            MediaKind::Tv => details.name,
        };
        Ok(title.unwrap_or_default())
    }

    #[instrument(skip_all)]
    async fn search_person(
        &self,
        query: &str,
        language: &str,
        page: u32,
    ) -> Result<TmdbPersonSearchResponse> {
        let query = [
            ("query", String::from(query)),
            ("language", String::from(language)),
            ("page", page.to_string()),
        ];
        self.get_json("search/person", &query).await
    }

    #[instrument(skip_all)]
    async fn popular_people(&self, language: &str, page: u32) -> Result<TmdbPersonSearchResponse> {
        let query = [
            ("language", String::from(language)),
            ("page", page.to_string()),
        ];
        self.get_json("person/popular", &query).await
    }

    #[instrument(skip_all)]
    async fn person_movie_credits(
        &self,
        person_id: u64,
        language: &str,
    ) -> Result<TmdbPersonCredits> {
        let path = format!("person/{person_id}/movie_credits");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }
}
