//! HTTP implementation of [`NotesApi`] on top of `reqwest`.

use super::{FetchNotesParams, NotesApi};
use crate::domain::{CreateNotePayload, Note, NoteHubError, NotesPage, Result};
use crate::Config;
use futures_util::future::BoxFuture;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Client for the notes REST service.
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: Client,
    base: Url,
    token: Option<String>,
    per_page: Option<u32>,
}

impl HttpNotesApi {
    /// Builds a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`NoteHubError::Config`] for an unparsable base URL and
    /// [`NoteHubError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: normalize_base(base_url)?,
            token: None,
            per_page: None,
        })
    }

    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`HttpNotesApi::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut api = Self::new(&config.api_base_url, config.request_timeout())?;
        api.token = config.api_token.clone().filter(|t| !t.is_empty());
        api.per_page = config.per_page;
        Ok(api)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn notes_url(&self) -> Result<Url> {
        Ok(self.base.join("notes")?)
    }

    fn note_url(&self, id: &str) -> Result<Url> {
        let mut url = self.notes_url()?;
        url.path_segments_mut()
            .map_err(|()| NoteHubError::Config(format!("{} cannot be a base URL", self.base)))?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Parses `raw` and makes sure relative joins append to its path.
fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Query pairs of a list request.
fn list_query(params: &FetchNotesParams, per_page: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = Vec::with_capacity(4);
    if !params.search.is_empty() {
        query.push(("search", params.search.clone()));
    }
    query.push(("page", params.page.to_string()));
    if let Some(tag) = params.tag {
        query.push(("tag", tag.as_str().to_string()));
    }
    if let Some(per_page) = per_page {
        query.push(("perPage", per_page.to_string()));
    }
    query
}

/// Sends `request` and decodes a successful JSON body.
async fn send_json<T: DeserializeOwned>(request: Result<RequestBuilder>) -> Result<T> {
    let response = request?.send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| NoteHubError::Decode(e.to_string()))
}

impl NotesApi for HttpNotesApi {
    fn fetch_notes(&self, params: FetchNotesParams) -> BoxFuture<'static, Result<NotesPage>> {
        let request = self.notes_url().map(|url| {
            tracing::debug!(url = %url, page = params.page, "GET notes");
            self.authorize(self.client.get(url).query(&list_query(&params, self.per_page)))
        });
        Box::pin(send_json(request))
    }

    fn fetch_note(&self, id: String) -> BoxFuture<'static, Result<Note>> {
        let request = self.note_url(&id).map(|url| {
            tracing::debug!(url = %url, "GET note");
            self.authorize(self.client.get(url))
        });
        Box::pin(send_json(request))
    }

    fn create_note(&self, payload: CreateNotePayload) -> BoxFuture<'static, Result<Note>> {
        let request = self.notes_url().map(|url| {
            tracing::debug!(url = %url, tag = %payload.tag, "POST note");
            self.authorize(self.client.post(url).json(&payload))
        });
        Box::pin(send_json(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteTag;

    fn params(search: &str, page: u32, tag: Option<NoteTag>) -> FetchNotesParams {
        FetchNotesParams {
            search: search.to_string(),
            page,
            tag,
        }
    }

    #[test]
    fn empty_search_and_no_tag_are_omitted() {
        let query = list_query(&params("", 1, None), None);
        assert_eq!(query, vec![("page", "1".to_string())]);
    }

    #[test]
    fn full_query_uses_wire_names() {
        let query = list_query(&params("milk", 2, Some(NoteTag::Shopping)), Some(12));
        assert_eq!(
            query,
            vec![
                ("search", "milk".to_string()),
                ("page", "2".to_string()),
                ("tag", "Shopping".to_string()),
                ("perPage", "12".to_string()),
            ]
        );
    }

    #[test]
    fn base_path_is_preserved() {
        let api = HttpNotesApi::new("https://example.com/api", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url().as_str(), "https://example.com/api/");
        assert_eq!(api.notes_url().unwrap().as_str(), "https://example.com/api/notes");

        let api = HttpNotesApi::new("https://example.com/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.notes_url().unwrap().as_str(), "https://example.com/api/notes");
    }

    #[test]
    fn note_ids_are_escaped_as_one_segment() {
        let api = HttpNotesApi::new("https://example.com", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.note_url("a/b c").unwrap().as_str(),
            "https://example.com/notes/a%2Fb%20c"
        );
    }

    #[test]
    fn invalid_base_is_a_config_error() {
        let err = HttpNotesApi::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, NoteHubError::Config(_)));
    }
}
