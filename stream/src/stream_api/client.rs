//! The Stream API client.

use crate::config::StreamConfig;
use crate::stream_api::error::Error;
use crate::stream_api::executor::RequestExecutor;
use crate::stream_api::queries::{AddCaptionQuery, ListVideoQuery, UpdateVideoQuery};
use crate::stream_api::videos::{ListVideoResponse, Video};
use std::path::Path;
use tracing::instrument;

/// Client for the video endpoints of a single Stream library.
///
/// All calls block the calling thread for one full request/response round trip (for uploads,
/// that includes sending the whole file). The client holds nothing but its configuration and a
/// pooled HTTP client, so it can be cloned and shared between threads freely; concurrent calls
/// are not coordinated in any way.
///
/// Nothing is retried. Errors are returned to the caller as-is:
///
/// - [`Error::Api`] for non-2xx responses,
/// - [`Error::Validation`] and [`Error::Io`] for problems caught before anything is sent,
/// - [`Error::Transport`] and [`Error::Json`] when no well-formed response came back.
#[derive(Debug, Clone)]
pub struct StreamClient {
    config: StreamConfig,
    executor: RequestExecutor,
}

impl StreamClient {
    /// Creates a client for library `library_id`, authenticating with `api_key`.
    pub fn new(api_key: impl Into<String>, library_id: u64) -> Self {
        Self::from_config(StreamConfig::new(api_key, library_id))
    }

    pub fn from_config(config: StreamConfig) -> Self {
        Self::with_http_client(config, reqwest::blocking::Client::new())
    }

    /// Creates a client that sends its requests through an existing HTTP client.
    pub fn with_http_client(config: StreamConfig, client: reqwest::blocking::Client) -> Self {
        let executor = RequestExecutor::new(config.api_key.clone(), client);
        Self { config, executor }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Full URL of `endpoint` within this client's library.
    pub fn generate_base_url(&self, endpoint: &str) -> String {
        self.config.endpoint_url(endpoint)
    }

    /// Lists one page of videos.
    ///
    /// `page`, `perPage` and `sortBy` are always sent; `search` and `collection` only if the
    /// query sets them, after the others and in the order they were set. Walking through
    /// further pages is up to the caller.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the query asks for page 0.
    #[instrument(skip(self))]
    pub fn list_videos(&self, query: &ListVideoQuery) -> Result<ListVideoResponse, Error> {
        if query.page() == 0 {
            return Err(Error::Validation("page numbers start at 1"));
        }

        let doc = self
            .executor
            .get(&self.generate_base_url("/videos"), &query.to_params())?
            .ok_or(Error::EmptyResponse)?;

        Ok(ListVideoResponse::new(doc))
    }

    /// Fetches a single video.
    #[instrument(skip(self))]
    pub fn get_video(&self, video_id: &str) -> Result<Video, Error> {
        let doc = self
            .executor
            .get(&self.video_url(video_id), &[])?
            .ok_or(Error::EmptyResponse)?;

        Ok(Video::new(doc))
    }

    /// Changes the title and/or collection of a video.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`], without contacting the API, if the query sets neither field.
    #[instrument(skip(self))]
    pub fn update_video(&self, query: &UpdateVideoQuery) -> Result<(), Error> {
        if !query.has_changes() {
            return Err(Error::Validation(
                "an update must set at least one of title and collection",
            ));
        }

        self.executor
            .post(&self.video_url(query.video_id()), &query.to_body())?;

        tracing::debug!(video_id = query.video_id(), "updated video");
        Ok(())
    }

    /// Sets the thumbnail of a video to the image at `thumbnail_url`.
    #[instrument(skip(self))]
    pub fn set_video_thumbnail(&self, video_id: &str, thumbnail_url: &str) -> Result<(), Error> {
        let body = [("thumbnailUrl", thumbnail_url.to_string())];
        self.executor.post(&self.video_url(video_id), &body)?;
        Ok(())
    }

    /// Creates an empty video, to be filled with [`Self::upload_video`] or [`Self::fetch_video`].
    ///
    /// Pass an empty `collection_id` to create the video outside of any collection.
    #[instrument(skip(self))]
    pub fn create_video(&self, title: &str, collection_id: &str) -> Result<Video, Error> {
        let mut body = Vec::with_capacity(2);
        if !collection_id.is_empty() {
            body.push(("collectionId", collection_id.to_string()));
        }
        body.push(("title", title.to_string()));

        let doc = self
            .executor
            .post(&self.generate_base_url("/videos"), &body)?
            .ok_or(Error::EmptyResponse)?;

        let video = Video::new(doc);
        tracing::debug!(guid = %video.guid(), "created video");
        Ok(video)
    }

    /// Uploads the file at `path` as the source of an existing video.
    ///
    /// The file is read fully into memory and sent as-is in a single request.
    ///
    /// # Errors
    ///
    /// [`Error::Io`], without contacting the API, if the file cannot be read.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn upload_video(&self, video_id: &str, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let size = bytes.len();
        self.executor.put(&self.video_url(video_id), bytes)?;

        tracing::debug!(video_id, size, "uploaded video");
        Ok(())
    }

    /// Creates a video, uploads `path` into it, and returns the video as it looks afterwards.
    ///
    /// The steps are not atomic: if the upload fails, the video created in the first step
    /// stays in the library, empty.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn create_and_upload_video(
        &self,
        title: &str,
        path: impl AsRef<Path>,
        collection_id: &str,
    ) -> Result<Video, Error> {
        let guid = self.create_video(title, collection_id)?.guid();
        self.upload_video(&guid, path)?;
        self.get_video(&guid)
    }

    /// Deletes a video.
    #[instrument(skip(self))]
    pub fn delete_video(&self, video_id: &str) -> Result<(), Error> {
        self.executor.delete(&self.video_url(video_id))?;
        Ok(())
    }

    /// Tells the API to fetch the source of a video from `url`.
    ///
    /// `headers` are extra headers for the API to send when it downloads `url`. They are
    /// passed along as one string of the form `[name=value, name=value]` rather than as a JSON
    /// object.
    // TODO: send headers as a JSON object once the fetch endpoint is confirmed to accept one.
    #[instrument(skip(self, headers), fields(header_count = headers.map_or(0, <[_]>::len)))]
    pub fn fetch_video(
        &self,
        video_id: &str,
        url: &str,
        headers: Option<&[(String, String)]>,
    ) -> Result<(), Error> {
        let mut body = vec![("url", url.to_string())];
        if let Some(headers) = headers {
            body.push(("headers", stringify_headers(headers)));
        }

        let endpoint = format!("/videos/{video_id}/fetch");
        self.executor.post(&self.generate_base_url(&endpoint), &body)?;
        Ok(())
    }

    /// Adds a caption track to a video.
    #[instrument(
        skip(self, query),
        fields(video_id = query.video_id(), src_lang = query.src_lang())
    )]
    pub fn add_caption(&self, query: &AddCaptionQuery) -> Result<(), Error> {
        let endpoint = format!("/videos/{}/captions", query.video_id());
        self.executor
            .post(&self.generate_base_url(&endpoint), &query.to_body())?;
        Ok(())
    }

    /// Removes the caption track for language `src_lang` from a video.
    #[instrument(skip(self))]
    pub fn delete_caption(&self, video_id: &str, src_lang: &str) -> Result<(), Error> {
        let endpoint = format!("/videos/{video_id}/captions/{src_lang}");
        self.executor.delete(&self.generate_base_url(&endpoint))?;
        Ok(())
    }

    fn video_url(&self, video_id: &str) -> String {
        self.generate_base_url(&format!("/videos/{video_id}"))
    }
}

fn stringify_headers(headers: &[(String, String)]) -> String {
    let pairs: Vec<String> = headers
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    format!("[{}]", pairs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn headers_are_stringified_as_one_list() {
        let headers = vec![
            ("Authorization".to_string(), "Bearer abc".to_string()),
            ("X-Origin".to_string(), "cdn".to_string()),
        ];
        assert_eq!(
            stringify_headers(&headers),
            "[Authorization=Bearer abc, X-Origin=cdn]"
        );
        assert_eq!(stringify_headers(&[]), "[]");
    }

    #[test]
    fn urls_are_scoped_to_the_library() {
        let client = StreamClient::new("key", 42);
        assert_eq!(
            client.generate_base_url("/videos"),
            "https://video.bunnycdn.com/library/42/videos"
        );
        assert_eq!(
            client.video_url("abc"),
            "https://video.bunnycdn.com/library/42/videos/abc"
        );
    }
}
