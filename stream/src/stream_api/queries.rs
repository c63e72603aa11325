//! Parameter objects for the Stream API calls that take more than an ID.
//!
//! Each query is assembled with its generated builder and is immutable once built. Building
//! never checks that a combination of fields makes sense for the call it is meant for; that
//! happens in [`StreamClient`](crate::StreamClient) right before a request would be sent, so a
//! half-configured builder can be kept around and finished later without failing early.
//!
//! ```rust,no_run
//! use bunny_stream::{ListVideoQuery, UpdateVideoQuery};
//!
//! let list = ListVideoQuery::builder()
//!     .page(2)
//!     .per_page(25)
//!     .search("keynote")
//!     .build()?;
//!
//! let update = UpdateVideoQuery::builder("8e1b5d3c-0b41-4cf4-a4bd-2d4f8f3f2c10")
//!     .title("Keynote (final cut)")
//!     .build()?;
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Queries that name a video can only be started from that video's ID, so an unfinished
//! builder is never missing it:
//!
//! ```rust,compile_fail
//! let _ = bunny_stream::stream_api::UpdateVideoQueryBuilder::default();
//! ```
//!
//! ```rust,compile_fail
//! let _ = bunny_stream::stream_api::AddCaptionQueryBuilder::default();
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use derive_builder::Builder;

/// Parameters for listing the videos of a library.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ListVideoQuery {
    /// The page to return, starting at 1.
    #[builder(default = "1")]
    page: u32,

    /// The number of videos per page.
    #[builder(default = "10")]
    per_page: u32,

    /// The field to order results by.
    #[builder(setter(into), default = "String::from(\"date\")")]
    sort_by: String,

    /// `search` and `collection`, in the order their setters were first called.
    #[builder(setter(custom), default)]
    filters: Vec<(&'static str, String)>,
}

impl ListVideoQuery {
    pub fn builder() -> ListVideoQueryBuilder {
        ListVideoQueryBuilder::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    pub fn search(&self) -> Option<&str> {
        self.filter("search")
    }

    pub fn collection(&self) -> Option<&str> {
        self.filter("collection")
    }

    fn filter(&self, name: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Query parameters in the order they go on the wire.
    ///
    /// `page`, `perPage` and `sortBy` are always present; `search` and `collection` follow
    /// only if they were set, in the order they were set in.
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
            ("sortBy", self.sort_by.clone()),
        ];
        params.extend(self.filters.iter().cloned());
        params
    }
}

impl ListVideoQueryBuilder {
    /// Only return videos whose title matches this search term.
    pub fn search<VALUE: Into<String>>(&mut self, value: VALUE) -> &mut Self {
        self.set_filter("search", value.into())
    }

    /// Only return videos in this collection.
    pub fn collection<VALUE: Into<String>>(&mut self, value: VALUE) -> &mut Self {
        self.set_filter("collection", value.into())
    }

    // setting a filter again replaces its value but keeps its position
    fn set_filter(&mut self, name: &'static str, value: String) -> &mut Self {
        let filters = self.filters.get_or_insert_with(Vec::new);
        match filters.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => filters.push((name, value)),
        }
        self
    }
}

impl Default for ListVideoQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            sort_by: String::from("date"),
            filters: Vec::new(),
        }
    }
}

/// Parameters for changing the metadata of an existing video.
///
/// At least one of `title` and `collection` has to be set for the update to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(custom_constructor)]
pub struct UpdateVideoQuery {
    /// The video to update.
    #[builder(setter(custom))]
    video_id: String,

    /// The new title.
    #[builder(setter(into, strip_option), default)]
    title: Option<String>,

    /// The collection to move the video into.
    ///
    /// The API answers `403` if the key may not use that collection.
    #[builder(setter(into, strip_option), default)]
    collection: Option<String>,
}

impl UpdateVideoQuery {
    pub fn builder(video_id: impl Into<String>) -> UpdateVideoQueryBuilder {
        let mut builder = UpdateVideoQueryBuilder::create_empty();
        builder.video_id = Some(video_id.into());
        builder
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Whether the query would change anything.
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.collection.is_some()
    }

    pub(crate) fn to_body(&self) -> Vec<(&'static str, String)> {
        let mut body = Vec::with_capacity(2);
        if let Some(collection) = &self.collection {
            body.push(("collectionId", collection.clone()));
        }
        if let Some(title) = &self.title {
            body.push(("title", title.clone()));
        }
        body
    }
}

/// Parameters for attaching a caption track to a video.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(custom_constructor)]
pub struct AddCaptionQuery {
    /// The video to add the captions to.
    #[builder(setter(custom))]
    video_id: String,

    /// Language code of the captions, e.g. `en`.
    #[builder(setter(custom))]
    src_lang: String,

    /// Label shown in the player's caption menu.
    #[builder(setter(into, strip_option), default)]
    label: Option<String>,

    /// The caption file, base64-encoded.
    ///
    /// Use [`AddCaptionQueryBuilder::caption_contents`] to pass the raw file instead.
    #[builder(setter(into, strip_option), default)]
    caption_file: Option<String>,
}

impl AddCaptionQuery {
    pub fn builder(
        video_id: impl Into<String>,
        src_lang: impl Into<String>,
    ) -> AddCaptionQueryBuilder {
        let mut builder = AddCaptionQueryBuilder::create_empty();
        builder.video_id = Some(video_id.into());
        builder.src_lang = Some(src_lang.into());
        builder
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn src_lang(&self) -> &str {
        &self.src_lang
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn caption_file(&self) -> Option<&str> {
        self.caption_file.as_deref()
    }

    pub(crate) fn to_body(&self) -> Vec<(&'static str, String)> {
        let mut body = Vec::with_capacity(3);
        if let Some(label) = &self.label {
            body.push(("label", label.clone()));
        }
        if let Some(caption_file) = &self.caption_file {
            body.push(("captionFile", caption_file.clone()));
        }
        body.push(("srclang", self.src_lang.clone()));
        body
    }
}

impl AddCaptionQueryBuilder {
    /// Sets the caption file from its raw contents (for example a WebVTT file), encoding it
    /// as base64.
    pub fn caption_contents(&mut self, contents: impl AsRef<[u8]>) -> &mut Self {
        self.caption_file(BASE64.encode(contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_query_defaults() {
        let query = ListVideoQuery::builder().build().unwrap();
        assert_eq!(query, ListVideoQuery::default());
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), 10);
        assert_eq!(query.sort_by(), "date");
        assert_eq!(query.search(), None);
        assert_eq!(query.collection(), None);
    }

    #[test]
    fn list_query_required_params_come_first() {
        let query = ListVideoQuery::builder()
            .page(3)
            .per_page(20)
            .sort_by("title")
            .build()
            .unwrap();
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "3".to_string()),
                ("perPage", "20".to_string()),
                ("sortBy", "title".to_string()),
            ]
        );
    }

    #[test]
    fn list_query_optional_params_are_appended_in_call_order() {
        let query = ListVideoQuery::builder()
            .search("cats & dogs")
            .collection("c7f9b1ae")
            .build()
            .unwrap();
        let names: Vec<_> = query.to_params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["page", "perPage", "sortBy", "search", "collection"]);

        let query = ListVideoQuery::builder()
            .collection("c7f9b1ae")
            .page(2)
            .search("cats & dogs")
            .search("dogs")
            .build()
            .unwrap();
        assert_eq!(query.search(), Some("dogs"));
        assert_eq!(query.collection(), Some("c7f9b1ae"));
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "2".to_string()),
                ("perPage", "10".to_string()),
                ("sortBy", "date".to_string()),
                ("collection", "c7f9b1ae".to_string()),
                ("search", "dogs".to_string()),
            ]
        );

        let only_collection = ListVideoQuery::builder()
            .collection("c7f9b1ae")
            .build()
            .unwrap();
        let names: Vec<_> = only_collection
            .to_params()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(names, ["page", "perPage", "sortBy", "collection"]);
    }

    #[test]
    fn builder_can_be_finished_more_than_once() {
        let mut builder = ListVideoQuery::builder();
        builder.per_page(50);
        let first = builder.build().unwrap();
        builder.page(2);
        let second = builder.build().unwrap();
        assert_eq!(first.page(), 1);
        assert_eq!(second.page(), 2);
        assert_eq!(second.per_page(), 50);
    }

    #[test]
    fn empty_update_query_still_builds() {
        let query = UpdateVideoQuery::builder("v1").build().unwrap();
        assert_eq!(query.video_id(), "v1");
        assert!(!query.has_changes());
        assert!(query.to_body().is_empty());
    }

    #[test]
    fn update_query_body() {
        let query = UpdateVideoQuery::builder("v1")
            .title("New title")
            .collection("c1")
            .build()
            .unwrap();
        assert!(query.has_changes());
        assert_eq!(
            query.to_body(),
            vec![
                ("collectionId", "c1".to_string()),
                ("title", "New title".to_string()),
            ]
        );
    }

    #[test]
    fn caption_query_body() {
        let query = AddCaptionQuery::builder("v1", "en").build().unwrap();
        assert_eq!(query.to_body(), vec![("srclang", "en".to_string())]);

        let query = AddCaptionQuery::builder("v1", "fr")
            .label("Français")
            .caption_file("V0VCVlRU")
            .build()
            .unwrap();
        assert_eq!(query.label(), Some("Français"));
        assert_eq!(
            query.to_body(),
            vec![
                ("label", "Français".to_string()),
                ("captionFile", "V0VCVlRU".to_string()),
                ("srclang", "fr".to_string()),
            ]
        );
    }

    #[test]
    fn ids_are_preset_by_the_constructors() {
        let mut builder = AddCaptionQuery::builder("v1", "de");
        builder.label("Deutsch");
        let query = builder.clone().build().unwrap();
        assert_eq!(query.video_id(), "v1");
        assert_eq!(query.src_lang(), "de");
        assert_eq!(builder.build().unwrap(), query);

        let update = UpdateVideoQuery::builder("v2").title("t").build().unwrap();
        assert_eq!(update.video_id(), "v2");
    }

    #[test]
    fn caption_contents_are_base64_encoded() {
        let query = AddCaptionQuery::builder("v1", "en")
            .caption_contents("WEBVTT")
            .build()
            .unwrap();
        assert_eq!(query.caption_file(), Some("V0VCVlRU"));
    }
}
