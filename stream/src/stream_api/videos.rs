//! Stream API video resources.

use crate::stream_api::error::Error;
use crate::stream_api::types::{Fields, narrow};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A `video` resource, as returned by the Stream API.
///
/// This is a read-only view over the decoded response document. Every accessor is total: a
/// field the server did not send (or sent with an unexpected type) reads as the zero value of
/// its type. This matters because the document grows as a video moves through processing; for
/// example `availableResolutions` stays empty until encoding completes.
///
/// The [`Display`](fmt::Display) implementation writes the wrapped document back out as
/// compact JSON, unchanged.
///
/// See: <https://docs.bunny.net/reference/video_getvideo>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Video {
    doc: Value,
}

impl Video {
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    /// The document this video was decoded from.
    pub fn document(&self) -> &Value {
        &self.doc
    }

    pub fn into_document(self) -> Value {
        self.doc
    }

    /// Raw access to any field of the document, including ones without a typed accessor.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.doc.field(key)
    }

    /// The ID of the video library the video belongs to.
    pub fn library_id(&self) -> i64 {
        self.doc.field_i64("videoLibraryId")
    }

    /// The unique ID of the video within its library.
    pub fn guid(&self) -> String {
        self.doc.field_str("guid")
    }

    pub fn title(&self) -> String {
        self.doc.field_str("title")
    }

    /// When the video was uploaded, as the ISO 8601 string the API sent.
    pub fn date_uploaded(&self) -> String {
        self.doc.field_str("dateUploaded")
    }

    pub fn views(&self) -> u64 {
        self.doc.field_u64("views")
    }

    pub fn is_public(&self) -> bool {
        self.doc.field_bool("isPublic")
    }

    /// Duration of the video in seconds.
    pub fn length(&self) -> u64 {
        self.doc.field_u64("length")
    }

    pub fn status(&self) -> String {
        self.doc.field_str("status")
    }

    pub fn frame_rate(&self) -> f64 {
        self.doc.field_f64("framerate")
    }

    pub fn width(&self) -> i32 {
        narrow(self.doc.field_i64("width"))
    }

    pub fn height(&self) -> i32 {
        narrow(self.doc.field_i64("height"))
    }

    /// Comma-separated list of the resolutions encoded so far.
    ///
    /// Empty until encoding has produced at least one rendition.
    pub fn available_resolutions(&self) -> String {
        self.doc.field_str("availableResolutions")
    }

    pub fn thumbnail_count(&self) -> u64 {
        self.doc.field_u64("thumbnailCount")
    }

    /// Encoding progress, in percent.
    pub fn encode_progress(&self) -> i32 {
        narrow(self.doc.field_i64("encodeProgress"))
    }

    /// Storage used by the video and all of its renditions, in bytes.
    pub fn storage_size(&self) -> u64 {
        self.doc.field_u64("storageSize")
    }

    pub fn captions(&self) -> String {
        self.doc.field_str("captions")
    }

    pub fn has_mp4_fallback(&self) -> bool {
        self.doc.field_bool("hasMP4Fallback")
    }

    pub fn collection_id(&self) -> String {
        self.doc.field_str("collectionId")
    }

    pub fn thumbnail_file_name(&self) -> String {
        self.doc.field_str("thumbnailFileName")
    }
}

impl From<Value> for Video {
    fn from(doc: Value) -> Self {
        Self::new(doc)
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}

/// Response structure for the list-videos call.
///
/// Unlike [`Video`], the pagination fields are required: reading one that is missing is an
/// error. The number of videos in [`ListVideoResponse::list`] can be smaller than
/// [`ListVideoResponse::items_per_page`] on the last page.
///
/// See: <https://docs.bunny.net/reference/video_list>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ListVideoResponse {
    doc: Value,
}

impl ListVideoResponse {
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &Value {
        &self.doc
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.doc.field(key)
    }

    /// Total number of videos matching the query, across all pages.
    pub fn total_items(&self) -> Result<u64, Error> {
        self.required_u64("totalItems")
    }

    pub fn current_page(&self) -> Result<u64, Error> {
        self.required_u64("currentPage")
    }

    pub fn items_per_page(&self) -> Result<u64, Error> {
        self.required_u64("itemsPerPage")
    }

    /// Decodes the videos on this page, in the order the server returned them.
    ///
    /// Missing fields inside a video are tolerated as usual, but an entry that is not a JSON
    /// object at all fails the whole list.
    pub fn list(&self) -> Result<Vec<Video>, Error> {
        let items = self
            .raw("items")
            .and_then(Value::as_array)
            .ok_or(Error::MissingField("items"))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                if item.is_object() {
                    Ok(Video::new(item.clone()))
                } else {
                    Err(Error::MalformedItem { index })
                }
            })
            .collect()
    }

    fn required_u64(&self, key: &'static str) -> Result<u64, Error> {
        let value = match self.raw(key) {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        value.ok_or(Error::MissingField(key))
    }
}

impl From<Value> for ListVideoResponse {
    fn from(doc: Value) -> Self {
        Self::new(doc)
    }
}

impl fmt::Display for ListVideoResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn encoded_video() -> Value {
        json!({
            "videoLibraryId": 1234,
            "guid": "8e1b5d3c-0b41-4cf4-a4bd-2d4f8f3f2c10",
            "title": "Best Video",
            "dateUploaded": "2024-03-01T10:20:30",
            "views": 87,
            "isPublic": true,
            "length": 212,
            "status": "finished",
            "framerate": 29.97,
            "width": 1920,
            "height": 1080,
            "availableResolutions": "360p,720p,1080p",
            "thumbnailCount": 54,
            "encodeProgress": 100,
            "storageSize": 318_402_113u64,
            "captions": "",
            "hasMP4Fallback": true,
            "collectionId": "c7f9b1ae",
            "thumbnailFileName": "thumbnail.jpg",
        })
    }

    #[test]
    fn decode_encoded_video() {
        let video = Video::new(encoded_video());
        assert_eq!(video.library_id(), 1234);
        assert_eq!(video.guid(), "8e1b5d3c-0b41-4cf4-a4bd-2d4f8f3f2c10");
        assert_eq!(video.title(), "Best Video");
        assert_eq!(video.date_uploaded(), "2024-03-01T10:20:30");
        assert_eq!(video.views(), 87);
        assert!(video.is_public());
        assert_eq!(video.length(), 212);
        assert_eq!(video.status(), "finished");
        assert_eq!(video.frame_rate(), 29.97);
        assert_eq!((video.width(), video.height()), (1920, 1080));
        assert_eq!(video.available_resolutions(), "360p,720p,1080p");
        assert_eq!(video.thumbnail_count(), 54);
        assert_eq!(video.encode_progress(), 100);
        assert_eq!(video.storage_size(), 318_402_113);
        assert!(video.has_mp4_fallback());
        assert_eq!(video.collection_id(), "c7f9b1ae");
        assert_eq!(video.thumbnail_file_name(), "thumbnail.jpg");
    }

    #[test]
    fn freshly_created_video_reads_as_zero_values() {
        // what the API sends back right after creation, before any upload
        let video = Video::new(json!({
            "guid": "f00",
            "title": "Pending",
        }));
        assert_eq!(video.guid(), "f00");
        assert_eq!(video.width(), 0);
        assert_eq!(video.height(), 0);
        assert!(!video.is_public());
        assert!(!video.has_mp4_fallback());
        assert_eq!(video.frame_rate(), 0.0);
        assert_eq!(video.available_resolutions(), "");
        assert_eq!(video.collection_id(), "");
        assert_eq!(video.storage_size(), 0);
    }

    #[test]
    fn display_reproduces_document() {
        let video = Video::new(encoded_video());
        let reparsed: Value = serde_json::from_str(&video.to_string()).unwrap();
        assert_eq!(reparsed, encoded_video());

        let serialized = serde_json::to_value(&video).unwrap();
        assert_eq!(serialized, encoded_video());
    }

    #[test]
    fn raw_exposes_untyped_fields() {
        let video = Video::new(json!({
            "captions": [{ "srclang": "en", "label": "English" }],
        }));
        // not a string, so the typed accessor gives up
        assert_eq!(video.captions(), "");
        assert_eq!(
            video.raw("captions"),
            Some(&json!([{ "srclang": "en", "label": "English" }]))
        );
    }

    #[test]
    fn list_response_pagination_and_order() {
        let response = ListVideoResponse::new(json!({
            "totalItems": 2,
            "currentPage": 1,
            "itemsPerPage": 10,
            "items": [
                { "guid": "v1", "title": "first" },
                { "guid": "v2", "title": "second" },
            ],
        }));
        assert_eq!(response.total_items().unwrap(), 2);
        assert_eq!(response.current_page().unwrap(), 1);
        assert_eq!(response.items_per_page().unwrap(), 10);

        let videos = response.list().unwrap();
        let guids: Vec<_> = videos.iter().map(Video::guid).collect();
        assert_eq!(guids, ["v1", "v2"]);
    }

    #[test]
    fn list_response_requires_pagination_fields() {
        let response = ListVideoResponse::new(json!({ "items": [] }));
        assert!(matches!(
            response.total_items(),
            Err(Error::MissingField("totalItems"))
        ));
        assert!(matches!(
            response.current_page(),
            Err(Error::MissingField("currentPage"))
        ));
        assert!(matches!(
            response.items_per_page(),
            Err(Error::MissingField("itemsPerPage"))
        ));
        assert!(response.list().unwrap().is_empty());
    }

    #[test]
    fn malformed_entry_fails_the_whole_list() {
        let response = ListVideoResponse::new(json!({
            "totalItems": 3,
            "currentPage": 1,
            "itemsPerPage": 10,
            "items": [{ "guid": "v1" }, "v2", { "guid": "v3" }],
        }));
        assert!(matches!(
            response.list(),
            Err(Error::MalformedItem { index: 1 })
        ));
    }

    #[test]
    fn list_without_items_is_an_error() {
        let response = ListVideoResponse::new(json!({ "totalItems": 0 }));
        assert!(matches!(response.list(), Err(Error::MissingField("items"))));
    }
}
