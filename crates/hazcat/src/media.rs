// Image media types and submissions

use crate::error::{Result, VerdictError};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image formats accepted by the model endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/gif")]
    Gif,
    #[serde(rename = "image/webp")]
    Webp,
}

impl MediaType {
    pub const ALL: [MediaType; 4] = [
        MediaType::Jpeg,
        MediaType::Png,
        MediaType::Gif,
        MediaType::Webp,
    ];

    /// MIME string for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Gif => "image/gif",
            MediaType::Webp => "image/webp",
        }
    }

    /// Guess a media type from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            "gif" => Some(MediaType::Gif),
            "webp" => Some(MediaType::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = VerdictError;

    /// Exact, case-sensitive match against the four MIME strings.
    fn from_str(s: &str) -> Result<Self> {
        MediaType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| VerdictError::UnsupportedMediaType {
                media_type: s.to_string(),
            })
    }
}

/// A base64-encoded image that has passed input validation
#[derive(Clone, PartialEq, Eq)]
pub struct ImageSubmission {
    content: String,
    media_type: MediaType,
    decoded_len: u64,
}

impl ImageSubmission {
    /// Validate base64 content for the given media type
    pub fn new(content: impl Into<String>, media_type: MediaType) -> Result<Self> {
        let content = content.into();
        let decoded_len = validate::check_size(&content)?;
        Ok(Self {
            content,
            media_type,
            decoded_len,
        })
    }

    /// Validate base64 content along with a raw MIME string
    pub fn parse(content: impl Into<String>, media_type: &str) -> Result<Self> {
        let content = content.into();
        let decoded_len = validate::check_size(&content)?;
        let media_type = validate::check_media_type(media_type)?;
        Ok(Self {
            content,
            media_type,
            decoded_len,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Size of the image once base64 is decoded
    pub fn decoded_len(&self) -> u64 {
        self.decoded_len
    }
}

// Image payloads can be tens of megabytes; keep them out of debug output.
impl fmt::Debug for ImageSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSubmission")
            .field("media_type", &self.media_type)
            .field("decoded_len", &self.decoded_len)
            .finish_non_exhaustive()
    }
}
