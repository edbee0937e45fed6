use serde::{Deserialize, Serialize};

/// Outcome of the HEAD probe against the target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityStatus {
    pub https_enforced: bool,
    pub status_code: Option<u16>,
    pub is_secure: bool,
}

impl SecurityStatus {
    /// Status for a target whose probe never got a response.
    pub fn unreachable(https_enforced: bool) -> Self {
        Self {
            https_enforced,
            status_code: None,
            is_secure: false,
        }
    }

    pub fn from_response(https_enforced: bool, status_code: u16) -> Self {
        Self {
            https_enforced,
            status_code: Some(status_code),
            is_secure: status_code == 200 && https_enforced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAltIssue {
    pub src: String,
    /// Position among every `<img>` on the page, not just flagged ones
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub word: String,
    pub count: usize,
}

/// Structural SEO signals pulled out of one HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub h1_tags: Vec<String>,
    pub images_without_alt: Vec<ImageAltIssue>,
    pub has_viewport_meta: bool,
    pub has_canonical: bool,
    pub body_text: String,
}

impl PageSignals {
    pub fn title_length(&self) -> usize {
        self.title.chars().count()
    }

    pub fn meta_description_length(&self) -> usize {
        self.meta_description.chars().count()
    }

    pub fn h1_count(&self) -> usize {
        self.h1_tags.len()
    }
}
