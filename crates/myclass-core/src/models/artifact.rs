use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of an uploaded file. Determines upload routing and the
/// `type` field of the persisted reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// PDF courseware document. String form is "pdf".
    #[serde(rename = "pdf")]
    Document,
    #[serde(rename = "video")]
    Video,
}

impl ArtifactKind {
    /// String form used in upload identifiers and persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Document => "pdf",
            ArtifactKind::Video => "video",
        }
    }

    /// Upload order within one publish: documents first, then videos.
    pub const ORDERED: [ArtifactKind; 2] = [ArtifactKind::Document, ArtifactKind::Video];
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ArtifactKind::Document),
            "video" => Ok(ArtifactKind::Video),
            other => Err(format!("unknown artifact kind: {}", other)),
        }
    }
}
