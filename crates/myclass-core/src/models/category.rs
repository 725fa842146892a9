use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of content categories. Persisted as the display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Desktop Development")]
    DesktopDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "Cloud Computing")]
    CloudComputing,
    #[serde(rename = "Networking")]
    Networking,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::WebDevelopment,
        Category::DesktopDevelopment,
        Category::MobileDevelopment,
        Category::CloudComputing,
        Category::Networking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WebDevelopment => "Web Development",
            Category::DesktopDevelopment => "Desktop Development",
            Category::MobileDevelopment => "Mobile Development",
            Category::CloudComputing => "Cloud Computing",
            Category::Networking => "Networking",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}
