use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// JSON array of records with an `id`.
    Collection,
    /// Single JSON document, overwritten wholesale.
    Singleton,
}

/// Persisted content categories. Each maps to exactly one JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Services,
    Workshops,
    BestPractices,
    Resources,
    MailConfig,
    LandingPage,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Services,
        Category::Workshops,
        Category::BestPractices,
        Category::Resources,
        Category::MailConfig,
        Category::LandingPage,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Services => "services",
            Category::Workshops => "workshops",
            Category::BestPractices => "best-practices",
            Category::Resources => "resources",
            Category::MailConfig => "mail-config",
            Category::LandingPage => "landing-page",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.slug())
    }

    pub fn kind(self) -> CategoryKind {
        match self {
            Category::MailConfig | Category::LandingPage => CategoryKind::Singleton,
            _ => CategoryKind::Collection,
        }
    }

    /// Mail config carries SMTP credentials and is never part of public reads.
    pub fn is_public(self) -> bool {
        !matches!(self, Category::MailConfig)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // camelCase aliases are what the old admin UI used as storage keys
        match s {
            "services" => Ok(Category::Services),
            "workshops" => Ok(Category::Workshops),
            "best-practices" | "bestPractices" => Ok(Category::BestPractices),
            "resources" => Ok(Category::Resources),
            "mail-config" | "mailConfig" => Ok(Category::MailConfig),
            "landing-page" | "landingPage" => Ok(Category::LandingPage),
            other => Err(ModelError::UnknownCategory(other.to_string())),
        }
    }
}
