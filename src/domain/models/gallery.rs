use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::errors::ValidationError;

/// Portfolio categories a gallery image can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GalleryCategory {
    #[default]
    DigitalMarketingCampaign,
    BrandDesignProject,
    SocialMediaContent,
    SeoAnalyticsDashboard,
    MobileAppInterface,
    BusinessStrategySession,
    DataAnalytics,
    CreativeDesignProcess,
    TeamCollaboration,
    WebsiteDevelopment,
    ContentCreation,
    EmailMarketing,
}

impl GalleryCategory {
    pub const ALL: [GalleryCategory; 12] = [
        GalleryCategory::DigitalMarketingCampaign,
        GalleryCategory::BrandDesignProject,
        GalleryCategory::SocialMediaContent,
        GalleryCategory::SeoAnalyticsDashboard,
        GalleryCategory::MobileAppInterface,
        GalleryCategory::BusinessStrategySession,
        GalleryCategory::DataAnalytics,
        GalleryCategory::CreativeDesignProcess,
        GalleryCategory::TeamCollaboration,
        GalleryCategory::WebsiteDevelopment,
        GalleryCategory::ContentCreation,
        GalleryCategory::EmailMarketing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GalleryCategory::DigitalMarketingCampaign => "Digital Marketing Campaign",
            GalleryCategory::BrandDesignProject => "Brand Design Project",
            GalleryCategory::SocialMediaContent => "Social Media Content",
            GalleryCategory::SeoAnalyticsDashboard => "SEO Analytics Dashboard",
            GalleryCategory::MobileAppInterface => "Mobile App Interface",
            GalleryCategory::BusinessStrategySession => "Business Strategy Session",
            GalleryCategory::DataAnalytics => "Data Analytics",
            GalleryCategory::CreativeDesignProcess => "Creative Design Process",
            GalleryCategory::TeamCollaboration => "Team Collaboration",
            GalleryCategory::WebsiteDevelopment => "Website Development",
            GalleryCategory::ContentCreation => "Content Creation",
            GalleryCategory::EmailMarketing => "Email Marketing",
        }
    }
}

impl std::fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for GalleryCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GalleryCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidCategory(wanted.to_string()))
    }
}

impl Serialize for GalleryCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for GalleryCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Split a comma-separated tag list, dropping blanks
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_parse() {
        for category in GalleryCategory::ALL {
            assert_eq!(category.label().parse::<GalleryCategory>().unwrap(), category);
        }
        assert_eq!(
            "seo analytics dashboard".parse::<GalleryCategory>().unwrap(),
            GalleryCategory::SeoAnalyticsDashboard
        );
        assert!("Cat Pictures".parse::<GalleryCategory>().is_err());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" seo, ,branding ,"), vec!["seo", "branding"]);
        assert!(parse_tags("").is_empty());
    }
}
