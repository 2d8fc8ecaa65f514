use crate::domain::{
    errors::ValidationError,
    models::{GalleryCategory, Resource},
    value_objects::ResourceStatus,
};

/// Number of entries reported in [`GalleryStats::recent`]
pub const RECENT_ENTRIES: usize = 5;

/// An operation applied to many gallery entries at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Status(ResourceStatus),
    Category(GalleryCategory),
    Delete,
}

impl BulkAction {
    /// Build an action from its name and optional argument, e.g. `("status", Some("inactive"))`
    pub fn parse(action: &str, value: Option<&str>) -> Result<Self, ValidationError> {
        match action.trim() {
            "status" => {
                let status = value.ok_or(ValidationError::MissingField("Status"))?;
                Ok(BulkAction::Status(status.parse()?))
            }
            "category" => {
                let category = value.ok_or(ValidationError::MissingField("Category"))?;
                Ok(BulkAction::Category(category.parse()?))
            }
            "delete" => Ok(BulkAction::Delete),
            other => Err(ValidationError::InvalidBulkAction(other.to_string())),
        }
    }
}

/// Summary of the gallery for the admin dashboard
#[derive(Debug, Clone)]
pub struct GalleryStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Entry count per category, largest first
    pub categories: Vec<(GalleryCategory, usize)>,
    pub recent: Vec<Resource>,
}

impl GalleryStats {
    pub fn from_resources(resources: &[Resource]) -> Self {
        let active = resources.iter().filter(|r| r.is_active()).count();

        let mut categories: Vec<(GalleryCategory, usize)> = Vec::new();
        for category in resources.iter().filter_map(|r| r.details.category()) {
            match categories.iter_mut().find(|(c, _)| *c == category) {
                Some((_, count)) => *count += 1,
                None => categories.push((category, 1)),
            }
        }
        // stable sort keeps first-seen order among equal counts
        categories.sort_by(|a, b| b.1.cmp(&a.1));

        let mut recent = resources.to_vec();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_ENTRIES);

        Self {
            total: resources.len(),
            active,
            inactive: resources.len() - active,
            categories,
            recent,
        }
    }
}
