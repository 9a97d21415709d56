use serde::Serialize;

use crate::model::ids::ModuleId;

/// Difficulty band a module is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Fun,
}

impl Level {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Fun => "Fun Learning",
        }
    }
}

/// One lesson unit on the learning path.
///
/// `page` is the label lesson entries and bookmarks use to refer back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningModule {
    pub id: ModuleId,
    pub title: String,
    pub page: String,
    pub level: Level,
}
