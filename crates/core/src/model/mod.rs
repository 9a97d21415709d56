mod bookmark;
mod ids;
mod lesson;
mod module;

pub use bookmark::Bookmark;
pub use ids::{BookmarkId, IdError, ModuleId, SessionId};
pub use lesson::LessonEntry;
pub use module::{Level, LearningModule};
