pub mod ai_visit;
pub mod project;

pub use ai_visit::Entity as AiVisitEntity;
pub use project::Entity as ProjectEntity;
