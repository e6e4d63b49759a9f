pub mod job;
pub mod resume;
pub mod template;
pub mod user;

pub use job::{JobDescription, JobMatch};
pub use resume::{
    Education, Experience, OptimizationStatus, ParsedResumeData, PersonalInfo, Resume,
    ResumeAnalysis, SectionScore,
};
pub use template::{ResumeTemplate, TemplateCategory};
pub use user::User;
