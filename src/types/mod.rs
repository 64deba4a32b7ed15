mod about;
pub mod decode;
mod experience;
mod hero;
mod project;
mod service;
mod testimonial;

pub use about::{AboutMe, AboutMeDraft};
pub use experience::{WorkExperience, WorkExperienceDraft};
pub use hero::{HeroContent, HeroDraft};
pub use project::{Project, ProjectDraft, ProjectStats};
pub use service::{Service, ServiceDraft};
pub use testimonial::{Testimonial, TestimonialDraft};
