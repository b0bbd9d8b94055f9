mod client;
mod project;
mod status;

pub use client::{Client, ClientPatch, NewClient};
pub use project::{NewProject, Project, ProjectPatch};
pub use status::ProjectStatus;
