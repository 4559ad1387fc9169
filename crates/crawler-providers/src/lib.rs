pub mod github;
mod github_models;
pub mod gitlab;
mod gitlab_models;
mod http;
mod provider_paging;
pub mod registry;
