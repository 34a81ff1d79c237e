pub mod auth;
pub mod health;
pub mod metrics;
pub mod plan;
pub mod profile;
pub mod questionnaire;
