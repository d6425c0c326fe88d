//! Backend for Eventia, a community-events platform: event creation with
//! cover-image upload to object storage, event listing and detail reads
//! enriched with signed image URLs, and user profiles. Callers authenticate
//! with session tokens minted by the auth frontend.

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod routes;
pub mod state;
pub mod storage;
pub mod utils;
