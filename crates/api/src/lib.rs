//! `lavka-api` — HTTP surface over the storefront services.
//!
//! Two route families: `/api/public/*` for anonymous customers and `/api/*`
//! for shop owners behind bearer-token auth. Owner identity is decoded once
//! in middleware and flows as a request extension, never as ambient state.

pub mod app;
pub mod context;
pub mod jwt;
pub mod middleware;
