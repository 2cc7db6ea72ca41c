//! Core library exports for the Chronicle blog service.
//!
//! This crate exposes domain types, models, repositories, forms, routes and
//! service layers used by the Chronicle web application. The `data` feature
//! builds only the persistence/domain layer; the default `server` feature
//! adds the Actix-web application on top.

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
