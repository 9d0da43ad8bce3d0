//! Location-gated quiz backend library, exposing modules for the server
//! binary, the OpenAPI generator and integration tests.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod geo;
pub mod routes;
pub mod services;
pub mod state;
