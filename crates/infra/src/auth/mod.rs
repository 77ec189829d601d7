//! Identity broker adapters

pub mod keycloak;

pub use keycloak::KeycloakTokenManager;
