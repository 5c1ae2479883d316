//! Integration tests for Kinoport
//!
//! These tests use wiremock to stand in for the site and its GraphQL
//! endpoint, and exercise the harvest and replay paths end-to-end over HTTP.

mod harvest_tests;
mod replay_tests;
