//! Unit tests for the verification code resolver
