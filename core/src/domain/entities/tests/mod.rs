//! Unit tests for domain entities

mod inbox_message_tests;
