//! Unit tests for the mailbox session
