//! End-to-end client scenarios
