//! Engine tests, organized by domain.

mod listing;
