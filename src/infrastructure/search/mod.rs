//! Web-search service plumbing.

mod parallel;

pub use parallel::ParallelSearchProvider;
