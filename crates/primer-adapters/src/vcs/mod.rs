//! Repository adapters.
//!
//! `GitRepository` keeps history intact through libgit2. `DirectoryTree`
//! covers a template copied without its `.git` directory.

mod directory;
mod git;
mod memory;

pub use directory::DirectoryTree;
pub use git::GitRepository;
pub use memory::MemoryRepository;
