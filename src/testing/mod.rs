pub mod fake_git;
pub mod fake_runner;
pub mod memory_tree;

pub use fake_git::FakeGit;
pub use fake_runner::ScriptedRunner;
pub use memory_tree::MemoryTree;
