mod git;
mod script_runner;
mod working_tree;

pub use git::GitPort;
pub use script_runner::ScriptRunner;
pub use working_tree::WorkingTree;
