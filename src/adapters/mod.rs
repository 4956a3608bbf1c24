pub mod git_command;
pub mod process_runner;
pub mod run_lock;
pub mod working_tree_fs;

pub use git_command::GitCommandAdapter;
pub use process_runner::ProcessScriptRunner;
pub use run_lock::{LOCK_FILE, RunLock};
pub use working_tree_fs::FilesystemWorkingTree;
