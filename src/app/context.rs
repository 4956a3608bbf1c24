use crate::ports::{GitPort, ScriptRunner, WorkingTree};

/// Application context holding the collaborators of one job run.
pub struct AppContext<G: GitPort, T: WorkingTree, R: ScriptRunner> {
    git: G,
    tree: T,
    runner: R,
}

impl<G: GitPort, T: WorkingTree, R: ScriptRunner> AppContext<G, T, R> {
    /// Create a new application context.
    pub fn new(git: G, tree: T, runner: R) -> Self {
        Self { git, tree, runner }
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}
