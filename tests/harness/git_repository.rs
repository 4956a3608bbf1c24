use std::path::Path;
use std::process::Command;

/// Run `git` in `dir`, asserting success, and return trimmed stdout.
pub(crate) fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git").args(args).current_dir(dir).output().expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub(crate) fn configure_user(repo_dir: &Path) {
    git(repo_dir, &["config", "user.email", "test@example.com"]);
    git(repo_dir, &["config", "user.name", "Test User"]);
}

pub(crate) fn init_bare_repo(path: &Path) {
    std::fs::create_dir_all(path).expect("failed to create bare repo dir");
    git(path, &["init", "--bare", "--initial-branch=main"]);
}

pub(crate) fn clone(remote: &Path, dest: &Path) {
    let parent = dest.parent().expect("clone destination has a parent");
    git(parent, &["clone", "--quiet", &remote.to_string_lossy(), &dest.to_string_lossy()]);
    configure_user(dest);
}

pub(crate) fn commit_all(repo_dir: &Path, message: &str) {
    git(repo_dir, &["add", "-A"]);
    git(repo_dir, &["commit", "--quiet", "-m", message]);
}
