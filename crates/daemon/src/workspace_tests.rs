use super::*;
use ab_core::RepositoryConfig;
use tempfile::tempdir;

fn repo(workspace_root: PathBuf) -> RepositoryConfig {
    RepositoryConfig {
        id: "repo-1".to_string(),
        name: "Repo One".to_string(),
        path: PathBuf::from("/repo"),
        base_branch: "main".to_string(),
        workspace_root,
        tracker_workspace_id: "ws-1".to_string(),
        routing_labels: Vec::new(),
        project_keys: Vec::new(),
        team_keys: Vec::new(),
        runner_kind: "coding-cli".to_string(),
        model_override: None,
        mcp_config_paths: Vec::new(),
    }
}

#[tokio::test]
async fn creates_sanitized_subdirectory() {
    let root = tempdir().unwrap();
    let repo = repo(root.path().to_path_buf());
    let factory = LocalDirWorkspaceFactory;

    let workspace = factory.create(&repo, "TEAM-123").await.unwrap();

    assert!(workspace.path.ends_with("TEAM-123"));
    assert!(workspace.path.is_dir());
    assert_eq!(workspace.base_branch, "main");
    assert!(!workspace.is_git_worktree);
}

#[tokio::test]
async fn sanitizes_unsafe_characters() {
    let root = tempdir().unwrap();
    let repo = repo(root.path().to_path_buf());
    let factory = LocalDirWorkspaceFactory;

    let workspace = factory.create(&repo, "../etc/passwd").await.unwrap();

    assert!(!workspace.path.to_string_lossy().contains(".."));
    assert!(workspace.path.starts_with(root.path()));
}
