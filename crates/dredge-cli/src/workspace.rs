//! Workspace discovery, storage and the active project pointer.
//!
//! A workspace is any directory holding a `.dredge` directory:
//!
//! ```text
//! .dredge/
//!   config.toml
//!   projects.json
//!   records.json
//!   audit.json
//!   active_project
//! ```

use anyhow::{Context, Result};
use dredge_core::config::{CliConfigOverrides, LayeredConfig};
use dredge_core::models::{Project, ProjectId};
use dredge_core::ports::ProjectStore;
use dredge_store::JsonFileStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::load_workspace_config_with_overrides;
use crate::errors::{no_active_project, workspace_not_found};

pub const DATA_DIR: &str = ".dredge";
const ACTIVE_PROJECT_FILE: &str = "active_project";

/// Find the workspace root by looking for a `.dredge` directory
pub fn find_workspace_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        if root.join(DATA_DIR).is_dir() {
            return Ok(root.to_path_buf());
        }
        return Err(workspace_not_found()
            .with_context(format!("No {} directory in {}", DATA_DIR, root.display()))
            .into());
    }

    let mut current = std::env::current_dir()?;
    loop {
        if current.join(DATA_DIR).is_dir() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(workspace_not_found().into());
        }
    }
}

/// An opened workspace: root, layered configuration and storage
pub struct Workspace {
    root: PathBuf,
    pub config: LayeredConfig,
    pub store: JsonFileStore,
}

impl Workspace {
    pub fn open(explicit: Option<&Path>) -> Result<Self> {
        Self::open_with_overrides(explicit, CliConfigOverrides::default())
    }

    pub fn open_with_overrides(
        explicit: Option<&Path>,
        overrides: CliConfigOverrides,
    ) -> Result<Self> {
        let root = find_workspace_root(explicit)?;
        let config = load_workspace_config_with_overrides(&root, overrides)?;
        let store = JsonFileStore::open(root.join(DATA_DIR))
            .with_context(|| format!("Failed to open data files in {}", root.display()))?;
        debug!(root = %root.display(), "Workspace opened");
        Ok(Self { root, config, store })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn operator(&self) -> &str {
        &self.config.operator.value
    }

    /// Resolve a configured path against the workspace root
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn active_project_id(&self) -> Result<Option<ProjectId>> {
        let path = self.data_dir().join(ACTIVE_PROJECT_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).context("Failed to read active project")?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(raw.parse()?))
    }

    pub fn set_active_project(&self, id: Option<ProjectId>) -> Result<()> {
        let path = self.data_dir().join(ACTIVE_PROJECT_FILE);
        let written = match id {
            Some(id) => fs::write(&path, id.to_string()),
            None if path.exists() => fs::remove_file(&path),
            None => Ok(()),
        };
        written.context("Failed to update active project")
    }

    /// The active project, or an error telling the user how to pick one
    pub fn active_project(&self) -> Result<Project> {
        let id = self.active_project_id()?.ok_or_else(no_active_project)?;
        self.project(id)
    }

    pub fn project(&self, id: ProjectId) -> Result<Project> {
        let project = self
            .store
            .get_project(id)?
            .ok_or_else(|| dredge_core::DredgeError::ProjectNotFound { id: id.to_string() })?;
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dredge_core::models::ProjectDraft;
    use serial_test::serial;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Workspace) {
        let dir = TempDir::new().unwrap();
        JsonFileStore::init(dir.path().join(DATA_DIR)).unwrap();
        let workspace = Workspace::open(Some(dir.path())).unwrap();
        (dir, workspace)
    }

    #[test]
    fn test_explicit_root_without_data_dir() {
        let dir = TempDir::new().unwrap();
        assert!(find_workspace_root(Some(dir.path())).is_err());
    }

    #[test]
    #[serial]
    fn test_active_project_round_trip() {
        let (_dir, workspace) = workspace();
        assert!(workspace.active_project_id().unwrap().is_none());
        assert!(workspace.active_project().is_err());

        let project =
            Project::from_draft(ProjectDraft { name: "Canal".to_string(), ..Default::default() })
                .unwrap();
        workspace.store.insert_project(project.clone()).unwrap();
        workspace.set_active_project(Some(project.id)).unwrap();
        assert_eq!(workspace.active_project().unwrap(), project);

        workspace.set_active_project(None).unwrap();
        assert!(workspace.active_project_id().unwrap().is_none());
    }

    #[test]
    #[serial]
    fn test_resolve_relative_to_root() {
        let (dir, workspace) = workspace();
        assert_eq!(workspace.resolve("exports"), dir.path().join("exports"));
        assert_eq!(workspace.resolve("/tmp/out"), PathBuf::from("/tmp/out"));
    }
}
