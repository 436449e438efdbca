//! Version History
//!
//! Each project keeps an append-only version list in one JSON file under the
//! store directory. Versions are small (one HTML document plus metadata), so
//! whole-file rewrite on save is fine.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sitesmith_core::{CoreError, CoreResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub version_id: String,
    pub project_id: String,
    pub html_code: String,
    /// What changed in this version, e.g. "Initial build" or the
    /// refinement instructions.
    pub change_description: String,
    pub tokens_used: u64,
    pub cost_usd: f64,
    pub created_at: DateTime<Utc>,
}

pub struct VersionStore {
    dir: PathBuf,
}

impl VersionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn project_path(&self, project_id: &str) -> PathBuf {
        // Project ids come from user input; keep only filename-safe chars.
        let safe: String = project_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    fn read_all(&self, project_id: &str) -> CoreResult<Vec<Version>> {
        let path = self.project_path(project_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, project_id: &str, versions: &[Version]) -> CoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string_pretty(versions)?;
        fs::write(self.project_path(project_id), raw)?;
        Ok(())
    }

    /// Append a new version and return it.
    pub fn save_version(
        &self,
        project_id: &str,
        html_code: String,
        change_description: String,
        tokens_used: u64,
        cost_usd: f64,
    ) -> CoreResult<Version> {
        let version = Version {
            version_id: Uuid::new_v4().to_string(),
            project_id: project_id.to_string(),
            html_code,
            change_description,
            tokens_used,
            cost_usd,
            created_at: Utc::now(),
        };
        let mut versions = self.read_all(project_id)?;
        versions.push(version.clone());
        self.write_all(project_id, &versions)?;
        Ok(version)
    }

    /// All versions for a project, newest first.
    pub fn list_versions(&self, project_id: &str) -> CoreResult<Vec<Version>> {
        let mut versions = self.read_all(project_id)?;
        versions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(versions)
    }

    pub fn get_version(&self, project_id: &str, version_id: &str) -> CoreResult<Version> {
        self.read_all(project_id)?
            .into_iter()
            .find(|v| v.version_id == version_id)
            .ok_or_else(|| {
                CoreError::not_found(format!("version {} in project {}", version_id, project_id))
            })
    }

    /// Latest version, if the project has any.
    pub fn latest_version(&self, project_id: &str) -> CoreResult<Option<Version>> {
        Ok(self.list_versions(project_id)?.into_iter().next())
    }
}
