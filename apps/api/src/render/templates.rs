//! On-disk store of static LaTeX boilerplate fragments.

use std::path::{Path, PathBuf};

use crate::errors::AppError;

// Fragment names the composers depend on. The directory layout is a fixed
// deployment contract: a missing fragment means the service is
// misconfigured, not that the request was malformed.
pub const RESUME_HEAD: &str = "resume_head.tex";
pub const RESUME_OBJECTIVE: &str = "resume_objective.tex";
pub const RESUME_EDUCATION: &str = "resume_education.tex";
pub const RESUME_SKILLS: &str = "resume_skills.tex";
pub const RESUME_PROJECTS: &str = "resume_projects.tex";
pub const RESUME_WORK: &str = "resume_work.tex";
pub const COVER_LETTER_HEAD: &str = "coverletter_head.tex";

/// Read-only store of LaTeX boilerplate fragments rooted at a fixed
/// directory. Fragments are read fresh on every call; the underlying files
/// never change during the process lifetime, so the store is shared freely
/// across concurrent requests without synchronization.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads a fragment by file name.
    pub fn load(&self, name: &str) -> Result<String, AppError> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|_| AppError::TemplateMissing(name.to_string()))
    }

    /// Lists every `.tex` fragment in the store, for copying into a compile
    /// working directory.
    pub fn fragment_paths(&self) -> Result<Vec<PathBuf>, AppError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            AppError::io(
                format!("Failed to read template directory {}", self.root.display()),
                e,
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| AppError::io("Failed to read template directory entry", e))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "tex") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}
