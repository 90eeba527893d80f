use crate::domain::ChangeSet;
use crate::error::{ReleaseError, Result};
use git2::{DiffOptions, Oid, Repository as Git2Repo};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
    workdir: Option<PathBuf>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let workdir = repo
            .workdir()
            .map(|dir| dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf()));
        Git2Repository {
            repo: Mutex::new(repo),
            workdir,
        }
    }

    /// Tag names by the commit they peel to (lightweight and annotated)
    fn tags_by_commit(repo: &Git2Repo) -> Result<HashMap<Oid, Vec<String>>> {
        let mut tags: HashMap<Oid, Vec<String>> = HashMap::new();

        for tag_name in repo.tag_names(None)?.iter().flatten() {
            let reference = match repo.find_reference(&format!("refs/tags/{}", tag_name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };
            if let Ok(commit) = reference.peel_to_commit() {
                tags.entry(commit.id())
                    .or_default()
                    .push(tag_name.to_string());
            }
        }

        for names in tags.values_mut() {
            names.sort();
        }
        Ok(tags)
    }

    /// Path of `working_dir` relative to the repository root; `None` means
    /// the whole repository
    fn pathspec(&self, working_dir: &Path) -> Option<PathBuf> {
        let workdir = self.workdir.as_ref()?;
        let absolute = working_dir
            .canonicalize()
            .unwrap_or_else(|_| working_dir.to_path_buf());
        let relative = absolute.strip_prefix(workdir).ok()?;
        if relative.as_os_str().is_empty() {
            None
        } else {
            Some(relative.to_path_buf())
        }
    }

    fn touches(repo: &Git2Repo, commit: &git2::Commit<'_>, pathspec: &Path) -> Result<bool> {
        let tree = commit.tree()?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let mut options = DiffOptions::new();
        options.pathspec(pathspec);
        let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut options))?;
        Ok(diff.deltas().len() > 0)
    }
}

impl super::ChangeLogProvider for Git2Repository {
    fn change_log(&self, working_dir: &Path, limit: usize) -> Result<Vec<ChangeSet>> {
        let repo = self
            .repo
            .lock()
            .map_err(|_| ReleaseError::scm("Repository handle is poisoned"))?;

        let head = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| ReleaseError::scm_caused_by("Cannot resolve HEAD", e))?;

        let tags = Self::tags_by_commit(&repo)?;
        let pathspec = self.pathspec(working_dir);

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push(head.id())?;

        let mut changes = Vec::new();
        for oid_result in revwalk {
            if changes.len() >= limit {
                break;
            }
            let oid = oid_result?;
            let commit = repo.find_commit(oid)?;

            if let Some(pathspec) = &pathspec {
                if !Self::touches(&repo, &commit, pathspec)? {
                    continue;
                }
            }

            changes.push(ChangeSet {
                message: commit.message().unwrap_or("(empty message)").to_string(),
                tags: tags.get(&oid).cloned().unwrap_or_default(),
            });
        }

        Ok(changes)
    }
}
