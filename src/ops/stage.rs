use crate::error::{Error, Result};
use crate::repo::Repo;
use crate::staging::StagingArea;

/// stage `name` for the next commit.
pub fn add(repo: &Repo, name: &str) -> Result<()> {
    let path = repo.resolve_working_path(name);
    if !path.is_file() {
        return Err(Error::FileMissing);
    }

    let mut staging = StagingArea::load(repo)?;
    let changed = staging.add(repo, &path)?;
    if changed {
        staging.save(repo)?;
    }
    Ok(())
}

/// unstage or stage-for-removal `name`.
pub fn rm(repo: &Repo, name: &str) -> Result<()> {
    let path = repo.resolve_working_path(name);

    let mut staging = StagingArea::load(repo)?;
    let changed = staging.remove(&path)?;
    if !changed {
        return Err(Error::NothingToRemove);
    }
    staging.save(repo)
}
