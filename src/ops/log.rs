use crate::error::{Error, Result};
use crate::object::{all_commit_ids, read_commit};
use crate::refs::{head_commit_id, list_branches};
use crate::repo::Repo;

/// the first-parent chain from HEAD back to the initial commit.
pub fn log(repo: &Repo) -> Result<String> {
    let mut out = String::new();
    let mut current = Some(head_commit_id(repo)?);

    while let Some(id) = current {
        let commit = read_commit(repo, &id)?;
        out.push_str(&commit.log_entry(&id));
        out.push('\n');
        current = commit.parents.first().copied();
    }

    Ok(out)
}

/// every commit reachable from any branch tip, reverse chronological by
/// timestamp with id as a stable tie-break.
pub fn global_log(repo: &Repo) -> Result<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut commits = Vec::new();

    for branch in list_branches(repo)? {
        let tip = crate::refs::branch_tip(repo, &branch)?;
        let mut stack = vec![tip];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let commit = read_commit(repo, &id)?;
            stack.extend(commit.parents.iter().copied());
            commits.push((id, commit));
        }
    }

    commits.sort_by(|(a_id, a), (b_id, b)| b.timestamp.cmp(&a.timestamp).then(b_id.cmp(a_id)));

    let mut out = String::new();
    for (id, commit) in &commits {
        out.push_str(&commit.log_entry(id));
        out.push('\n');
    }
    Ok(out)
}

/// the ids of every commit whose message exactly matches `message`, one per
/// line, oldest-object-order.
pub fn find(repo: &Repo, message: &str) -> Result<String> {
    let mut matches = Vec::new();
    for id in all_commit_ids(repo)? {
        let commit = read_commit(repo, &id)?;
        if commit.message == message {
            matches.push(id.to_hex());
        }
    }

    if matches.is_empty() {
        return Err(Error::NoSuchMessage);
    }
    matches.sort();
    Ok(matches.join("\n") + "\n")
}
