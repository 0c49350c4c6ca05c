//! GitHub link helpers
//!
//! Builds browsable repository and commit URLs from whatever form of
//! repository reference the user typed.

use crate::model::ProgressSnapshot;
use regex::Regex;
use std::sync::LazyLock;

static GITHUB_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[/:]([^/\s]+)/([^/\s]+)").expect("valid github url regex")
});

static SHORT_SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^/\s:]+)/([^/\s]+)$").expect("valid slug regex"));

/// Extract `(owner, repo)` from a GitHub URL or an `owner/repo` slug
pub fn parse_repo_slug(input: &str) -> Option<(String, String)> {
    let input = input.trim();
    let caps = GITHUB_URL_REGEX
        .captures(input)
        .or_else(|| SHORT_SLUG_REGEX.captures(input))?;

    let owner = caps.get(1)?.as_str().to_string();
    let repo = caps
        .get(2)?
        .as_str()
        .trim_end_matches('/')
        .trim_end_matches(".git")
        .to_string();

    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some((owner, repo))
}

/// Browsable repository URL for links.
///
/// Links follow the snapshot on screen: its `repo_url`, then its owner and
/// name. The submitted URL is used only while no snapshot exists.
pub fn repo_web_url(submitted: Option<&str>, snapshot: Option<&ProgressSnapshot>) -> Option<String> {
    let slug = match snapshot {
        Some(snapshot) => parse_repo_slug(&snapshot.repo_url).or_else(|| {
            (!snapshot.owner.is_empty() && !snapshot.repo_name.is_empty())
                .then(|| (snapshot.owner.clone(), snapshot.repo_name.clone()))
        }),
        None => submitted.and_then(parse_repo_slug),
    };
    let (owner, repo) = slug?;
    Some(format!("https://github.com/{}/{}", owner, repo))
}

/// `{repo_url}/commit/{sha}`
pub fn commit_link(repo_url: &str, sha: &str) -> String {
    format!("{}/commit/{}", repo_url.trim_end_matches('/'), sha)
}
