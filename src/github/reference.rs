// src/github/reference.rs
// =============================================================================
// This module turns what the user typed into a repository reference.
//
// Strategy:
// - The URL must be https and point at the configured host (github.com)
// - The last two path segments are the owner and the repository name
// - A trailing slash or ".git" suffix is tolerated
//
// Nothing here touches the network: a rejected URL never causes a request.
//
// Rust concepts:
// - url::Url: a parsed URL, so we never slice strings by hand
// - Result: the caller decides how to show an invalid URL
// =============================================================================

use url::Url;

use super::GithubError;

/// The repository currently being browsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReference {
    pub owner: String,
    pub name: String,
}

impl RepositoryReference {
    /// Builds `<api_root>/repos/{owner}/{name}/contents/{path}`
    ///
    /// Each path segment is pushed separately so names containing spaces or
    /// `#` are percent-encoded instead of breaking the URL.
    pub fn contents_url(&self, api_root: &Url, path: &str) -> Result<Url, GithubError> {
        let mut url = api_root.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| GithubError::InvalidUrl(api_root.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.name.as_str(), "contents"]);
            segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        Ok(url)
    }
}

impl std::fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The form of the input we persist: surrounding whitespace removed
pub fn normalize_input(input: &str) -> String {
    input.trim().to_string()
}

/// Parses a repository URL such as `https://github.com/octocat/hello-world`
///
/// Parameters:
///   input: the raw text from the input field
///   host:  the only host accepted (normally "github.com")
///
/// Returns the owner/name pair taken from the last two path segments.
pub fn resolve_reference(input: &str, host: &str) -> Result<RepositoryReference, GithubError> {
    let input = normalize_input(input);
    let invalid = || GithubError::InvalidUrl(input.clone());

    // Checked on the raw text: Url would lowercase the host and accept a
    // port or user info in front of it
    if !input.starts_with(&format!("https://{}/", host)) {
        return Err(invalid());
    }

    let url = Url::parse(&input).map_err(|_| invalid())?;

    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 2 {
        return Err(invalid());
    }

    let owner = segments[segments.len() - 2].to_string();
    let name = segments[segments.len() - 1];
    let name = name.strip_suffix(".git").unwrap_or(name).to_string();

    if name.is_empty() {
        return Err(invalid());
    }

    Ok(RepositoryReference { owner, name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reference() {
        let reference =
            resolve_reference("https://github.com/rust-lang/rust", "github.com").unwrap();
        assert_eq!(reference.owner, "rust-lang");
        assert_eq!(reference.name, "rust");
    }

    #[test]
    fn test_resolve_reference_with_git_suffix_and_slash() {
        let reference = resolve_reference("  https://github.com/user/repo.git/ ", "github.com")
            .unwrap();
        assert_eq!(reference.owner, "user");
        assert_eq!(reference.name, "repo");
    }

    #[test]
    fn test_resolve_reference_uses_last_two_segments() {
        let reference =
            resolve_reference("https://github.com/octocat/hello-world/tree/main", "github.com")
                .unwrap();
        assert_eq!(reference.owner, "tree");
        assert_eq!(reference.name, "main");
    }

    #[test]
    fn test_rejects_other_hosts_and_schemes() {
        assert!(resolve_reference("https://gitlab.com/user/repo", "github.com").is_err());
        assert!(resolve_reference("http://github.com/user/repo", "github.com").is_err());
        assert!(resolve_reference("github.com/user/repo", "github.com").is_err());
        assert!(resolve_reference("", "github.com").is_err());
    }

    #[test]
    fn test_rejects_port_user_info_and_uppercase_host() {
        assert!(resolve_reference("https://github.com:443/user/repo", "github.com").is_err());
        assert!(resolve_reference("https://user@github.com/user/repo", "github.com").is_err());
        assert!(resolve_reference("https://GitHub.com/user/repo", "github.com").is_err());
        assert!(resolve_reference("https://github.com.evil.io/user/repo", "github.com").is_err());
    }

    #[test]
    fn test_rejects_missing_repository_name() {
        let result = resolve_reference("https://github.com/octocat", "github.com");
        assert!(matches!(result, Err(GithubError::InvalidUrl(_))));
    }

    #[test]
    fn test_contents_url() {
        let api_root = Url::parse("https://api.github.com").unwrap();
        let reference = RepositoryReference {
            owner: "octocat".to_string(),
            name: "hello-world".to_string(),
        };

        let root = reference.contents_url(&api_root, "").unwrap();
        assert_eq!(
            root.as_str(),
            "https://api.github.com/repos/octocat/hello-world/contents"
        );

        let nested = reference.contents_url(&api_root, "src/my dir").unwrap();
        assert_eq!(
            nested.as_str(),
            "https://api.github.com/repos/octocat/hello-world/contents/src/my%20dir"
        );
    }
}
