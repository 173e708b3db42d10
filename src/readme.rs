use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use regex::Regex;
use url::Url;

use crate::{FolioError, Result};

/// Host serving unrendered repository files by owner/repo/branch/path.
pub const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com";

/// Branch names tried in order. Repositories default to either one.
pub const README_BRANCHES: [&str; 2] = ["main", "master"];

pub const README_FILE: &str = "README.md";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CLIENT_USER_AGENT: &str =
    concat!("folio/", env!("CARGO_PKG_VERSION"));

lazy_static! {
    static ref GITHUB_REPO: Regex =
        Regex::new(r"github\.com/([^/?#\s]+)/([^/?#\s]+)").unwrap();
}

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRepo {
    pub owner: String,
    pub repo: String,
}

impl GithubRepo {
    /// Extract owner and repository from a `github.com/<owner>/<repo>` URL,
    /// dropping a trailing `.git`.
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || FolioError::InvalidSourceUrl(url.to_owned());
        let captures = GITHUB_REPO.captures(url).ok_or_else(invalid)?;

        let owner = captures[1].to_owned();
        let repo = captures[2]
            .strip_suffix(".git")
            .unwrap_or(&captures[2])
            .to_owned();
        if repo.is_empty() {
            return Err(invalid());
        }

        Ok(Self { owner, repo })
    }
}

impl FromStr for GithubRepo {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for GithubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Fetches README files from the raw-content host.
///
/// Every call goes to the network; nothing is cached. Dropping the returned
/// future cancels the in-flight request.
#[derive(Clone)]
pub struct ReadmeResolver {
    client: reqwest::Client,
    raw_host: Url,
}

impl ReadmeResolver {
    pub fn new(raw_host: Url, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, raw_host })
    }

    /// Resolver for the public GitHub raw-content host.
    pub fn github() -> Result<Self> {
        let host = Url::parse(RAW_CONTENT_HOST)
            .map_err(|e| FolioError::Other(e.into()))?;
        Self::new(host, DEFAULT_TIMEOUT)
    }

    pub fn raw_host(&self) -> &Url {
        &self.raw_host
    }

    /// `<raw-host>/<owner>/<repo>/<branch>/README.md`
    pub fn raw_url(&self, repo: &GithubRepo, branch: &str) -> Result<Url> {
        let mut url = self.raw_host.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FolioError::Other(anyhow::anyhow!(
                    "{} cannot be used as a base URL",
                    self.raw_host
                ))
            })?
            .pop_if_empty()
            .extend([
                repo.owner.as_str(),
                repo.repo.as_str(),
                branch,
                README_FILE,
            ]);
        Ok(url)
    }

    /// README text of the repository behind `github_url`.
    ///
    /// Fails with [`FolioError::InvalidSourceUrl`] before any request when
    /// the URL is not a GitHub repository URL, and with
    /// [`FolioError::ReadmeNotFound`] when no branch has a README.
    pub async fn fetch(&self, github_url: &str) -> Result<String> {
        let repo = GithubRepo::parse(github_url)?;
        self.fetch_repo(&repo).await
    }

    pub async fn fetch_repo(&self, repo: &GithubRepo) -> Result<String> {
        for branch in README_BRANCHES {
            let url = self.raw_url(repo, branch)?;
            match self.fetch_branch(&url).await {
                Ok(Some(readme)) => {
                    log::info!(
                        "README of {} found on branch {}",
                        repo,
                        branch
                    );
                    return Ok(readme);
                }
                Ok(None) => {}
                Err(err) => {
                    log::debug!("Failed to fetch {}: {}", url, err);
                }
            }
        }

        log::warn!("No README found for {}", repo);
        Err(FolioError::ReadmeNotFound {
            owner: repo.owner.clone(),
            repo: repo.repo.clone(),
        })
    }

    /// `Ok(None)` when the host answers with a non-success status.
    async fn fetch_branch(
        &self,
        url: &Url,
    ) -> std::result::Result<Option<String>, reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::debug!("{} answered {}", url, status);
            return Ok(None);
        }
        response.text().await.map(Some)
    }
}
