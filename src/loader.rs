//! Template loading for starter.
//! Resolves short template references to clone URLs and checks templates out
//! into the destination directory.
use crate::constants::{DEFAULT_HOST, DEFAULT_OWNER, DEFAULT_SCHEME};
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use url::{ParseError, Url};

/// Turns a template reference into a clone URL.
///
/// * `owner/name` and `name` become `https://github.com/owner/name`, a bare
///   name getting the default owner
/// * `//host/path` gets the default scheme
/// * a full URL is returned unchanged
/// * anything that cannot be parsed as a URL, such as the scp-like
///   `git@host:owner/repo`, is returned unchanged
pub fn resolve_template_url(template: &str) -> String {
    match Url::parse(template) {
        Ok(url) if url.has_host() || url.cannot_be_a_base() => template.to_string(),
        Ok(mut url) => match url.set_host(Some(DEFAULT_HOST)) {
            Ok(()) => url.to_string(),
            Err(_) => template.to_string(),
        },
        Err(ParseError::RelativeUrlWithoutBase) => resolve_relative(template),
        Err(e) => {
            debug!("Using template reference '{template}' as is: {e}");
            template.to_string()
        }
    }
}

fn resolve_relative(template: &str) -> String {
    let resolved = if let Some(authority) = template.strip_prefix("//") {
        format!("{DEFAULT_SCHEME}://{authority}")
    } else {
        let path = template.trim_start_matches('/');
        let first_segment = path.split('/').next().unwrap_or_default();

        // A colon here is the scp-like `host:path` form, which is not a URL.
        if first_segment.contains(':') {
            return template.to_string();
        }

        if path.contains('/') {
            format!("{DEFAULT_SCHEME}://{DEFAULT_HOST}/{path}")
        } else {
            format!("{DEFAULT_SCHEME}://{DEFAULT_HOST}/{DEFAULT_OWNER}/{path}")
        }
    };

    match Url::parse(&resolved) {
        Ok(url) => url.to_string(),
        Err(e) => {
            debug!("Using template reference '{template}' as is: {e}");
            template.to_string()
        }
    }
}

/// Trait for getting a template into its destination directory.
pub trait TemplateLoader {
    /// Returns the directory holding the template.
    fn load(&self) -> Result<PathBuf>;
}

/// Clones a git repository into the destination.
pub struct GitLoader<'a> {
    url: &'a str,
    branch: &'a str,
    destination: &'a Path,
}

impl<'a> GitLoader<'a> {
    pub fn new(url: &'a str, branch: &'a str, destination: &'a Path) -> Self {
        Self { url, branch, destination }
    }
}

impl TemplateLoader for GitLoader<'_> {
    /// Shallow-clones the branch and removes the clone's `.git` directory, so
    /// the destination starts as a plain tree.
    ///
    /// # Errors
    /// * `Error::CheckoutError` if the clone fails
    /// * `Error::IoError` if the `.git` directory cannot be removed
    fn load(&self) -> Result<PathBuf> {
        debug!("Cloning '{}' ({}) into '{}'", self.url, self.branch, self.destination.display());

        let mut attempts = 0;
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            // libgit2 keeps asking as long as credentials are handed out.
            attempts += 1;
            if attempts > 1 {
                return Err(git2::Error::from_str("authentication failed"));
            }

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
            } else {
                git2::Cred::default()
            }
        });

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);
        fetch_opts.depth(1);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);
        builder.branch(self.branch);

        builder
            .clone(self.url, self.destination)
            .map_err(|source| Error::CheckoutError { url: self.url.to_string(), source })?;

        fs::remove_dir_all(self.destination.join(".git"))?;

        Ok(self.destination.to_path_buf())
    }
}

/// Uses a destination that already holds the template.
pub struct LocalLoader<'a> {
    destination: &'a Path,
}

impl<'a> LocalLoader<'a> {
    pub fn new(destination: &'a Path) -> Self {
        Self { destination }
    }
}

impl TemplateLoader for LocalLoader<'_> {
    fn load(&self) -> Result<PathBuf> {
        if !self.destination.is_dir() {
            return Err(Error::TemplateError(format!(
                "destination '{}' does not exist, it can not be used without cloning",
                self.destination.display()
            )));
        }

        Ok(self.destination.to_path_buf())
    }
}

/// Returns the destination directory holding the template, cloning it first
/// unless `skip_clone` is set.
pub fn load_template(
    url: &str,
    branch: &str,
    destination: &Path,
    skip_clone: bool,
) -> Result<PathBuf> {
    let loader: Box<dyn TemplateLoader + '_> = if skip_clone {
        Box::new(LocalLoader::new(destination))
    } else {
        Box::new(GitLoader::new(url, branch, destination))
    };

    loader.load()
}
