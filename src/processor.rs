//! Placeholder replacement over a checked-out template tree.
//! Every path below the root has its name, and for regular files its content,
//! passed through a [`Dictionary`]. Running the same walk with a reversed
//! dictionary turns values back into placeholders.

use crate::constants::{CONFIG_FILE, SKIP_LIST};
use crate::dictionary::{Dictionary, Markers};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::vars::Vars;
use log::{debug, info, warn};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a walk changed.
#[derive(Debug, Default)]
pub struct Report {
    /// Files whose content was rewritten, under their final name
    pub updated: Vec<PathBuf>,
    /// Performed renames, ancestors before descendants
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Renames that failed; the walk carried on without them
    pub rename_failures: Vec<Error>,
}

impl Report {
    pub fn is_unchanged(&self) -> bool {
        self.updated.is_empty() && self.renamed.is_empty()
    }
}

pub struct Processor<'a> {
    dictionary: &'a Dictionary,
    skip_list: &'a [&'a str],
}

impl<'a> Processor<'a> {
    pub fn new(dictionary: &'a Dictionary, skip_list: &'a [&'a str]) -> Self {
        Self { dictionary, skip_list }
    }

    /// Walks `root` depth-first. The root itself is never renamed.
    ///
    /// # Errors
    /// * `Error::ContentError` if a directory cannot be listed or a file cannot
    ///   be read or written; the walk stops there
    ///
    /// Rename failures do not end the walk, they are collected in the report.
    pub fn process<P: AsRef<Path>>(&self, root: P) -> Result<Report> {
        let mut report = Report::default();
        self.process_into(root, &mut report)?;
        Ok(report)
    }

    /// Same walk as [`Processor::process`], recording into a caller-owned
    /// report. What was done before a fatal error stays in `report`.
    pub fn process_into<P: AsRef<Path>>(&self, root: P, report: &mut Report) -> Result<()> {
        let root = root.as_ref();

        debug!("Processing '{}'", root.display());
        self.visit_children(root, root, report)
    }

    fn visit_children(&self, root: &Path, dir: &Path, report: &mut Report) -> Result<()> {
        // Listed up front: entries of `dir` get renamed while we go.
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::ContentError {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: e.into(),
            })?;

        for entry in entries {
            self.visit(root, entry.path(), entry.file_type(), report)?;
        }

        Ok(())
    }

    fn visit(
        &self,
        root: &Path,
        path: &Path,
        file_type: fs::FileType,
        report: &mut Report,
    ) -> Result<()> {
        let relative = relative_path(root, path);
        if self.is_skipped(&relative, file_type.is_dir()) {
            debug!("Skipping '{relative}'");
            return Ok(());
        }

        let mut current = path.to_path_buf();

        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            if let Cow::Owned(renamed) = self.dictionary.apply_str(name) {
                if renamed != name {
                    let target = path.with_file_name(renamed);
                    match rename_path(path, &target) {
                        Ok(()) => {
                            info!("Renaming '{}' to '{}'", path.display(), target.display());
                            report.renamed.push((path.to_path_buf(), target.clone()));
                            current = target;
                        }
                        Err(e) => {
                            warn!("{e}");
                            report.rename_failures.push(e);
                        }
                    }
                }
            }
        }

        if file_type.is_dir() {
            self.visit_children(root, &current, report)?;
        } else if file_type.is_file() && self.update_content(&current)? {
            info!("Updating '{}'", current.display());
            report.updated.push(current);
        }

        Ok(())
    }

    fn is_skipped(&self, relative: &str, is_dir: bool) -> bool {
        self.skip_list.iter().any(|skip| {
            relative.starts_with(*skip) || (is_dir && format!("{relative}/").starts_with(*skip))
        })
    }

    /// Rewrites the file if any token occurs in it. Returns whether it was written.
    fn update_content(&self, path: &Path) -> Result<bool> {
        let content = fs::read(path)
            .map_err(|source| Error::ContentError { path: path.to_path_buf(), source })?;

        let updated = match self.dictionary.apply_bytes(&content) {
            Cow::Owned(updated) if updated != content => updated,
            _ => return Ok(false),
        };

        fs::write(path, updated)
            .map_err(|source| Error::ContentError { path: path.to_path_buf(), source })?;

        Ok(true)
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn rename_path(from: &Path, to: &Path) -> Result<()> {
    let failure = |source: std::io::Error| Error::RenameError {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if fs::symlink_metadata(to).is_ok() {
        return Err(failure(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "target already exists",
        )));
    }

    fs::rename(from, to).map_err(failure)
}

/// Replaces placeholders with values (or values with placeholders when
/// `markers.reverse` is set) in the template checked out at `root`.
///
/// # Errors
/// * `Error::ConfigNotFoundError` if `root` holds no template configuration;
///   nothing is modified in that case
/// * Any fatal error from [`Processor::process`]
pub fn replace<P: AsRef<Path>>(root: P, vars: &Vars, markers: &Markers) -> Result<Report> {
    let mut report = Report::default();
    replace_into(root, vars, markers, &mut report)?;
    Ok(report)
}

/// [`replace`] recording into a caller-owned report, so renames, updates and
/// rename failures are still known when the walk stops on a fatal error.
pub fn replace_into<P: AsRef<Path>>(
    root: P,
    vars: &Vars,
    markers: &Markers,
    report: &mut Report,
) -> Result<()> {
    let root = root.as_ref();

    // Refuse to touch a directory that is not a template.
    if !root.join(CONFIG_FILE).is_file() {
        return Err(Error::ConfigNotFoundError {
            config_file: CONFIG_FILE.to_string(),
            dir: root.display().to_string(),
        });
    }

    let dictionary = Dictionary::new(vars, markers)?;
    if dictionary.is_empty() {
        warn!("No variables provided, nothing to replace");
    }

    Processor::new(&dictionary, &SKIP_LIST).process_into(root, report)
}

/// Tells the operator what a walk did: one line per rename and update, then
/// the rename failures as error notices.
pub fn print_report(prompt: &mut dyn Prompter, report: &Report) {
    for (from, to) in &report.renamed {
        prompt.print(&format!("Renaming '{}' to '{}'", from.display(), to.display()));
    }
    for path in &report.updated {
        prompt.print(&format!("Updating '{}'", path.display()));
    }
    for failure in &report.rename_failures {
        prompt.error(&failure.to_string());
    }
}
