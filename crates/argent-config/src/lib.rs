//! Connection-string resolution.
//!
//! One resolution function over an enumerated, ordered list of sources; the
//! first source that yields a non-empty string wins, and there is exactly one
//! failure mode when none do. Callers prepend any explicit override (e.g. a
//! `--db-url` flag) as a [`Source::Literal`].

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable checked after any explicit override.
pub const DB_URL_ENV: &str = "ARGENT_DB_URL";

/// Name of the plain-text fallback file looked up in the working directory.
pub const LOCAL_FALLBACK_FILE: &str = "mongodb.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no connection string found; sources tried: {0}")]
    NoConnectionString(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A place a connection string may come from, in precedence order.
#[derive(Clone, Debug)]
pub enum Source {
    /// A value supplied directly by the caller.
    Literal(String),
    /// An environment variable.
    EnvVar(String),
    /// A plain-text file holding only the connection string.
    File(PathBuf),
}

impl Source {
    fn describe(&self) -> String {
        match self {
            Source::Literal(_) => "command line".to_string(),
            Source::EnvVar(name) => format!("${name}"),
            Source::File(path) => path.display().to_string(),
        }
    }
}

/// The standard source order: explicit override, `ARGENT_DB_URL`,
/// `~/.argent/db_url`, then `./mongodb.txt`.
pub fn default_sources(override_url: Option<String>) -> Vec<Source> {
    let mut sources = Vec::new();
    if let Some(url) = override_url {
        sources.push(Source::Literal(url));
    }
    sources.push(Source::EnvVar(DB_URL_ENV.to_string()));
    if let Some(home) = dirs::home_dir() {
        sources.push(Source::File(home.join(".argent").join("db_url")));
    }
    sources.push(Source::File(PathBuf::from(LOCAL_FALLBACK_FILE)));
    sources
}

/// Resolve the connection string from `sources`, first non-empty hit wins.
///
/// Missing files and unset variables are skipped; an unreadable file is a
/// real error. Values are trimmed, so trailing newlines in files are fine.
pub fn resolve(sources: &[Source]) -> Result<String, ConfigError> {
    for source in sources {
        let value = match source {
            Source::Literal(value) => Some(value.clone()),
            Source::EnvVar(name) => std::env::var(name).ok(),
            Source::File(path) => read_if_present(path)?,
        };
        if let Some(value) = value {
            let value = value.trim();
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
    }

    let tried = sources
        .iter()
        .map(Source::describe)
        .collect::<Vec<_>>()
        .join(", ");
    Err(ConfigError::NoConnectionString(tried))
}

fn read_if_present(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn url_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn literal_wins_over_later_sources() {
        let file = url_file("mongodb://from-file:27017");
        let sources = vec![
            Source::Literal("mongodb://from-flag:27017".to_string()),
            Source::File(file.path().to_path_buf()),
        ];

        assert_eq!(resolve(&sources).unwrap(), "mongodb://from-flag:27017");
    }

    #[test]
    fn falls_through_to_file_source() {
        let file = url_file("mongodb://from-file:27017\n");
        let sources = vec![
            Source::EnvVar("ARGENT_TEST_UNSET_VAR".to_string()),
            Source::File(file.path().to_path_buf()),
        ];

        // Trimmed, so the trailing newline is gone.
        assert_eq!(resolve(&sources).unwrap(), "mongodb://from-file:27017");
    }

    #[test]
    fn env_var_source_resolves() {
        // Uniquely named to avoid clashing with parallel tests.
        let name = "ARGENT_TEST_ENV_VAR_RESOLVES";
        unsafe { std::env::set_var(name, "mongodb://from-env:27017") };

        let sources = vec![Source::EnvVar(name.to_string())];
        assert_eq!(resolve(&sources).unwrap(), "mongodb://from-env:27017");
    }

    #[test]
    fn missing_file_is_skipped_not_fatal() {
        let file = url_file("mongodb://later:27017");
        let sources = vec![
            Source::File(PathBuf::from("/nonexistent/argent/db_url")),
            Source::File(file.path().to_path_buf()),
        ];

        assert_eq!(resolve(&sources).unwrap(), "mongodb://later:27017");
    }

    #[test]
    fn blank_values_do_not_resolve() {
        let file = url_file("   \n");
        let sources = vec![
            Source::Literal(String::new()),
            Source::File(file.path().to_path_buf()),
        ];

        let err = resolve(&sources).unwrap_err();
        assert!(matches!(err, ConfigError::NoConnectionString(_)));
    }

    #[test]
    fn no_source_reports_everything_tried() {
        let sources = vec![
            Source::EnvVar("ARGENT_TEST_UNSET_VAR".to_string()),
            Source::File(PathBuf::from("/nonexistent/argent/db_url")),
        ];

        let err = resolve(&sources).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("$ARGENT_TEST_UNSET_VAR"));
        assert!(message.contains("/nonexistent/argent/db_url"));
    }

    #[test]
    fn default_sources_end_with_local_fallback() {
        let sources = default_sources(Some("mongodb://x".to_string()));
        assert!(matches!(sources.first(), Some(Source::Literal(_))));
        match sources.last() {
            Some(Source::File(path)) => assert!(path.ends_with(LOCAL_FALLBACK_FILE)),
            other => panic!("unexpected last source: {other:?}"),
        }
    }
}
