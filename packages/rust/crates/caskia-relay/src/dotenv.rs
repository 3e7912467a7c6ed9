//! `.env` loading for the binary. Variables already in the environment win.

use std::path::{Path, PathBuf};

pub(crate) enum DotenvOutcome {
    Loaded(PathBuf),
    Missing,
    Failed(dotenvy::Error),
}

impl DotenvOutcome {
    pub(crate) fn log(&self) {
        match self {
            Self::Loaded(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Self::Missing => {}
            Self::Failed(error) => tracing::warn!(error = %error, "failed to load .env; ignoring"),
        }
    }
}

/// Load `.env` from the working directory or its nearest parent that has one.
pub(crate) fn load_dotenv() -> DotenvOutcome {
    outcome(dotenvy::dotenv())
}

pub(crate) fn load_dotenv_from(path: &Path) -> DotenvOutcome {
    outcome(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn outcome(result: Result<PathBuf, dotenvy::Error>) -> DotenvOutcome {
    match result {
        Ok(path) => DotenvOutcome::Loaded(path),
        Err(error) if error.not_found() => DotenvOutcome::Missing,
        Err(error) => DotenvOutcome::Failed(error),
    }
}
