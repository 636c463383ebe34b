//! Outcomes of a conversion run.
//!
//! Every output attempt ends in exactly one [`Outcome`]; the [`Report`]
//! keeps them in the order they happened.

use std::path::PathBuf;

/// Result of one output attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Page text written
    Written { path: PathBuf },

    /// Transcript copied
    Copied { source: PathBuf, target: PathBuf },

    /// Transcript source file does not exist
    SkippedSourceMissing { source: PathBuf },

    /// All referenced elements rendered to nothing
    SkippedEmpty { key: String },

    /// Outline references an unknown element uid
    SkippedMissingElement { key: String, uid: String },
}

impl Outcome {
    pub fn is_skipped(&self) -> bool {
        !matches!(self, Outcome::Written { .. } | Outcome::Copied { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Written { path } => write!(f, "---- writing to {}", path.display()),
            Outcome::Copied { source, target } => write!(
                f,
                "**** copying {} to {}",
                source.display(),
                target.display()
            ),
            Outcome::SkippedSourceMissing { source } => {
                write!(f, "xxxx transcript not found: {}", source.display())
            }
            Outcome::SkippedEmpty { key } => write!(f, ".... no text for {}", key),
            Outcome::SkippedMissingElement { key, uid } => {
                write!(f, "xxxx element not found: {} (in {})", uid, key)
            }
        }
    }
}

/// Summary of a `concat` run
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// HTML rows collected from the outline
    pub total_txt: usize,

    /// Video rows collected from the outline
    pub total_video: usize,

    /// Outcomes in the order they happened
    pub outcomes: Vec<Outcome>,

    /// Print each outcome's marker line as it is recorded
    echo: bool,
}

impl Report {
    /// A report that prints every outcome to stdout as soon as it is pushed
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn push(&mut self, outcome: Outcome) {
        if self.echo {
            println!("{}", outcome);
        }
        self.outcomes.push(outcome);
    }

    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Written { .. }))
            .count()
    }

    pub fn copied(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Copied { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }
}
