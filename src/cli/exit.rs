/// Run outcome determining exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every file loaded (exit 0).
    AllLoaded,
    /// Some files failed and were skipped (exit 1).
    Partial,
    /// Nothing could be loaded, or a CLI error (exit 2).
    Refusal,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::AllLoaded => 0,
            Outcome::Partial => 1,
            Outcome::Refusal => 2,
        }
    }

    /// Outcome for a run with `failed` failures out of `total` files.
    pub fn from_counts(total: usize, failed: usize) -> Self {
        if total == 0 || failed == total {
            Outcome::Refusal
        } else if failed > 0 {
            Outcome::Partial
        } else {
            Outcome::AllLoaded
        }
    }
}
