/// Whether capturing is compulsory when a capture is available.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum CaptureRule {
    /// Simple plies are discarded whenever a capture exists.
    #[default]
    Mandatory,
    /// Simple plies and capture plies are both legal.
    Optional,
}

/// Whether only the longest capture chains are legal.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum BestRule {
    /// Only capture chains of maximal length are legal.
    #[default]
    Required,
    /// Capture chains of any length are legal.
    NotRequired,
}

/// The configured draughts rule variant.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Rules {
    pub capture: CaptureRule,
    pub best: BestRule,
}
