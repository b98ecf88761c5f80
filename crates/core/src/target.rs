//! Summary targets and the token budgets derived from them.

use std::fmt;
use std::str::FromStr;

/// Tokens generated per target character. Korean runs at roughly 1.5 tokens
/// per character; 2.0 leaves room for the postprocessor to cut back.
pub const TOKENS_PER_CHAR: usize = 2;

/// Fixed generation budget for line-count targets.
pub const LINE_MODE_MAX_TOKENS: usize = 420;

/// Desired shape of one summary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SummaryTarget {
    /// At most `n` characters, whole sentences only.
    ByChars(usize),
    /// At most `n` sentences, one per line.
    ByLines(usize),
}

impl SummaryTarget {
    /// Response key for this target, e.g. `chars100` or `lines3`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Generation budget for this target.
    pub fn token_budget(&self) -> TokenBudget {
        let max_tokens = match *self {
            SummaryTarget::ByChars(n) => n * TOKENS_PER_CHAR,
            SummaryTarget::ByLines(_) => LINE_MODE_MAX_TOKENS,
        };
        TokenBudget::with_max(max_tokens)
    }
}

impl fmt::Display for SummaryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryTarget::ByChars(n) => write!(f, "chars{}", n),
            SummaryTarget::ByLines(n) => write!(f, "lines{}", n),
        }
    }
}

impl FromStr for SummaryTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |digits: &str| digits.parse::<usize>().map_err(|_| format!("Invalid target: {}", s));
        if let Some(n) = s.strip_prefix("chars") {
            parse(n).map(SummaryTarget::ByChars)
        } else if let Some(n) = s.strip_prefix("lines") {
            parse(n).map(SummaryTarget::ByLines)
        } else {
            Err(format!("Invalid target: {}. Expected charsN or linesN", s))
        }
    }
}

/// Length constraint handed to the generative capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenBudget {
    pub max_tokens: usize,
    /// Floor at half the maximum, biasing toward complete generations.
    pub min_tokens: usize,
}

impl TokenBudget {
    pub fn with_max(max_tokens: usize) -> Self {
        Self { max_tokens, min_tokens: max_tokens / 2 }
    }
}

/// The preset target groups a request can ask for. Modes never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetSet {
    /// 100, 200 and 300 characters.
    #[default]
    Chars,
    /// 3, 5 and 8 lines.
    Lines,
}

impl TargetSet {
    pub fn targets(&self) -> [SummaryTarget; 3] {
        match self {
            TargetSet::Chars => [
                SummaryTarget::ByChars(100),
                SummaryTarget::ByChars(200),
                SummaryTarget::ByChars(300),
            ],
            TargetSet::Lines => [
                SummaryTarget::ByLines(3),
                SummaryTarget::ByLines(5),
                SummaryTarget::ByLines(8),
            ],
        }
    }
}

impl FromStr for TargetSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chars" | "char" | "characters" => Ok(Self::Chars),
            "lines" | "line" => Ok(Self::Lines),
            _ => Err(format!("Invalid mode: {}. Valid options: chars, lines", s)),
        }
    }
}
