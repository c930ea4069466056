/// The three buckets net income is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Need,
    Want,
    Save,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Need => "need",
            Self::Want => "want",
            Self::Save => "save",
        }
    }

    /// Plural label used in summaries, e.g. "Needs".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Need => "Needs",
            Self::Want => "Wants",
            Self::Save => "Savings",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "need" | "needs" => Some(Self::Need),
            "want" | "wants" => Some(Self::Want),
            "save" | "saves" | "savings" => Some(Self::Save),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[Self::Need, Self::Want, Self::Save]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
