use std::fmt;

/// One of the four generated guidance tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Basics,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    /// All levels in ascending order
    pub const ALL: [Level; 4] = [
        Level::Basics,
        Level::Intermediate,
        Level::Advanced,
        Level::Expert,
    ];

    /// Tier number, 1 through 4
    pub fn number(self) -> u8 {
        match self {
            Level::Basics => 1,
            Level::Intermediate => 2,
            Level::Advanced => 3,
            Level::Expert => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Basics => "Basics",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
            Level::Expert => "Expert",
        }
    }

    /// File name inside `resources/`, e.g. `Level1_basics.md`
    pub fn file_name(self) -> &'static str {
        match self {
            Level::Basics => "Level1_basics.md",
            Level::Intermediate => "Level2_intermediate.md",
            Level::Advanced => "Level3_advanced.md",
            Level::Expert => "Level4_expert.md",
        }
    }

    /// Document title, e.g. `Level 1: Basics`
    pub fn title(self) -> String {
        format!("Level {}: {}", self.number(), self.label())
    }

    /// Whether a resource file name is one of the generated level files
    pub fn is_generated_file(name: &str) -> bool {
        Self::ALL.iter().any(|level| level.file_name() == name)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}
