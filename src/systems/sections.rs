use crate::component::FlipFlopKind;

/// Pages of the trainer. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Overview,
    Sr,
    Jk,
    D,
    T,
    MasterSlave,
    Timing,
    Applications,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Overview,
        Section::Sr,
        Section::Jk,
        Section::D,
        Section::T,
        Section::MasterSlave,
        Section::Timing,
        Section::Applications,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Sr => "SR",
            Section::Jk => "JK",
            Section::D => "D",
            Section::T => "T",
            Section::MasterSlave => "Master-Slave",
            Section::Timing => "Timing",
            Section::Applications => "Applications",
        }
    }

    pub fn index(&self) -> usize {
        Section::ALL
            .iter()
            .position(|section| section == self)
            .unwrap_or(0)
    }

    pub fn next(&self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    pub fn previous(&self) -> Section {
        let len = Section::ALL.len();
        Section::ALL[(self.index() + len - 1) % len]
    }

    /// The flip-flop simulated on this page, if any.
    pub fn flip_flop(&self) -> Option<FlipFlopKind> {
        match self {
            Section::Sr => Some(FlipFlopKind::Sr),
            Section::Jk => Some(FlipFlopKind::Jk),
            Section::D => Some(FlipFlopKind::D),
            Section::T => Some(FlipFlopKind::T),
            _ => None,
        }
    }
}

impl From<FlipFlopKind> for Section {
    fn from(kind: FlipFlopKind) -> Self {
        match kind {
            FlipFlopKind::Sr => Section::Sr,
            FlipFlopKind::Jk => Section::Jk,
            FlipFlopKind::D => Section::D,
            FlipFlopKind::T => Section::T,
        }
    }
}

/// One-line summaries shown on the overview page; selecting one opens its page.
pub fn overview_entries() -> [(FlipFlopKind, &'static str); 4] {
    [
        (FlipFlopKind::Sr, "Set/Reset latch, level sensitive, has an invalid input"),
        (FlipFlopKind::Jk, "Like SR, but J = K = 1 toggles instead of being invalid"),
        (FlipFlopKind::D, "Captures D on the clock edge"),
        (FlipFlopKind::T, "Toggles on the clock edge while T is high"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        assert_eq!(Section::Overview.previous(), Section::Applications);
        assert_eq!(Section::Applications.next(), Section::Overview);
        assert_eq!(Section::Sr.next(), Section::Jk);
    }

    #[test]
    fn test_flip_flop_sections() {
        for kind in FlipFlopKind::ALL {
            assert_eq!(Section::from(kind).flip_flop(), Some(kind));
        }
        assert_eq!(Section::Timing.flip_flop(), None);
    }
}
