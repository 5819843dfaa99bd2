//! Page sections and which one the reader is looking at.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Projects,
    Contact,
}

/// Fraction of the viewport a section's top must pass to count as active.
pub const ACTIVE_LINE: f64 = 0.4;

impl Section {
    pub const ALL: [Self; 4] = [Self::Hero, Self::About, Self::Projects, Self::Contact];

    pub fn id(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.id() == id)
    }
}

/// The last section whose top edge sits above the activation line. `tops`
/// are viewport-relative; missing sections are skipped.
pub fn active_section(tops: &[(Section, Option<f64>)], viewport_height: f64) -> Section {
    let line = viewport_height * ACTIVE_LINE;
    tops.iter()
        .filter_map(|(section, top)| top.filter(|top| *top <= line).map(|_| *section))
        .last()
        .unwrap_or(Section::Hero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_id(section.id()), Some(section));
        }
        assert_eq!(Section::from_id("pricing"), None);
    }

    #[test]
    fn active_section_follows_scroll() {
        let at_top = [
            (Section::Hero, Some(0.0)),
            (Section::About, Some(900.0)),
            (Section::Projects, Some(1800.0)),
            (Section::Contact, Some(2700.0)),
        ];
        assert_eq!(active_section(&at_top, 1000.0), Section::Hero);

        let scrolled = [
            (Section::Hero, Some(-1900.0)),
            (Section::About, Some(-1000.0)),
            (Section::Projects, Some(300.0)),
            (Section::Contact, None),
        ];
        assert_eq!(active_section(&scrolled, 1000.0), Section::Projects);
    }

    #[test]
    fn nothing_mounted_means_hero() {
        assert_eq!(active_section(&[], 800.0), Section::Hero);
    }
}
