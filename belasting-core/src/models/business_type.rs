use serde::{Deserialize, Serialize};

/// Legal form a rule or deadline applies to.
///
/// `Both` is a wildcard on the rule side: a rule tagged `Both` applies to
/// ZZP and BV callers alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    /// Zelfstandige zonder personeel (sole proprietor).
    Zzp,
    /// Besloten vennootschap (private limited company).
    Bv,
    Both,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zzp => "zzp",
            Self::Bv => "bv",
            Self::Both => "both",
        }
    }

    /// Parses the stored/wire form. Surrounding whitespace and case are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zzp" => Some(Self::Zzp),
            "bv" => Some(Self::Bv),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    /// Returns true when a record tagged with `self` applies to `caller`.
    pub fn matches(
        &self,
        caller: BusinessType,
    ) -> bool {
        *self == caller || *self == Self::Both
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
