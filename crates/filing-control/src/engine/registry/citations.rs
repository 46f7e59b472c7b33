use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Legal authorities the rule evaluator can cite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CitationCode {
    #[serde(rename = "FORM_5472")]
    Form5472,
    #[serde(rename = "FORM_1120")]
    Form1120,
    EinRequirement,
}

impl CitationCode {
    pub const fn ordered() -> [Self; 3] {
        [Self::Form5472, Self::Form1120, Self::EinRequirement]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub code: &'static str,
    pub short: &'static str,
    pub description: &'static str,
}

pub fn citations() -> &'static BTreeMap<CitationCode, Citation> {
    static CITATIONS: OnceLock<BTreeMap<CitationCode, Citation>> = OnceLock::new();
    CITATIONS.get_or_init(|| {
        CitationCode::ordered()
            .into_iter()
            .map(|code| (code, entry(code)))
            .collect()
    })
}

fn entry(code: CitationCode) -> Citation {
    match code {
        CitationCode::Form5472 => Citation {
            code: "IRC_6038A",
            short: "IRC \u{a7}6038A(d)",
            description: "Information reporting requirements for certain foreign-owned U.S. corporations and disregarded entities.",
        },
        CitationCode::Form1120 => Citation {
            code: "IRC_6012",
            short: "IRC \u{a7}6012",
            description: "Requirement to file income tax returns, including pro forma returns for foreign-owned disregarded entities.",
        },
        CitationCode::EinRequirement => Citation {
            code: "IRC_6109",
            short: "IRC \u{a7}6109",
            description: "Requirement to furnish a taxpayer identification number (EIN) on returns and statements.",
        },
    }
}

/// Look up a citation. The table is built from `CitationCode::ordered`, so every code has an entry.
pub fn citation(code: CitationCode) -> &'static Citation {
    &citations()[&code]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_resolves() {
        for code in CitationCode::ordered() {
            assert!(citations().contains_key(&code), "{code:?} missing");
        }
        assert_eq!(citations().len(), CitationCode::ordered().len());
    }

    #[test]
    fn short_forms_match_statute_sections() {
        assert_eq!(citation(CitationCode::Form5472).short, "IRC §6038A(d)");
        assert_eq!(citation(CitationCode::Form1120).short, "IRC §6012");
        assert_eq!(citation(CitationCode::EinRequirement).code, "IRC_6109");
    }
}
