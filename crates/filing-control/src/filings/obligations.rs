use serde::{Deserialize, Serialize};

/// Legal form of the entity answering the filing questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "llc")]
    Llc,
    #[serde(rename = "corporation")]
    Corporation,
    #[serde(rename = "partnership")]
    Partnership,
    #[serde(rename = "sole_prop")]
    SoleProprietorship,
}

impl EntityType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Llc => "LLC",
            Self::Corporation => "Corporation",
            Self::Partnership => "Partnership",
            Self::SoleProprietorship => "Sole Proprietorship",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingInput {
    pub entity_type: EntityType,
    pub foreign_owned: bool,
    pub us_business_activity: bool,
    #[serde(rename = "hasUSIncome")]
    pub has_us_income: bool,
    pub tax_year: i32,
    /// Jurisdiction code such as `DE` or `wy`; may be empty.
    #[serde(default)]
    pub state: String,
}

/// One explanatory filing obligation. `form` is `None` for non-form duties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    pub title: String,
    pub form: Option<String>,
    pub authority: String,
    pub explanation: String,
}

impl Obligation {
    fn new(
        title: impl Into<String>,
        form: Option<&str>,
        authority: impl Into<String>,
        explanation: &str,
    ) -> Self {
        Self {
            title: title.into(),
            form: form.map(str::to_string),
            authority: authority.into(),
            explanation: explanation.to_string(),
        }
    }
}

/// List the obligations for a questionnaire answer set, in rule-check order.
///
/// A foreign-owned corporation with no U.S. business activity matches neither
/// corporate return rule and gets no corporate return: it has no 1120-F nexus
/// without a U.S. trade or business, and it is not a domestic filer.
pub fn compute_obligations(input: &FilingInput) -> Vec<Obligation> {
    let mut results = Vec::new();

    match input.entity_type {
        EntityType::Llc if input.foreign_owned => results.push(Obligation::new(
            "Information return for 25% foreign-owned U.S. LLC",
            Some("Form 5472 + pro forma Form 1120"),
            "IRS (26 USC \u{a7}6038A)",
            "A foreign-owned single-member LLC treated as a disregarded entity is generally required to file Form 5472 attached to a pro forma Form 1120 to report transactions between the LLC and its foreign owner.",
        )),
        EntityType::Llc => {}
        EntityType::Corporation => {
            if input.foreign_owned && input.us_business_activity {
                results.push(Obligation::new(
                    "Income tax return of a foreign corporation",
                    Some("Form 1120-F"),
                    "IRS (26 USC \u{a7}882)",
                    "A foreign corporation engaged in a trade or business within the United States generally must file Form 1120-F to report income effectively connected with that activity.",
                ));
            } else if !input.foreign_owned {
                results.push(Obligation::new(
                    "U.S. corporation income tax return",
                    Some("Form 1120"),
                    "IRS (26 USC \u{a7}6012)",
                    "A domestic C corporation files Form 1120 annually to report income, gains, losses, deductions, and credits.",
                ));
            }
        }
        EntityType::Partnership => results.push(Obligation::new(
            "Return of partnership income",
            Some("Form 1065"),
            "IRS (26 USC \u{a7}6031)",
            "Partnerships file an information return on Form 1065. Each partner receives a Schedule K-1 reflecting their share of income and deductions.",
        )),
        EntityType::SoleProprietorship => results.push(Obligation::new(
            "Profit or loss from business",
            Some("Schedule C (Form 1040)"),
            "IRS (26 USC \u{a7}6012)",
            "Sole proprietors report business income and expenses on Schedule C, attached to their individual Form 1040.",
        )),
    }

    if input.has_us_income {
        results.push(Obligation::new(
            "Federal estimated tax payments (if applicable)",
            Some("Form 1040-ES / 1120-W"),
            "IRS (26 USC \u{a7}6654 / \u{a7}6655)",
            "Entities and individuals with U.S.-source income may need to make quarterly estimated tax payments to avoid underpayment penalties.",
        ));
    }

    if input.foreign_owned {
        results.push(Obligation::new(
            "Employer Identification Number",
            Some("Form SS-4"),
            "IRS",
            "Foreign-owned entities operating in the U.S. generally need an EIN for tax filing, banking, and hiring purposes.",
        ));
        results.push(Obligation::new(
            "Beneficial Ownership Information report",
            Some("BOI Report (FinCEN)"),
            "FinCEN (31 USC \u{a7}5336)",
            "Most entities formed or registered in the U.S. must report beneficial ownership information to FinCEN. New entities formed after January 1, 2024 must file within 90 days of formation.",
        ));
    }

    let state = input.state.trim();
    if !state.is_empty() {
        let code = state.to_uppercase();
        results.push(Obligation::new(
            format!("State annual report / franchise tax ({code})"),
            None,
            format!("{code} Secretary of State"),
            "Most states require an annual or biennial report filing and may impose a franchise tax or business privilege tax. Deadlines and fees vary by state.",
        ));
    }

    results.push(Obligation::new(
        "Maintain registered agent",
        None,
        "State of formation",
        "Entities formed in a U.S. state must maintain a registered agent in that state to receive legal and government correspondence.",
    ));

    if !input.us_business_activity && !input.has_us_income && !input.foreign_owned {
        results.push(Obligation::new(
            "Potentially reduced federal filing obligations",
            None,
            "General guidance",
            "With no U.S. business activity, no U.S. income, and domestic ownership, federal filing obligations may be limited. State-level annual reports and registered agent requirements typically still apply.",
        ));
    }

    results
}
