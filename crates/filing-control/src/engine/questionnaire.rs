use serde::Serialize;
use std::collections::BTreeMap;

use super::domain::EntityProfile;

/// Intake question backing one `EntityProfile` flag. All questions are yes/no and required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "foreignOwner",
        text: "Is the LLC owned (in whole or part) by a foreign person or entity?",
    },
    Question {
        id: "singleMember",
        text: "Is this a single-member LLC (disregarded entity for tax purposes)?",
    },
    Question {
        id: "hasEIN",
        text: "Does the LLC have an Employer Identification Number (EIN)?",
    },
    Question {
        id: "hasRelatedPartyTransactions",
        text: "Has the LLC engaged in reportable transactions with related foreign parties during the tax year?",
    },
    Question {
        id: "hasRevenue",
        text: "Did the LLC receive revenue or income during the tax year?",
    },
    Question {
        id: "prior5472Filed",
        text: "Was Form 5472 filed for the most recent prior tax year (if applicable)?",
    },
];

/// Answer sets that cannot be turned into a profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionnaireError {
    #[error("unknown question id '{0}'")]
    UnknownQuestion(String),
    #[error("missing answer for required question '{0}'")]
    MissingAnswer(&'static str),
}

impl EntityProfile {
    /// Build a profile from answers keyed by question id.
    ///
    /// Unknown ids are reported before missing ones.
    pub fn from_answers(answers: &BTreeMap<String, bool>) -> Result<Self, QuestionnaireError> {
        if let Some(unknown) = answers
            .keys()
            .find(|id| !QUESTIONS.iter().any(|question| question.id == id.as_str()))
        {
            return Err(QuestionnaireError::UnknownQuestion(unknown.clone()));
        }

        let answer = |id: &'static str| {
            answers
                .get(id)
                .copied()
                .ok_or(QuestionnaireError::MissingAnswer(id))
        };

        Ok(Self {
            foreign_owner: answer("foreignOwner")?,
            single_member: answer("singleMember")?,
            has_ein: answer("hasEIN")?,
            has_related_party_transactions: answer("hasRelatedPartyTransactions")?,
            has_revenue: answer("hasRevenue")?,
            prior_5472_filed: answer("prior5472Filed")?,
        })
    }
}
