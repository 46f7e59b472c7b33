use super::domain::{EntityProfile, RiskAssessment, RiskLevel};

const FOREIGN_SINGLE_MEMBER_POINTS: u32 = 30;
const RELATED_PARTY_POINTS: u32 = 30;
const MISSING_PRIOR_5472_POINTS: u32 = 40;
const REVENUE_POINTS: u32 = 10;
const MISSING_EIN_POINTS: u32 = 20;

/// Additive risk score for a profile. Every rule is applied; the maximum is 130.
pub fn calculate_risk(profile: &EntityProfile) -> RiskAssessment {
    let mut score = 0;

    if profile.foreign_owner && profile.single_member {
        score += FOREIGN_SINGLE_MEMBER_POINTS;
    }
    if profile.has_related_party_transactions {
        score += RELATED_PARTY_POINTS;
    }
    if !profile.prior_5472_filed {
        score += MISSING_PRIOR_5472_POINTS;
    }
    if profile.has_revenue {
        score += REVENUE_POINTS;
    }
    if !profile.has_ein {
        score += MISSING_EIN_POINTS;
    }

    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_profile() -> EntityProfile {
        EntityProfile {
            foreign_owner: false,
            single_member: false,
            has_ein: true,
            has_related_party_transactions: false,
            has_revenue: false,
            prior_5472_filed: true,
        }
    }

    #[test]
    fn banding_breakpoints() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(130), RiskLevel::High);
    }

    #[test]
    fn quiet_profile_scores_zero() {
        let risk = calculate_risk(&quiet_profile());
        assert_eq!(risk.score, 0);
        assert_eq!(risk.level, RiskLevel::Low);
    }

    #[test]
    fn every_flag_set_scores_maximum() {
        let profile = EntityProfile {
            foreign_owner: true,
            single_member: true,
            has_ein: false,
            has_related_party_transactions: true,
            has_revenue: true,
            prior_5472_filed: false,
        };
        let risk = calculate_risk(&profile);
        assert_eq!(risk.score, 130);
        assert_eq!(risk.level, RiskLevel::High);
    }

    #[test]
    fn foreign_owner_alone_earns_nothing() {
        let mut profile = quiet_profile();
        profile.foreign_owner = true;
        assert_eq!(calculate_risk(&profile).score, 0);

        profile.single_member = true;
        assert_eq!(calculate_risk(&profile).score, 30);
    }

    #[test]
    fn rules_accumulate_independently() {
        let mut profile = quiet_profile();
        profile.prior_5472_filed = false;
        assert_eq!(calculate_risk(&profile).score, 40);
        assert_eq!(calculate_risk(&profile).level, RiskLevel::Moderate);

        profile.has_revenue = true;
        profile.has_ein = false;
        assert_eq!(calculate_risk(&profile).score, 70);

        profile.has_related_party_transactions = true;
        let risk = calculate_risk(&profile);
        assert_eq!(risk.score, 100);
        assert_eq!(risk.level, RiskLevel::High);
    }
}
