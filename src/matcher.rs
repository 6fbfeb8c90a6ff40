use crate::config::PreferenceProfile;
use crate::model::Deal;

/// Pure taste-profile predicate. Checks run in order and each one is a
/// hard reject: keyword, price ceiling, discount floor, then the score
/// rule. A deal that lists critic scores must show at least one score at
/// or above the floor from a trusted publication; a deal with no scores
/// is never penalized for lacking one.
pub fn matches(deal: &Deal, profile: &PreferenceProfile) -> bool {
    let name = deal.name.to_lowercase();
    if !profile.keywords.iter().any(|kw| name.contains(&kw.to_lowercase())) {
        return false;
    }

    if deal.price > profile.max_price {
        return false;
    }

    if deal.original_price > 0.0 && deal.discount_pct < profile.min_discount_pct {
        return false;
    }

    if !deal.critic_scores.is_empty() {
        let trusted_high = deal.critic_scores.iter().any(|cs| {
            cs.score >= profile.min_score
                && profile
                    .trusted_sources
                    .iter()
                    .any(|src| cs.publication.to_lowercase().contains(&src.to_lowercase()))
        });
        if !trusted_high {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CriticScore, Source};

    fn profile() -> PreferenceProfile {
        PreferenceProfile {
            keywords: vec!["guidalberto".to_string()],
            max_price: 60.0,
            min_discount_pct: 30,
            min_score: 92,
            trusted_sources: vec!["wine advocate".to_string()],
        }
    }

    fn deal(price: f64, original: f64, scores: Vec<CriticScore>) -> Deal {
        Deal::new(
            "Guidalberto 2019".to_string(),
            price,
            original,
            "https://www.wtso.com/".to_string(),
            Source::Wtso,
            scores,
        )
    }

    #[test]
    fn scored_discounted_keyword_match_passes() {
        let deal = deal(
            40.0,
            80.0,
            vec![CriticScore { score: 95, publication: "Wine Advocate".into() }],
        );
        assert_eq!(deal.discount_pct, 50);
        assert!(matches(&deal, &profile()));
    }

    #[test]
    fn keyword_miss_rejects_even_a_perfect_deal() {
        let mut d = deal(
            40.0,
            80.0,
            vec![CriticScore { score: 95, publication: "Wine Advocate".into() }],
        );
        d.name = "Barolo Riserva 2016".to_string();
        assert!(!matches(&d, &profile()));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let mut d = deal(40.0, 80.0, Vec::new());
        d.name = "GUIDALBERTO 2019".to_string();
        assert!(matches(&d, &profile()));
    }

    #[test]
    fn over_budget_rejects_regardless_of_everything_else() {
        let d = deal(
            61.0,
            200.0,
            vec![CriticScore { score: 100, publication: "Wine Advocate".into() }],
        );
        assert!(!matches(&d, &profile()));
    }

    #[test]
    fn thin_discount_rejects_when_original_price_is_known() {
        assert!(!matches(&deal(50.0, 60.0, Vec::new()), &profile()));
    }

    #[test]
    fn unknown_original_price_skips_the_discount_rule() {
        assert!(matches(&deal(40.0, 0.0, Vec::new()), &profile()));
    }

    #[test]
    fn untrusted_publication_does_not_qualify_a_scored_deal() {
        let d = deal(
            40.0,
            80.0,
            vec![CriticScore { score: 99, publication: "unknown".into() }],
        );
        assert!(!matches(&d, &profile()));
    }

    #[test]
    fn trusted_score_below_floor_rejects() {
        let d = deal(
            40.0,
            80.0,
            vec![CriticScore { score: 91, publication: "Wine Advocate".into() }],
        );
        assert!(!matches(&d, &profile()));
    }

    #[test]
    fn one_qualifying_score_is_enough() {
        let d = deal(
            40.0,
            80.0,
            vec![
                CriticScore { score: 89, publication: "unknown".into() },
                CriticScore { score: 94, publication: "Wine Advocate".into() },
            ],
        );
        assert!(matches(&d, &profile()));
    }

    #[test]
    fn score_blind_deals_are_not_penalized() {
        assert!(matches(&deal(40.0, 80.0, Vec::new()), &profile()));
    }
}
