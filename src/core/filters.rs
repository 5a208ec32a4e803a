use crate::models::{CandidateProfile, CounterpartyPreferences};

/// Language overlap sub-score (0-100)
///
/// A counterparty without language preferences accepts anyone. Otherwise the
/// score is the share of preferred languages the candidate speaks, compared
/// case-insensitively. Also returns the candidate languages that matched.
#[inline]
pub fn calculate_language_score(
    candidate: &CandidateProfile,
    preferences: &CounterpartyPreferences,
) -> (f64, Vec<String>) {
    if preferences.preferred_languages.is_empty() {
        return (100.0, Vec::new());
    }

    let preferred: Vec<String> = preferences
        .preferred_languages
        .iter()
        .map(|lang| lang.to_lowercase())
        .collect();

    let shared_languages: Vec<String> = candidate
        .languages
        .iter()
        .filter(|lang| preferred.contains(&lang.to_lowercase()))
        .cloned()
        .collect();

    let ratio = shared_languages.len() as f64 / preferred.len() as f64;

    // Case variants of one language on the candidate side must not push past 100
    ((ratio * 100.0).min(100.0), shared_languages)
}

/// Check if the counterparty's country is among the candidate's preferred countries
///
/// Literal comparison: "USA" and "usa" are different countries here.
#[inline]
pub fn matches_country(
    candidate: &CandidateProfile,
    preferences: &CounterpartyPreferences,
) -> bool {
    candidate.preferred_countries.contains(&preferences.country)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_candidate(languages: &[&str], countries: &[&str]) -> CandidateProfile {
        CandidateProfile {
            user_id: "aupair".to_string(),
            languages: languages.iter().map(|s| s.to_string()).collect(),
            preferred_countries: countries.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn create_preferences(languages: &[&str], country: &str) -> CounterpartyPreferences {
        CounterpartyPreferences {
            user_id: "family".to_string(),
            preferred_languages: languages.iter().map(|s| s.to_string()).collect(),
            country: country.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_language_preference_is_full_score() {
        let candidate = create_candidate(&[], &[]);
        let preferences = create_preferences(&[], "France");

        let (score, shared) = calculate_language_score(&candidate, &preferences);

        assert_eq!(score, 100.0);
        assert!(shared.is_empty());
    }

    #[test]
    fn test_language_match_ignores_case() {
        let candidate = create_candidate(&["French", "English"], &[]);
        let preferences = create_preferences(&["french"], "France");

        let (score, shared) = calculate_language_score(&candidate, &preferences);

        assert_eq!(score, 100.0);
        assert_eq!(shared, vec!["French"]);
    }

    #[test]
    fn test_partial_language_overlap() {
        let candidate = create_candidate(&["Spanish"], &[]);
        let preferences = create_preferences(&["spanish", "german"], "Spain");

        let (score, _) = calculate_language_score(&candidate, &preferences);

        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_duplicate_case_variants_capped() {
        let candidate = create_candidate(&["French", "FRENCH"], &[]);
        let preferences = create_preferences(&["french"], "France");

        let (score, shared) = calculate_language_score(&candidate, &preferences);

        assert_eq!(score, 100.0);
        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn test_country_match_is_case_sensitive() {
        let candidate = create_candidate(&[], &["USA"]);

        assert!(matches_country(&candidate, &create_preferences(&[], "USA")));
        assert!(!matches_country(&candidate, &create_preferences(&[], "usa")));
    }
}
