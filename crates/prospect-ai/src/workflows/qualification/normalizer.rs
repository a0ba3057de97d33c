//! Canonical text form used for all evidence matching.

/// Lowercase, fold diacritics, drop punctuation, collapse whitespace.
/// Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    for ch in value.chars().flat_map(char::to_lowercase) {
        let ch = fold_diacritic(ch);
        if ch.is_alphanumeric() {
            folded.push(ch);
        } else {
            folded.push(' ');
        }
    }
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Progressively stricter match patterns for a company name: the 1-, 2-, and
/// 3-token prefixes of the canonical form, corporate suffixes removed.
pub fn name_variants(company_name: &str) -> Vec<String> {
    let canonical = normalize(company_name);
    let mut tokens: Vec<&str> = canonical.split_whitespace().collect();

    // Truncate at the first corporate suffix so "golden cargo transportes
    // ltda" still matches as "golden cargo". The leading token is never
    // treated as a suffix.
    if let Some(cut) = tokens
        .iter()
        .skip(1)
        .position(|token| CORPORATE_SUFFIXES.contains(token))
    {
        tokens.truncate(cut + 1);
    }

    let mut variants = Vec::new();
    for take in 1..=tokens.len().min(3) {
        let variant = tokens[..take].join(" ");
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

// Compared against normalized tokens, so entries never carry punctuation.
const CORPORATE_SUFFIXES: &[&str] = &[
    "sa", "ltda", "eireli", "epp", "me", "inc", "llc", "ltd", "gmbh", "holdings",
    "participacoes", "industrias", "industria", "comercio", "servicos",
];

fn fold_diacritic(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_punctuation_and_accents() {
        assert_eq!(normalize("  Açúcar & Cia.  S.A. "), "acucar cia s a");
        assert_eq!(normalize("Golden-Cargo,Transportes"), "golden cargo transportes");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = ["Águia Branca S/A", "ACME  Corp.", "", "já normalizado"];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn variants_are_cumulative_token_prefixes() {
        assert_eq!(
            name_variants("Golden Cargo Transportes e Logística"),
            vec![
                "golden".to_string(),
                "golden cargo".to_string(),
                "golden cargo transportes".to_string(),
            ]
        );
    }

    #[test]
    fn variants_stop_at_corporate_suffix() {
        assert_eq!(
            name_variants("Golden Cargo Ltda"),
            vec!["golden".to_string(), "golden cargo".to_string()]
        );
    }

    #[test]
    fn suffix_matching_sees_only_normalized_tokens() {
        // Punctuation is gone before tokenizing, so the bare "sa" form is the
        // one a suffix entry can ever match.
        assert_eq!(
            name_variants("Golden Cargo SA"),
            vec!["golden".to_string(), "golden cargo".to_string()]
        );
    }

    #[test]
    fn variants_of_empty_name_are_empty() {
        assert!(name_variants("").is_empty());
        assert!(name_variants("   ").is_empty());
    }
}
