//! Arabic-aware query normalization.
//!
//! Maps surface variants of the same question to one canonical string so
//! they share a cache key: hamza-bearing alef forms fold to bare alef,
//! alternate yaa forms to standard yaa, taa marbuta to haa, and punctuation
//! outside the word/Arabic character classes is stripped. Matching stays
//! exact-after-normalization; there is no fuzzy lookup.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Everything that is not an ASCII word character, whitespace, or inside the
/// Arabic block (U+0600–U+06FF) gets stripped.
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-z_\s\x{0600}-\x{06FF}]").unwrap());

/// Normalize a raw user query to its canonical cache form.
///
/// 1. NFC composition (combining hamza sequences become precomposed forms).
/// 2. Latin lowercasing (Arabic has no case).
/// 3. Alef folding `أ`/`إ`/`آ` → `ا`, yaa folding `ى`/`ئ` → `ي`,
///    taa marbuta `ة` → `ه`.
/// 4. Strip symbols outside `[0-9a-z_]`, whitespace, and the Arabic block.
/// 5. Trim the ends. Internal whitespace runs are left as-is — collapsing
///    them would change key equivalence classes for existing deployments.
///
/// Pure and total: any input (including empty) yields a valid output, and
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    // Folding and stripping can expose fresh NFC compositions: folded yaa
    // followed by a combining hamza above composes into ئ, and stripping a
    // symbol can bring a combining mark next to a new base letter. Repeat
    // until stable so the output is a fixpoint.
    let mut out = normalize_pass(raw);
    loop {
        let next = normalize_pass(&out);
        if next == out {
            return out;
        }
        out = next;
    }
}

fn normalize_pass(s: &str) -> String {
    let composed: String = s.nfc().collect();
    let folded: String = composed
        .to_lowercase()
        .chars()
        .map(fold_arabic_char)
        .collect();
    NON_WORD_RE.replace_all(&folded, "").trim().to_string()
}

/// Fold orthographic variants onto their canonical letter.
fn fold_arabic_char(c: char) -> char {
    match c {
        // Hamza-bearing alef forms: أ إ آ
        '\u{0623}' | '\u{0625}' | '\u{0622}' => '\u{0627}',
        // Alef maqsura ى and yaa-with-hamza ئ
        '\u{0649}' | '\u{0626}' => '\u{064A}',
        // Taa marbuta ة
        '\u{0629}' => '\u{0647}',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent() {
        for s in ["أهلاً وسهلاً!", "  Hello, World!  ", "مصطفى", "a   b", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_alef_variants_fold() {
        assert_eq!(normalize("أحمد"), normalize("احمد"));
        assert_eq!(normalize("إسلام"), normalize("اسلام"));
        assert_eq!(normalize("آمال"), normalize("امال"));
    }

    #[test]
    fn test_yaa_variants_fold() {
        assert_eq!(normalize("مصطفى"), normalize("مصطفي"));
        assert_eq!(normalize("شئ"), normalize("شي"));
    }

    #[test]
    fn test_taa_marbuta_folds_to_haa() {
        assert_eq!(normalize("مدرسة"), normalize("مدرسه"));
    }

    #[test]
    fn test_combining_hamza_matches_precomposed() {
        // Alef + combining hamza above composes to أ under NFC, then folds.
        assert_eq!(normalize("ا\u{0654}حمد"), normalize("أحمد"));
    }

    #[test]
    fn test_fold_exposed_composition_is_stable() {
        // Alef maqsura + combining hamza has no precomposed form, but after
        // folding ى→ي the pair composes into ئ, which folds to ي. The output
        // must already be that fixpoint.
        assert_eq!(normalize("\u{0649}\u{0654}"), "ي");
        let once = normalize("\u{0649}\u{0654}");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_strip_exposed_composition_is_stable() {
        // Stripping the "!" brings the combining hamza next to the yaa, so a
        // composition appears only after the strip pass.
        assert_eq!(normalize("ي!\u{0654}"), "ي");
        let once = normalize("ي!\u{0654}");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_punctuation_stripped() {
        assert_eq!(normalize("ما هي الأسعار?"), normalize("ما هي الاسعار"));
        assert_eq!(normalize("hello!!!"), "hello");
    }

    #[test]
    fn test_arabic_punctuation_in_block_survives() {
        // The Arabic question mark ؟ (U+061F) sits inside the Arabic block,
        // so only ASCII-range punctuation is guaranteed stripped.
        assert!(normalize("كيف؟").contains('\u{061F}'));
    }

    #[test]
    fn test_latin_case_folded() {
        assert_eq!(normalize("Hello World"), normalize("hello world"));
    }

    #[test]
    fn test_mixed_script() {
        assert_eq!(normalize("طلب iPhone 15!"), "طلب iphone 15");
    }

    #[test]
    fn test_trims_but_keeps_internal_whitespace() {
        assert_eq!(normalize("  اهلا   وسهلا  "), "اهلا   وسهلا");
    }

    #[test]
    fn test_symbols_only_input_degrades_to_empty() {
        assert_eq!(normalize("!!! @@@ ###"), "");
    }
}
