//! Formula Reference Tokenizer
//!
//! Extracts cell references from formula text without evaluating anything.
//! A token is an uppercase column-letter run immediately followed by a digit
//! run, optionally extended with `:` and a second such pair (`A1:B2`). Tokens
//! are reported in order of appearance, duplicates kept.
//!
//! A letter run whose next character is not a digit matches nothing, and is
//! skipped as a whole. That rule is what drops sheet qualifiers: in
//! `Data!A1`, `D` is followed by lowercase text, so only `A1` tokenizes.
//! Cross-sheet references therefore come out unqualified; this is long-
//! standing behavior the reports depend on.

/// Extract cell/range reference tokens from a formula string.
pub fn extract_cell_refs(formula: &str) -> Vec<String> {
    let chars: Vec<char> = formula.chars().collect();
    let mut refs = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            i += 1;
            continue;
        }
        match scan_ref(&chars, i) {
            Some(end) => {
                // Optional `:B2` extension directly after the first pair.
                let mut token_end = end;
                if chars.get(end) == Some(&':')
                    && let Some(range_end) = chars
                        .get(end + 1)
                        .filter(|c| c.is_ascii_uppercase())
                        .and_then(|_| scan_ref(&chars, end + 1))
                {
                    token_end = range_end;
                }
                refs.push(chars[i..token_end].iter().collect());
                i = token_end;
            }
            None => {
                // Skip the whole letter run; no suffix of it can match either.
                while i < chars.len() && chars[i].is_ascii_uppercase() {
                    i += 1;
                }
            }
        }
    }
    refs
}

/// Scan one `LETTERS DIGITS` pair starting at an uppercase letter; returns
/// the index one past the digit run, or `None` when no digit follows the
/// maximal letter run.
fn scan_ref(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start;
    while i < chars.len() && chars[i].is_ascii_uppercase() {
        i += 1;
    }
    if i >= chars.len() || !chars[i].is_ascii_digit() {
        return None;
    }
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    Some(i)
}

// =============================================================================
// A1 Notation Helpers
// =============================================================================

/// Column letters for a 0-based column index (0 → `A`, 26 → `AA`).
pub fn column_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'A' + (col % 26) as u8));
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.into_iter().rev().collect()
}

/// A1-style reference for 0-based (row, column) coordinates.
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", column_letter(col), row + 1)
}

/// A1-style range for 0-based inclusive corners.
pub fn range_ref(start: (u32, u32), end: (u32, u32)) -> String {
    format!("{}:{}", cell_ref(start.0, start.1), cell_ref(end.0, end.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sum_plus_cell_extracts_in_order() {
        assert_eq!(extract_cell_refs("=SUM(A1:A10)+B2"), vec!["A1:A10", "B2"]);
    }

    #[test]
    fn sheet_qualifier_is_dropped() {
        assert_eq!(extract_cell_refs("=Data!A1+1"), vec!["A1"]);
        assert_eq!(extract_cell_refs("=Sheet2!B3*C4"), vec!["B3", "C4"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(extract_cell_refs("=A1+A1"), vec!["A1", "A1"]);
    }

    #[test]
    fn function_names_do_not_match() {
        assert_eq!(extract_cell_refs("=SUM(1,2)"), Vec::<String>::new());
        assert_eq!(extract_cell_refs("=IF(TRUE,1,0)"), Vec::<String>::new());
    }

    #[test]
    fn dangling_colon_keeps_first_reference_only() {
        assert_eq!(extract_cell_refs("=A1:+B2"), vec!["A1", "B2"]);
        assert_eq!(extract_cell_refs("=A1:SUM"), vec!["A1"]);
    }

    #[test]
    fn multi_letter_columns_and_long_rows() {
        assert_eq!(extract_cell_refs("=AB12:XFD1048576"), vec!["AB12:XFD1048576"]);
    }

    #[test]
    fn column_letters_round_corners() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn cell_and_range_refs() {
        assert_eq!(cell_ref(0, 0), "A1");
        assert_eq!(cell_ref(1, 1), "B2");
        assert_eq!(range_ref((0, 0), (4, 2)), "A1:C5");
    }

    proptest! {
        #[test]
        fn never_panics_on_arbitrary_input(formula in "\\PC*") {
            let _ = extract_cell_refs(&formula);
        }

        #[test]
        fn tokens_match_the_reference_shape(formula in "[A-Za-z0-9!:+()=,. ]{0,64}") {
            for token in extract_cell_refs(&formula) {
                let parts: Vec<&str> = token.split(':').collect();
                prop_assert!(parts.len() <= 2);
                for part in parts {
                    let letters: String =
                        part.chars().take_while(|c| c.is_ascii_uppercase()).collect();
                    let digits = &part[letters.len()..];
                    prop_assert!(!letters.is_empty());
                    prop_assert!(!digits.is_empty());
                    prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
                }
            }
        }
    }
}
