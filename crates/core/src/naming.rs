//! Display-name normalization for talents and works.
//!
//! Names and titles are stored title-cased so listings read consistently no
//! matter how the client typed them.

/// Title-case a string: every letter that follows a non-letter is
/// uppercased, every other letter is lowercased.
///
/// Word boundaries are any non-alphabetic character, so apostrophes and
/// hyphens start a new word.
///
/// # Examples
///
/// ```
/// use castlist_core::naming::title_case;
///
/// assert_eq!(title_case("the fighter"), "The Fighter");
/// assert_eq!(title_case("MARK"), "Mark");
/// assert_eq!(title_case("o'neil"), "O'Neil");
/// ```
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_letter = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}

/// Join a talent's first name and surname for display.
pub fn full_name(first_name: &str, second_name: &str) -> String {
    format!("{first_name} {second_name}")
}
