//! Label helpers.
//!
//! Field keys and record names are identifiers; these functions turn them
//! into text fit for a `<label>` or a headline.

/// Converts an identifier into a human readable label.
///
/// The first character is upper-cased, underscores become spaces, and a
/// transition into upper case inserts a space unless the previous character
/// was upper case too. Upper-case characters are lowered. A run of capitals
/// therefore collapses into one word: `BONDFund` becomes `Bondfund`.
///
/// Digits count as upper case, so `group01` becomes `Group 01`.
///
/// # Examples
///
/// ```
/// use formwright_core::utils::text::labelize;
///
/// assert_eq!(labelize("bond_fund"), "Bond fund");
/// assert_eq!(labelize("bondFund"), "Bond fund");
/// assert_eq!(labelize("bondFUND"), "Bond fund");
/// assert_eq!(labelize("BONDFund"), "Bondfund");
/// ```
pub fn labelize(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut previous_upper = false;
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
            previous_upper = true;
            continue;
        }
        let c = if c == '_' { ' ' } else { c };
        if is_upper_like(c) {
            if !previous_upper && c != ' ' {
                out.push(' ');
            }
            out.extend(c.to_lowercase());
            previous_upper = true;
        } else {
            out.push(c);
            previous_upper = false;
        }
    }
    out
}

/// A char counts as upper case when upper-casing leaves it unchanged.
fn is_upper_like(c: char) -> bool {
    let mut upper = c.to_uppercase();
    upper.next() == Some(c) && upper.next().is_none()
}

/// Underlines the access key inside a label.
///
/// The first case-insensitive occurrence of the first character of
/// `access_key` is wrapped in `<u>...</u>`. The label is returned unchanged
/// when the key is empty or does not occur.
///
/// # Examples
///
/// ```
/// use formwright_core::utils::text::access_keyify;
///
/// assert_eq!(access_keyify("Date layout", "t"), "Da<u>t</u>e layout");
/// assert_eq!(access_keyify("Department", "p"), "De<u>p</u>artment");
/// assert_eq!(access_keyify("Groups", "x"), "Groups");
/// ```
pub fn access_keyify(label: &str, access_key: &str) -> String {
    let Some(key) = access_key.chars().next() else {
        return label.to_string();
    };
    let key_lower: String = key.to_lowercase().collect();

    let mut out = String::with_capacity(label.len() + 7);
    let mut found = false;
    for c in label.chars() {
        if !found && c.to_lowercase().eq(key_lower.chars()) {
            out.push_str("<u>");
            out.push(c);
            out.push_str("</u>");
            found = true;
            continue;
        }
        out.push(c);
    }
    out
}
