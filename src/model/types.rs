use nalgebra::Point3;

pub type Point = Point3<f64>;

/// Normalizes an element token to conventional `Xx` capitalization.
///
/// Structure files disagree on case (`CL`, `cl`, `Cl`), while whitelists are written in
/// periodic-table form. Only alphabetic characters are kept; charge suffixes and digits are
/// dropped so `"Fe2+"` normalizes to `"Fe"`.
///
/// # Arguments
///
/// * `token` - Raw element token as read from a file column.
///
/// # Returns
///
/// The normalized symbol, or an empty string when the token carries no letters.
pub fn normalize_symbol(token: &str) -> String {
    let mut symbol = String::with_capacity(2);
    for (i, c) in token.trim().chars().filter(|c| c.is_ascii_alphabetic()).enumerate() {
        if i == 0 {
            symbol.push(c.to_ascii_uppercase());
        } else {
            symbol.push(c.to_ascii_lowercase());
        }
    }
    symbol
}

/// Extracts the element prefix of a SYBYL atom type (`C.ar` → `C`, `Cl` → `Cl`).
pub fn sybyl_element(atom_type: &str) -> String {
    let prefix = atom_type.split('.').next().unwrap_or(atom_type);
    normalize_symbol(prefix)
}
