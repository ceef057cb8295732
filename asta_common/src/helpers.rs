/// Returns the trimmed value if it is present and not blank. Form fields that are missing, `null` or `""` are all
/// treated as "not supplied".
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
