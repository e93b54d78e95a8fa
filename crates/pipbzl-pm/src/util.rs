//! Name normalization shared by the universe, the resolver and the renderer.

/// Normalize a distribution name into its lookup key.
///
/// Names are compared case-insensitively and `-` and `_` are treated as the
/// same separator, so `Foo-Bar`, `foo_bar` and `FOO_bar` all map to `foo_bar`.
///
/// # Examples
///
/// ```
/// use pipbzl_pm::util::normalize_name;
///
/// assert_eq!(normalize_name("Foo-Bar"), "foo_bar");
/// assert_eq!(normalize_name("foo_bar"), "foo_bar");
/// assert_eq!(normalize_name("zope.interface"), "zope.interface");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().replace('-', "_").to_lowercase()
}

/// Normalize an extra name for comparison.
///
/// Extras are matched with the same rules as distribution names.
pub fn normalize_extra(extra: &str) -> String {
    normalize_name(extra)
}

/// Escape a string for use inside a Bazel repository name.
pub fn escape_repository_part(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '-' | '.' | '+' => '_',
            c => c,
        })
        .collect()
}
