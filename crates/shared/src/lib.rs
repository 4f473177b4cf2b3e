mod error;
mod locale;

pub use error::*;
pub use locale::*;

/// Picks the CMS-provided value when the document carries one, otherwise the
/// value baked into the site.
pub fn resolve<T>(cms: Option<T>, fallback: T) -> T {
    cms.unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_cms_value() {
        assert_eq!(resolve(Some("cms"), "static"), "cms");
        assert_eq!(resolve(None, "static"), "static");
    }
}
