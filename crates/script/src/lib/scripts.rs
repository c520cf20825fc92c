pub mod deploy_fund_me;
pub mod deploy_mocks;
pub mod prelude;

/// Separator emitted after each completed deployment unit.
pub(crate) const SEPARATOR: &str = "------------------------------------------------";

/// True when a script advertising `tags` is selected by the requested set.
pub fn tags_match(tags: &[&str], requested: &[String]) -> bool {
    requested
        .iter()
        .any(|req| tags.iter().any(|tag| tag.eq_ignore_ascii_case(req)))
}
