use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

// Resolve the crawl date used for URL building: a --date override
// ("YYYY-MM-DD") when given, today otherwise.
pub fn resolve_crawl_date(arg: &Option<String>) -> Result<NaiveDate> {
    match arg.as_deref() {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --date (expected YYYY-MM-DD): {}", s)),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_override() {
        let d = resolve_crawl_date(&Some("2015-12-03".to_string())).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2015, 12, 3).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(resolve_crawl_date(&Some("12/03/2015".to_string())).is_err());
        assert!(resolve_crawl_date(&Some("soon".to_string())).is_err());
    }

    #[test]
    fn defaults_to_today() {
        assert_eq!(resolve_crawl_date(&None).unwrap(), Local::now().date_naive());
    }
}
