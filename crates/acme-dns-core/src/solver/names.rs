//! Record name normalisation
//!
//! ACME clients hand over challenge names either relative to the zone
//! (`_acme-challenge`) or fully qualified (`_acme-challenge.example.com.`).
//! Matching uses the qualified form, record creation the relative form.

/// Fully-qualified form of `name` within `zone`, without a trailing dot
pub fn qualify(name: &str, zone: &str) -> String {
    let name = name.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');

    if name.eq_ignore_ascii_case(zone) || zone_suffix_start(name, zone).is_some() {
        name.to_string()
    } else {
        format!("{}.{}", name, zone)
    }
}

/// Form of `name` relative to `zone`; the zone apex becomes `@`
pub fn relative_to(name: &str, zone: &str) -> String {
    let name = name.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');

    if name.eq_ignore_ascii_case(zone) {
        return "@".to_string();
    }

    match zone_suffix_start(name, zone) {
        Some(dot) => name[..dot].to_string(),
        None => name.to_string(),
    }
}

/// Byte index of the dot separating `name` from a trailing `.zone`
fn zone_suffix_start(name: &str, zone: &str) -> Option<usize> {
    if zone.is_empty() || name.len() <= zone.len() + 1 {
        return None;
    }

    let dot = name.len() - zone.len() - 1;
    let bytes = name.as_bytes();

    if bytes[dot] == b'.' && bytes[dot + 1..].eq_ignore_ascii_case(zone.as_bytes()) {
        Some(dot)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("_acme-challenge", "example.com"), "_acme-challenge.example.com");
        assert_eq!(
            qualify("_acme-challenge.example.com", "example.com"),
            "_acme-challenge.example.com"
        );
        assert_eq!(
            qualify("_acme-challenge.example.com.", "example.com."),
            "_acme-challenge.example.com"
        );
        assert_eq!(qualify("example.com", "example.com"), "example.com");
        // "badexample.com" is not inside "example.com"
        assert_eq!(qualify("badexample.com", "example.com"), "badexample.com.example.com");
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(relative_to("_acme-challenge.example.com", "example.com"), "_acme-challenge");
        assert_eq!(relative_to("_acme-challenge.WWW.Example.COM.", "example.com"), "_acme-challenge.WWW");
        assert_eq!(relative_to("_acme-challenge", "example.com"), "_acme-challenge");
        assert_eq!(relative_to("example.com", "example.com"), "@");
    }
}
