//! URL-safe slug derivation.

use chrono::{DateTime, Utc};

/// Derive a slug from a title: lowercase, collapse every run of characters
/// outside `[a-z0-9]` into a single `-`, trim the ends, then append a
/// base-36 encoding of the millisecond timestamp so that identical titles
/// submitted in quick succession still get distinct slugs.
pub fn derive(title: &str, now: DateTime<Utc>) -> String {
    let base = slugify(title);
    let suffix = base36(now.timestamp_millis());
    if base.is_empty() {
        suffix
    } else {
        format!("{base}-{suffix}")
    }
}

fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}

fn base36(millis: i64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut n = millis.unsigned_abs();
    if n == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();

    String::from_utf8(buf).expect("base36 digits are ascii")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn derives_base_slug_from_title() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let slug = derive("My First Blog Post!", now);

        let suffix = base36(1_700_000_000_000);
        assert_eq!(slug, format!("my-first-blog-post-{suffix}"));
    }

    #[test]
    fn collapses_runs_of_special_characters() {
        assert_eq!(slugify("Hello --- World!!!"), "hello-world");
        assert_eq!(slugify("  Rust & Actix  "), "rust-actix");
        assert_eq!(slugify("100% Coverage?"), "100-coverage");
    }

    #[test]
    fn trims_leading_and_trailing_dashes() {
        assert_eq!(slugify("!!Wow!!"), "wow");
    }

    #[test]
    fn title_without_usable_characters_still_yields_a_slug() {
        let now = Utc.timestamp_millis_opt(42).unwrap();
        let slug = derive("!!!", now);
        assert_eq!(slug, base36(42));
        assert!(!slug.is_empty());
    }

    #[test]
    fn different_timestamps_give_different_slugs() {
        let a = derive("Same Title", Utc.timestamp_millis_opt(1000).unwrap());
        let b = derive("Same Title", Utc.timestamp_millis_opt(1001).unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn base36_encodes_expected_digits() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
    }
}
