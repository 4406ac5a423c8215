use derive_more::{Debug, Deref};

/// Convert spaces to hyphens. Remove characters that aren't alphanumerics,
/// underscores, or hyphens. Convert to lowercase. Also strip leading and
/// trailing whitespace.
pub fn slugify(string: &str) -> String {
    let mut output = String::with_capacity(string.len());

    let mut need_dash = false;
    for ch in string.chars() {
        if ch.is_whitespace() || ch.is_control() {
            need_dash = !output.is_empty();
            continue;
        }

        for b in deunicode::deunicode_char(ch).unwrap_or("-").bytes() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                if need_dash {
                    output.push('-');
                    need_dash = false;
                }

                output.push(b.to_ascii_lowercase() as char);
            } else {
                need_dash = !output.is_empty();
            }
        }
    }

    output
}

/// A request-supplied identifier with control characters removed.
///
/// Every printable character is kept as-is: escaping is left to the template
/// engine, which knows the output context.
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct Sanitized(String);

impl std::fmt::Display for Sanitized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

pub fn sanitize_id(raw: &str) -> Sanitized {
    Sanitized(raw.chars().filter(|c| !c.is_control()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("AI Job Matching Platform"), "ai-job-matching-platform");
        assert_eq!(slugify("test\nit   now!"), "test-it-now");
        assert_eq!(slugify("  --test_-_cool- -  "), "test_-_cool");
        assert_eq!(slugify("Æúű--cool?"), "aeuu-cool");
        assert_eq!(slugify("Tailwind CSS & Stripe"), "tailwind-css-stripe");
        assert_eq!(slugify("Home\tFinance\r\nApp"), "home-finance-app");
    }

    #[test]
    fn sanitize_keeps_printable() {
        assert_eq!(&*sanitize_id(""), "");
        assert_eq!(&*sanitize_id("42"), "42");
        assert_eq!(&*sanitize_id("<b>hi there</b>"), "<b>hi there</b>");
        assert_eq!(&*sanitize_id("a\u{0}b\r\nc\td"), "abcd");
        assert_eq!(sanitize_id("ünï").to_string(), "ünï");
    }
}
