//! The `format` keyword.
//!
//! Formats are checked only for string values and only while
//! [`ValidatorOptions::validate_formats`](crate::ValidatorOptions::validate_formats)
//! is on. Unknown format names are annotations and always pass.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::validation::ValidationContext;
use crate::value::{Map, Value};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("Is a valid regex")
});
static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("Is a valid regex")
});
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Is a valid regex"));
static DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[Tt][0-9]{2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]+)?(?:[Zz]|[+-][0-9]{2}:[0-9]{2})$",
    )
    .expect("Is a valid regex")
});
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.[0-9]+)?(?:[Zz]|[+-]([0-9]{2}):([0-9]{2}))?$",
    )
    .expect("Is a valid regex")
});
static HOSTNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("Is a valid regex")
});
static SCHEME_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://$").expect("Is a valid regex"));
static RELATIVE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9\-._~!$&'()*+,;=:@/%]*(?:\?[A-Za-z0-9\-._~!$&'()*+,;=:@/%?]*)?(?:#[A-Za-z0-9\-._~!$&'()*+,;=:@/%?]*)?$",
    )
    .expect("Is a valid regex")
});

/// A string format this crate knows how to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
    Uri,
    UriReference,
    Uuid,
    Date,
    DateTime,
    Time,
    Hostname,
    Ipv4,
    Ipv6,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "email" => Ok(Format::Email),
            "uri" => Ok(Format::Uri),
            "uri-reference" => Ok(Format::UriReference),
            "uuid" => Ok(Format::Uuid),
            "date" => Ok(Format::Date),
            "date-time" => Ok(Format::DateTime),
            "time" => Ok(Format::Time),
            "hostname" => Ok(Format::Hostname),
            "ipv4" => Ok(Format::Ipv4),
            "ipv6" => Ok(Format::Ipv6),
            _ => Err(()),
        }
    }
}

impl Format {
    /// Returns true if `s` is a well-formed instance of this format.
    ///
    /// # Example
    ///
    /// ```rust
    /// use strictspec::schema::format::Format;
    ///
    /// assert!(Format::Date.is_valid("2024-02-29"));
    /// assert!(!Format::Date.is_valid("2023-02-29"));
    /// assert!(Format::Ipv6.is_valid("2001:db8::1"));
    /// ```
    pub fn is_valid(&self, s: &str) -> bool {
        match self {
            Format::Email => s.len() <= 254 && EMAIL_RE.is_match(s),
            Format::Uri => is_uri(s),
            Format::UriReference => is_uri_reference(s),
            Format::Uuid => UUID_RE.is_match(s),
            Format::Date => {
                DATE_RE.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
            }
            Format::DateTime => {
                DATE_TIME_RE.is_match(s)
                    && DateTime::parse_from_rfc3339(&s.to_ascii_uppercase()).is_ok()
            }
            Format::Time => is_time(s),
            Format::Hostname => s.len() <= 253 && HOSTNAME_RE.is_match(s),
            Format::Ipv4 => Ipv4Addr::from_str(s).is_ok(),
            Format::Ipv6 => Ipv6Addr::from_str(s).is_ok(),
        }
    }

    /// Returns a short description of the expected shape, with an example.
    pub fn hint(&self) -> &'static str {
        match self {
            Format::Email => "expected an email address such as user@example.com",
            Format::Uri => {
                "expected an absolute URI such as https://example.com/path or a path such as /path"
            }
            Format::UriReference => {
                "expected a URI or a relative reference such as /path?query#fragment"
            }
            Format::Uuid => "expected a UUID such as 123e4567-e89b-12d3-a456-426614174000",
            Format::Date => "expected a calendar date in YYYY-MM-DD form, e.g. 2024-01-31",
            Format::DateTime => "expected an RFC 3339 date-time such as 2024-01-31T13:45:00Z",
            Format::Time => "expected a time in HH:MM:SS form with optional offset, e.g. 13:45:00Z",
            Format::Hostname => "expected a hostname such as api.example.com",
            Format::Ipv4 => "expected a dotted-quad IPv4 address such as 192.168.0.1",
            Format::Ipv6 => "expected an IPv6 address such as 2001:db8::1",
        }
    }
}

pub(crate) fn validate(
    s: &str,
    schema: &Map,
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    if !context.options().validate_formats() {
        return;
    }
    let Some(name) = schema.get("format").and_then(Value::as_str) else {
        return;
    };
    let Ok(format) = name.parse::<Format>() else {
        return;
    };

    if !format.is_valid(s) {
        collector.push(
            ValidationError::new(
                path.clone(),
                pointer.push("format"),
                ConstraintKind::Format,
                format!("\"{}\" is not a valid {}", s, name),
            )
            .with_expected(name)
            .with_received(s)
            .with_hint(format.hint()),
        );
    }
}

fn is_time(s: &str) -> bool {
    let Some(captures) = TIME_RE.captures(s) else {
        return false;
    };
    let field = |i: usize| {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    field(1) <= 23 && field(2) <= 59 && field(3) <= 60 && field(4) <= 23 && field(5) <= 59
}

fn is_uri(s: &str) -> bool {
    if SCHEME_ONLY_RE.is_match(s) {
        return false;
    }
    if Url::parse(s).is_ok() {
        return true;
    }
    !s.is_empty() && !s.starts_with('?') && !s.starts_with('#') && RELATIVE_REF_RE.is_match(s)
}

fn is_uri_reference(s: &str) -> bool {
    if SCHEME_ONLY_RE.is_match(s) {
        return false;
    }
    Url::parse(s).is_ok() || RELATIVE_REF_RE.is_match(s)
}
