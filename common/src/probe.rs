//! # Probe File Lines
//!
//! Classifies the lines of an `nmap-service-probes` file.
//!
//! The grammar understood here is deliberately shallow:
//! * `Probe <protocol> <name> ...` opens a probe section.
//! * `match <service> ...` and `softmatch <service> ...` are signatures.
//! * `sslports <ports>` lists ports that get wrapped in SSL.
//! * Every other keyword-led line is an opaque directive.
//! * Blank lines and `#` comments carry no meaning and are never emitted.

/// Raw-text prefix of a probe header line.
pub const PROBE_PREFIX: &str = "Probe ";

/// Service name accepted regardless of the service filter.
pub const TCPWRAPPED: &str = "tcpwrapped";

/// Bare SSL service name.
pub const SSL_SERVICE: &str = "ssl";

/// Prefix of services tunnelled through SSL, e.g. `ssl/http`.
pub const SSL_TUNNEL_PREFIX: &str = "ssl/";

/// Probes that negotiate an SSL/TLS session.
pub const SSL_PROBES: [&str; 2] = ["SSLSessionReq", "TLSSessionReq"];

/// Older name of the SSL negotiation probe, only dropped under SSL suppression.
pub const LEGACY_SSL_PROBE: &str = "SSLv23SessionReq";

pub fn is_ssl_probe(name: &str) -> bool {
    SSL_PROBES.contains(&name)
}

/// The keyword that leads a line inside a probe section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Match,
    Softmatch,
    Sslports,
    Other,
}

impl DirectiveKind {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "match" => Self::Match,
            "softmatch" => Self::Softmatch,
            "sslports" => Self::Sslports,
            _ => Self::Other,
        }
    }

    /// `match` and `softmatch` both carry a service signature.
    pub fn is_signature(self) -> bool {
        matches!(self, Self::Match | Self::Softmatch)
    }
}

/// One classified line, borrowing from the raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Opens a new probe section. The name is absent on malformed headers.
    ProbeHeader { probe: Option<&'a str>, raw: &'a str },
    /// A keyword-led line. `service` is empty when the line has one token.
    Directive {
        kind: DirectiveKind,
        service: &'a str,
        raw: &'a str,
    },
    /// Blank or `#`-prefixed after trimming.
    Comment,
}

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Self {
        if raw.starts_with(PROBE_PREFIX) {
            return Line::ProbeHeader {
                probe: probe_name(raw),
                raw,
            };
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Line::Comment;
        }

        let mut tokens = trimmed.split_whitespace();
        let kind = tokens
            .next()
            .map(DirectiveKind::from_keyword)
            .unwrap_or(DirectiveKind::Other);
        let service = tokens.next().unwrap_or("");

        Line::Directive { kind, service, raw }
    }
}

/// Extracts the probe name from a header line.
///
/// The name is the third whitespace-separated token:
/// `Probe TCP GetRequest q|GET / HTTP/1.0\r\n\r\n|` names `GetRequest`.
/// Anything after it is ignored. Returns `None` for headers with fewer
/// than three tokens.
pub fn probe_name(header: &str) -> Option<&str> {
    header.split_whitespace().nth(2)
}
