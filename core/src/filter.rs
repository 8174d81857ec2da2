//! # Probe Section Filter
//!
//! Groups the lines of a probe file into sections, one per `Probe` header,
//! and keeps or drops each section as a whole.
//!
//! A section is only written out once it closes, either at the next header
//! or at the end of the input, and only if at least one of its signatures
//! survived the service filter and its probe name passes the probe rules.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use probekit_common::config::FilterConfig;
use probekit_common::probe::{
    DirectiveKind, LEGACY_SSL_PROBE, Line, SSL_SERVICE, SSL_TUNNEL_PREFIX, TCPWRAPPED,
    is_ssl_probe,
};
use tracing::{debug, trace};

/// Why a closed section was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DropReason {
    /// No `match`/`softmatch` directive passed the service filter.
    NoMatchingDirective,
    /// The probe is on the exclusion list.
    Excluded,
    /// An allow-list is set and the probe is not on it.
    NotAllowed,
    /// SSL suppression removes SSL negotiation probes.
    SslSuppressed,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::NoMatchingDirective => "no matching signature",
            DropReason::Excluded => "excluded probe",
            DropReason::NotAllowed => "probe not allowed",
            DropReason::SslSuppressed => "ssl suppressed",
        };
        f.write_str(text)
    }
}

/// Result of one filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Output lines in input order.
    pub lines: Vec<String>,
    /// Names of the probes whose sections were written, in order.
    /// Sections with a malformed header show up as an empty name.
    pub kept: Vec<String>,
    /// Number of dropped sections per reason.
    pub dropped: BTreeMap<DropReason, usize>,
}

impl FilterOutcome {
    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}

/// Filters a whole probe file held in memory.
pub fn filter_lines<S: AsRef<str>>(lines: &[S], cfg: &FilterConfig) -> FilterOutcome {
    let mut accumulator = Accumulator::new(cfg);
    for line in lines {
        accumulator.push(line.as_ref());
    }
    accumulator.finish()
}

/// The lines of one probe block seen so far.
#[derive(Debug)]
struct Section {
    probe: Option<String>,
    lines: Vec<String>,
    match_found: bool,
}

impl Section {
    fn open(header: &str, probe: Option<&str>) -> Self {
        Self {
            probe: probe.map(str::to_owned),
            lines: vec![header.to_owned()],
            match_found: false,
        }
    }
}

#[derive(Debug)]
enum State {
    Idle,
    InSection(Section),
}

/// Section accumulator.
///
/// Starts `Idle`, enters `InSection` on the first header and stays there;
/// every later header and the end of input go through [`Accumulator::flush`].
struct Accumulator<'c> {
    cfg: &'c FilterConfig,
    state: State,
    outcome: FilterOutcome,
}

impl<'c> Accumulator<'c> {
    fn new(cfg: &'c FilterConfig) -> Self {
        Self {
            cfg,
            state: State::Idle,
            outcome: FilterOutcome::default(),
        }
    }

    fn push(&mut self, raw: &str) {
        match Line::classify(raw) {
            Line::ProbeHeader { probe, raw } => {
                self.flush();
                self.state = State::InSection(Section::open(raw, probe));
            }
            Line::Comment => {}
            Line::Directive { kind, service, raw } => match &mut self.state {
                State::Idle => self.outcome.lines.push(raw.to_owned()),
                State::InSection(section) => accept_directive(section, kind, service, raw, self.cfg),
            },
        }
    }

    /// Closes the open section, if any, writing it out when it passes.
    fn flush(&mut self) {
        let State::InSection(section) = std::mem::replace(&mut self.state, State::Idle) else {
            return;
        };

        let name = section.probe.as_deref().unwrap_or("");
        match section_verdict(&section, self.cfg) {
            Ok(()) => {
                trace!(probe = name, lines = section.lines.len(), "keeping section");
                self.outcome.kept.push(name.to_owned());
                self.outcome.lines.extend(section.lines);
            }
            Err(reason) => {
                debug!(probe = name, %reason, "dropping section");
                *self.outcome.dropped.entry(reason).or_default() += 1;
            }
        }
    }

    fn finish(mut self) -> FilterOutcome {
        self.flush();
        self.outcome
    }
}

fn accept_directive(
    section: &mut Section,
    kind: DirectiveKind,
    service: &str,
    raw: &str,
    cfg: &FilterConfig,
) {
    match kind {
        DirectiveKind::Match | DirectiveKind::Softmatch => {
            if !service_accepted(service, cfg) {
                return;
            }
            let line = if kind == DirectiveKind::Softmatch && cfg.demote_softmatch {
                raw.replacen("softmatch", "match", 1)
            } else {
                raw.to_owned()
            };
            section.lines.push(line);
            section.match_found = true;
        }
        DirectiveKind::Sslports if cfg.no_ssl => {}
        DirectiveKind::Sslports | DirectiveKind::Other => section.lines.push(raw.to_owned()),
    }
}

/// Whether a signature for `service` is kept.
pub fn service_accepted(service: &str, cfg: &FilterConfig) -> bool {
    if cfg.services.matches(service) || service == TCPWRAPPED {
        return true;
    }
    if cfg.no_ssl {
        return false;
    }
    service == SSL_SERVICE
        || service
            .strip_prefix(SSL_TUNNEL_PREFIX)
            .is_some_and(|tunnelled| cfg.services.contains(tunnelled))
}

fn section_verdict(section: &Section, cfg: &FilterConfig) -> Result<(), DropReason> {
    if !section.match_found {
        return Err(DropReason::NoMatchingDirective);
    }
    probe_verdict(section.probe.as_deref(), cfg)
}

/// Applies the probe-name rules to a section that has a matching signature.
///
/// The exclusion list always wins over the allow-list. An absent name never
/// matches either list.
pub fn probe_verdict(probe: Option<&str>, cfg: &FilterConfig) -> Result<(), DropReason> {
    let listed = |set: &Option<BTreeSet<String>>| {
        probe.is_some_and(|name| set.as_ref().is_some_and(|set| set.contains(name)))
    };

    if listed(&cfg.excluded_probes) {
        return Err(DropReason::Excluded);
    }

    let ssl_probe = probe.is_some_and(is_ssl_probe);
    match &cfg.allowed_probes {
        Some(_) if listed(&cfg.allowed_probes) => Ok(()),
        Some(_) if !cfg.no_ssl && ssl_probe => Ok(()),
        Some(_) => Err(DropReason::NotAllowed),
        None if cfg.no_ssl && (ssl_probe || probe == Some(LEGACY_SSL_PROBE)) => {
            Err(DropReason::SslSuppressed)
        }
        None => Ok(()),
    }
}
