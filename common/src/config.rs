use std::collections::BTreeSet;

/// Service name that makes every `match`/`softmatch` directive eligible.
pub const WILDCARD: &str = "*";

/// Terminal presentation options for one run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the startup banner.
    pub no_banner: bool,

    /// Controls the visual density of the terminal output.
    ///
    /// # Levels
    /// * **0** (Default): Banner, headers and a run summary.
    /// * **1**: Reduced styling, no banner or headers.
    /// * **2**: Raw mode. Only data is printed, suitable for piping.
    pub quiet: u8,

    /// Raises the log level: `1` enables debug events, `2` and above trace.
    pub verbose: u8,
}

/// The set of services a filter run keeps signatures for.
///
/// Holding [`WILDCARD`] turns the filter into "any service".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFilter {
    services: BTreeSet<String>,
}

impl ServiceFilter {
    /// A filter that accepts every service.
    pub fn any() -> Self {
        Self::from_iter([WILDCARD])
    }

    /// Builds a filter from user input; no services at all means [`ServiceFilter::any`].
    pub fn from_list<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let filter = Self::from_iter(services);
        if filter.services.is_empty() {
            Self::any()
        } else {
            filter
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.services.contains(WILDCARD)
    }

    /// Literal membership or wildcard.
    pub fn matches(&self, service: &str) -> bool {
        self.is_wildcard() || self.services.contains(service)
    }

    /// Literal membership only, used for the `ssl/<service>` tunnel form.
    pub fn contains(&self, service: &str) -> bool {
        self.services.contains(service)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(String::as_str)
    }
}

impl Default for ServiceFilter {
    fn default() -> Self {
        Self::any()
    }
}

impl<S: Into<String>> FromIterator<S> for ServiceFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            services: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Resolved filtering options for one pass over a probe file.
///
/// Built once by the caller and handed to the filter by reference; the
/// filter never consults anything else.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Services whose `match`/`softmatch` directives are kept.
    pub services: ServiceFilter,

    /// Probes allowed through. `None` allows every probe.
    pub allowed_probes: Option<BTreeSet<String>>,

    /// Probes always dropped, even when also allowed.
    pub excluded_probes: Option<BTreeSet<String>>,

    /// Drops SSL negotiation probes, `sslports` lines and `ssl` signatures.
    pub no_ssl: bool,

    /// Rewrites accepted `softmatch` directives to `match`.
    pub demote_softmatch: bool,
}

impl FilterConfig {
    /// Turns an optional list of probe names into a probe set.
    ///
    /// An empty list is the same as no list at all.
    pub fn probe_set<I, S>(probes: Option<I>) -> Option<BTreeSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = probes?.into_iter().map(Into::into).collect();
        (!set.is_empty()).then_some(set)
    }
}
