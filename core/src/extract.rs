use probekit_common::probe::Line;
use tracing::trace;

/// Lists the probes that carry a signature for `service`.
///
/// A line counts when it starts with `match <service> ` or
/// `softmatch <service> ` exactly. Each probe name is reported once, in the
/// order it was first seen. Signatures before the first header, or under a
/// header without a name, are not attributed to any probe.
pub fn probe_names<S: AsRef<str>>(lines: &[S], service: &str) -> Vec<String> {
    let match_prefix = format!("match {service} ");
    let softmatch_prefix = format!("softmatch {service} ");

    let mut names: Vec<String> = Vec::new();
    let mut current: Option<&str> = None;

    for line in lines {
        let line = line.as_ref();

        if let Line::ProbeHeader { probe, .. } = Line::classify(line) {
            current = probe;
            continue;
        }

        if !(line.starts_with(&match_prefix) || line.starts_with(&softmatch_prefix)) {
            continue;
        }

        if let Some(name) = current {
            if !names.iter().any(|seen| seen == name) {
                trace!(probe = name, service, "probe identifies service");
                names.push(name.to_owned());
            }
        }
    }

    names
}
