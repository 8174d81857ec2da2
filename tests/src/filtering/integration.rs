use std::collections::BTreeSet;

use probekit_common::config::{FilterConfig, ServiceFilter};
use probekit_common::error::ProbeFileError;
use probekit_core::file;
use probekit_core::filter::{DropReason, FilterOutcome, filter_lines};

use crate::fixture::{probes_path, scratch_path};

fn load() -> Vec<String> {
    file::read_lines(&probes_path()).expect("fixture should load")
}

fn run(cfg: &FilterConfig) -> FilterOutcome {
    filter_lines(&load(), cfg)
}

fn services(list: &[&str]) -> ServiceFilter {
    ServiceFilter::from_list(list.iter().copied())
}

fn probes(list: &[&str]) -> Option<BTreeSet<String>> {
    FilterConfig::probe_set(Some(list.iter().copied()))
}

/*************************************************************
                   Service filter scenarios
**************************************************************/

#[test]
fn http_keeps_matching_sections_and_ssl_helpers() {
    let cfg = FilterConfig {
        services: services(&["http"]),
        ..Default::default()
    };
    let out = run(&cfg);

    assert_eq!(
        out.kept,
        vec!["GenericLines", "GetRequest", "SSLSessionReq", "TLSSessionReq"]
    );
    assert_eq!(out.lines[0], "Exclude T:9100-9107");
    assert!(!out.lines.iter().any(|l| l.trim_start().starts_with('#') || l.trim().is_empty()));
    assert!(out.lines.iter().any(|l| l.starts_with("match ssl/http ")));
    assert!(!out.lines.iter().any(|l| l.starts_with("match ssl/imap ")));
    assert!(!out.lines.iter().any(|l| l.starts_with("match https ")));
    assert_eq!(out.dropped.get(&DropReason::NoMatchingDirective), Some(&2));
}

#[test]
fn get_request_section_is_emitted_unchanged() {
    let cfg = FilterConfig {
        services: services(&["http"]),
        ..Default::default()
    };
    let out = run(&cfg);

    let start = out
        .lines
        .iter()
        .position(|l| l.starts_with("Probe TCP GetRequest "))
        .expect("GetRequest section kept");
    let section: Vec<&str> = out.lines[start..start + 8].iter().map(String::as_str).collect();
    assert_eq!(
        section,
        vec![
            r"Probe TCP GetRequest q|GET / HTTP/1.0\r\n\r\n|",
            "rarity 1",
            "ports 1,70,79,80-85,88,113,139,143,280,497,505,514,515,540,554,591,620,631",
            "sslports 443,4443,8443",
            "fallback GenericLines",
            r"match http m|^HTTP/1\.[01] \d\d\d .*\r\nServer: nginx/([\d.]+)|s p/nginx/ v/$1/",
            r"match http m|^HTTP/1\.[01] \d\d\d .*\r\nServer: Apache/([\d.]+)|s p/Apache httpd/ v/$1/",
            r"softmatch http m|^HTTP/1\.[01] \d\d\d|",
        ]
    );
    assert!(out.lines[start + 8].starts_with("Probe "));
}

#[test]
fn unmatched_service_drops_every_section_without_tcpwrapped() {
    let cfg = FilterConfig {
        services: services(&["gopher"]),
        ..Default::default()
    };
    let out = run(&cfg);

    // GenericLines survives on its tcpwrapped signature; the SSL probes on `match ssl`.
    assert_eq!(out.kept, vec!["GenericLines", "SSLSessionReq", "TLSSessionReq"]);
    assert!(!out.lines.iter().any(|l| l.starts_with("match http ")));
}

#[test]
fn wildcard_keeps_every_signature() {
    let out = run(&FilterConfig::default());
    let input = load();

    let signatures = |lines: &[String]| {
        lines
            .iter()
            .filter(|l| l.starts_with("match ") || l.starts_with("softmatch "))
            .count()
    };
    assert_eq!(signatures(&out.lines), signatures(&input));
    assert_eq!(out.dropped_total(), 0);
}

/*************************************************************
                     SSL suppression
**************************************************************/

#[test]
fn suppression_removes_sslports_and_ssl_signatures() {
    let cfg = FilterConfig {
        services: services(&["http", "imap"]),
        no_ssl: true,
        ..Default::default()
    };
    let out = run(&cfg);

    assert_eq!(out.kept, vec!["GenericLines", "GetRequest"]);
    assert!(!out.lines.iter().any(|l| l.starts_with("sslports")));
    assert!(!out.lines.iter().any(|l| l.starts_with("match ssl")));
}

#[test]
fn suppression_drops_ssl_probes_even_with_wildcard() {
    let cfg = FilterConfig {
        no_ssl: true,
        ..Default::default()
    };
    let out = run(&cfg);

    assert_eq!(
        out.kept,
        vec!["NULL", "GenericLines", "GetRequest", "DNSStatusRequest"]
    );
    assert_eq!(out.dropped.get(&DropReason::SslSuppressed), Some(&2));
}

#[test]
fn ssl_session_probe_with_https_is_dropped_under_suppression() {
    let input = [
        "Probe TCP SSLSessionReq q|\\x16\\x03|",
        "match https m|^HTTP/1\\.1 400|",
    ];
    let cfg = FilterConfig {
        services: services(&["https"]),
        no_ssl: true,
        ..Default::default()
    };
    let out = filter_lines(&input, &cfg);

    assert!(out.lines.is_empty());
    assert_eq!(out.dropped.get(&DropReason::SslSuppressed), Some(&1));
}

/*************************************************************
                   Probe allow and deny lists
**************************************************************/

#[test]
fn deny_list_wins_over_allow_list() {
    let cfg = FilterConfig {
        allowed_probes: probes(&["GetRequest", "NULL"]),
        excluded_probes: probes(&["GetRequest"]),
        ..Default::default()
    };
    let out = run(&cfg);

    assert_eq!(out.kept, vec!["NULL", "SSLSessionReq", "TLSSessionReq"]);
    assert_eq!(out.dropped.get(&DropReason::Excluded), Some(&1));
    assert_eq!(out.dropped.get(&DropReason::NotAllowed), Some(&2));
}

#[test]
fn allow_list_under_suppression_has_no_ssl_exception() {
    let cfg = FilterConfig {
        allowed_probes: probes(&["GetRequest"]),
        no_ssl: true,
        ..Default::default()
    };
    let out = run(&cfg);

    assert_eq!(out.kept, vec!["GetRequest"]);
}

/*************************************************************
                   Softmatch demotion
**************************************************************/

#[test]
fn demotion_rewrites_only_kept_softmatches() {
    let cfg = FilterConfig {
        services: services(&["ftp"]),
        demote_softmatch: true,
        ..Default::default()
    };
    let out = run(&cfg);

    assert!(!out.lines.iter().any(|l| l.starts_with("softmatch")));
    assert!(out.lines.iter().any(|l| l == "match ftp m|^220[- ].*FTP|i"));
    assert!(!out.lines.iter().any(|l| l.contains("SMTP")));
}

/*************************************************************
                   Whole-file round trips
**************************************************************/

#[test]
fn refiltering_written_output_is_stable() -> anyhow::Result<()> {
    let cfg = FilterConfig {
        services: services(&["ssh", "http"]),
        excluded_probes: probes(&["NULL"]),
        no_ssl: true,
        demote_softmatch: true,
        ..Default::default()
    };
    let path = scratch_path("refilter");

    let first = run(&cfg);
    file::write_lines(&path, &first.lines)?;
    let second = filter_lines(&file::read_lines(&path)?, &cfg);
    let _ = std::fs::remove_file(&path);

    assert_eq!(first.lines, second.lines);
    assert_eq!(first.kept, second.kept);
    Ok(())
}

#[test]
fn missing_input_is_reported() {
    let err = file::read_lines(&scratch_path("absent")).unwrap_err();
    assert!(matches!(err, ProbeFileError::MissingInputFile { .. }));
}
