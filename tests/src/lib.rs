#[cfg(test)]
mod filtering;

#[cfg(test)]
pub(crate) mod fixture {
    use std::path::PathBuf;

    pub fn probes_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/nmap-service-probes")
    }

    pub fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("probekit-it-{}-{name}", std::process::id()))
    }
}
