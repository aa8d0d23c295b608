//! `sign` subcommand — extract a key and produce a detached CMS blob.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use gost_crypto::gost3410::PrivateKey;
use gost_pki::cms::{format_signing_time, Signer};
use gost_pki::container::Container;

pub fn run(
    container_path: &str,
    password: &str,
    cert: Option<&str>,
    input: &str,
    output: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let container = Container::open(container_path)?;
    let bundle = container.extract(password)?;
    let private_key = PrivateKey::new(container.curve_id(), &bundle.private_key)?;
    tracing::info!(
        curve_oid = bundle.curve_oid.as_str(),
        "private key ready"
    );

    let cert_path = match cert {
        Some(path) => path.to_string(),
        None => Path::new(container_path)
            .join("certificate.cer")
            .to_string_lossy()
            .into_owned(),
    };
    let cert_der = fs::read(&cert_path)?;
    tracing::info!(path = %cert_path, bytes = cert_der.len(), "certificate loaded");

    let message = fs::read(input)?;
    let signer = Signer::new(private_key, &cert_der)?;
    let cms = signer.sign(&message)?;
    fs::write(output, &cms)?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    tracing::info!(
        output,
        bytes = cms.len(),
        signed_at = %format_signing_time(now, 0),
        "detached CMS written"
    );

    Ok(())
}
