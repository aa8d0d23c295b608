//! `extract` subcommand — recover a private scalar from a container.

use std::fs;

use gost_pki::container::Container;

pub fn run(
    container_path: &str,
    password: &str,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let container = Container::open(container_path)?;
    tracing::info!(
        path = container_path,
        curve_oid = container.curve_oid(),
        "container opened"
    );

    let bundle = container.extract(password)?;
    tracing::info!(
        curve_oid = bundle.curve_oid.as_str(),
        fingerprint = %hex(&bundle.fingerprint),
        "primary key extracted"
    );
    println!("{}", hex(&bundle.private_key));

    if let Some(prefix) = output {
        let bin_file = format!("{prefix}_primary.bin");
        fs::write(&bin_file, &bundle.private_key)?;
        tracing::info!(file = %bin_file, "key saved");

        let hex_file = format!("{prefix}_primary.hex");
        fs::write(&hex_file, hex(&bundle.private_key))?;
        tracing::info!(file = %hex_file, "hex saved");
    }

    if container.secondary_slot_present() {
        tracing::warn!(
            masks = "masks2.key",
            primary = "primary2.key",
            "secondary key found but not extracted"
        );
    }

    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
