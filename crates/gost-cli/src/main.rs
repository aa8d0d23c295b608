use clap::{Parser, Subcommand};

mod extract;
mod sign;

/// Key-container extraction and CMS signing for ESIA.
#[derive(Parser)]
#[command(name = "esia-gost")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the private key from a CryptoPro container.
    Extract {
        /// Container directory (e.g. ./container.000).
        container: String,
        /// Container password (PIN).
        #[arg(short, long, default_value = "")]
        password: String,
        /// Output file prefix; writes <prefix>_primary.bin and
        /// <prefix>_primary.hex when given.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Produce a detached CMS (PKCS#7) signature over a file.
    Sign {
        /// Container directory holding the key.
        #[arg(short, long)]
        container: String,
        /// Container password (PIN).
        #[arg(short, long, default_value = "")]
        password: String,
        /// DER certificate; defaults to certificate.cer inside the
        /// container.
        #[arg(long)]
        cert: Option<String>,
        /// File with the message to sign.
        #[arg(short, long)]
        input: String,
        /// Where to write the CMS DER.
        #[arg(short, long)]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Extract {
            container,
            password,
            output,
        } => extract::run(&container, &password, output.as_deref()),
        Commands::Sign {
            container,
            password,
            cert,
            input,
            output,
        } => sign::run(&container, &password, cert.as_deref(), &input, &output),
    };

    if let Err(e) = result {
        tracing::error!(error = %error_chain(e.as_ref()), "command failed");
        std::process::exit(1);
    }
}

/// Render an error with its full cause chain, one line.
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut cause = e.source();
    while let Some(c) = cause {
        out.push_str(": ");
        out.push_str(&c.to_string());
        cause = c.source();
    }
    out
}
