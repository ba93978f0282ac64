//! Command-line flags. Mirrors `cmd/revocation-server/server.go`'s `flag.*`
//! declarations one-for-one (names, defaults, and help text).

use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Certificate revocation log server")]
pub struct Args {
    /// Listen address:port for HTTP server
    #[arg(long, default_value = ":8080")]
    pub listen: String,

    /// Highest serial number the server can store, affects tree height
    #[arg(long, default_value_t = 1_000_000)]
    pub max_certs: u64,

    /// File containing pem-encoded SSL certificate
    #[arg(long, default_value = "testdata/root.cert")]
    pub cert_file: String,

    /// Duration corresponding to mmd for log, valid time units are ns,us,ms,s,m,h
    #[arg(long, default_value = "24h")]
    pub mmd: String,

    /// Private key for revocation server
    #[arg(long, default_value = "testdata/key.pem")]
    pub key: String,
}

impl Args {
    /// `--listen` follows Go's `net.Listen` convention of a bare `:port`
    /// meaning "all interfaces"; `axum`/`tokio` want a full socket address.
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        let addr = if let Some(port) = self.listen.strip_prefix(':') {
            format!("0.0.0.0:{port}")
        } else {
            self.listen.clone()
        };
        Ok(addr.parse()?)
    }
}
