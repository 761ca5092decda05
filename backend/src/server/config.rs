//! HTTP server configuration object and helpers.
//!
//! Configuration comes from the environment: the bind address and the JWT
//! signing secret. The secret is read from a file in production; a missing
//! secret is tolerated only in debug builds or when explicitly allowed,
//! in which case an ephemeral secret is generated and every token dies
//! with the process.

use std::env;
use std::net::SocketAddr;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SECRET_PATH: &str = "/var/run/secrets/jwt_secret";
const EPHEMERAL_SECRET_LEN: usize = 32;

/// Runtime configuration for the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
}

impl ServerConfig {
    /// Construct a configuration from explicit values.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            jwt_secret,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `BIND_ADDR` sets the listen address. The signing secret comes from
    /// the file named by `JWT_SECRET_FILE`, falling back to the `JWT_SECRET`
    /// variable. Without either, debug builds (or `JWT_ALLOW_EPHEMERAL=1`)
    /// generate a throwaway secret; release builds refuse to start.
    pub fn from_env() -> std::io::Result<Self> {
        let raw_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr = raw_addr.parse().map_err(|err| {
            std::io::Error::other(format!("invalid BIND_ADDR {raw_addr}: {err}"))
        })?;

        Ok(Self::new(bind_addr, read_jwt_secret()?))
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

fn read_jwt_secret() -> std::io::Result<Zeroizing<Vec<u8>>> {
    let secret_path =
        env::var("JWT_SECRET_FILE").unwrap_or_else(|_| DEFAULT_SECRET_PATH.to_owned());
    match std::fs::read(&secret_path) {
        Ok(bytes) => Ok(Zeroizing::new(bytes)),
        Err(file_err) => {
            if let Ok(value) = env::var("JWT_SECRET") {
                return Ok(Zeroizing::new(value.into_bytes()));
            }
            let allow_dev = env::var("JWT_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %secret_path, error = %file_err, "using ephemeral JWT secret (dev only)");
                Ok(generate_ephemeral_secret())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read JWT secret at {secret_path}: {file_err}"
                )))
            }
        }
    }
}

fn generate_ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    OsRng.fill_bytes(&mut secret);
    secret
}
