use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration, read from the environment.
///
/// `PORT` picks the listen port, `FRONTEND_URL` the allowed CORS origin
/// (`*` for any), and `WORK_DIR` where per-request scratch directories are
/// created.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub frontend_url: String,
    pub work_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            frontend_url: "*".to_string(),
            work_dir: env::temp_dir(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            work_dir: env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
        }
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
