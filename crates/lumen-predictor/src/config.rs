use std::path::PathBuf;

use clap::Parser;
use lumen_engine::logging::LoggingConfig;
use lumen_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

/// Fonts tried, in order, when `--font` is not given.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

#[derive(Parser, Debug, Clone)]
#[command(name = "lumen-predictor", about = "Prediction API client", version)]
pub struct Cli {
    /// Base URL of the prediction API (e.g. http://localhost:8080)
    #[arg(long, env = "LUMEN_API_BASE", default_value = "")]
    pub api_base: String,

    /// HTTP basic credentials as `user:password`
    #[arg(long, env = "LUMEN_API_BASIC")]
    pub basic_auth: Option<String>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1100.0)]
    pub width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,

    /// TTF/OTF font file; falls back to common system fonts
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub user: String,
    pub password: Option<String>,
}

impl BasicAuth {
    /// `user:password`, or a bare user name. Empty input is no credential.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        Some(match s.split_once(':') {
            Some((user, password)) => Self { user: user.to_string(), password: Some(password.to_string()) },
            None => Self { user: s.to_string(), password: None },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Empty when not configured.
    pub base_url: String,
    pub basic_auth: Option<BasicAuth>,
}

impl ApiConfig {
    #[inline]
    pub fn has_basic_auth(&self) -> bool {
        self.basic_auth.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub window: RuntimeConfig,
    pub logging: LoggingConfig,
    pub font_paths: Vec<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        let font_paths = match self.font {
            Some(path) => vec![path],
            None => SYSTEM_FONTS.iter().map(PathBuf::from).collect(),
        };

        AppConfig {
            api: ApiConfig {
                base_url: self.api_base.trim().to_string(),
                basic_auth: self.basic_auth.as_deref().and_then(BasicAuth::parse),
            },
            window: RuntimeConfig {
                title: "L-Nutra Predictor".to_string(),
                initial_size: LogicalSize::new(self.width.max(320.0), self.height.max(240.0)),
            },
            logging: LoggingConfig { env_filter: self.log, ..Default::default() },
            font_paths,
        }
    }
}

/// Reads the first font file that exists.
pub fn load_font_bytes(paths: &[PathBuf]) -> Option<Vec<u8>> {
    paths.iter().find_map(|p| match std::fs::read(p) {
        Ok(bytes) => {
            log::info!("using font {}", p.display());
            Some(bytes)
        }
        Err(err) => {
            log::debug!("font {} unavailable: {err}", p.display());
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lumen-predictor").chain(args.iter().copied()))
            .expect("valid args")
    }

    #[test]
    fn basic_auth_splits_on_first_colon() {
        assert_eq!(
            BasicAuth::parse("ops:s3:cret"),
            Some(BasicAuth { user: "ops".into(), password: Some("s3:cret".into()) })
        );
        assert_eq!(BasicAuth::parse("ops"), Some(BasicAuth { user: "ops".into(), password: None }));
        assert_eq!(BasicAuth::parse(""), None);
    }

    #[test]
    fn cli_builds_config() {
        let cfg = parse(&["--api-base", " http://localhost:8080 ", "--basic-auth", "a:b", "--width", "900"])
            .into_config();
        assert_eq!(cfg.api.base_url, "http://localhost:8080");
        assert!(cfg.api.has_basic_auth());
        assert_eq!(cfg.window.initial_size.width, 900.0);
        assert_eq!(cfg.window.initial_size.height, 720.0);
    }

    #[test]
    fn explicit_font_replaces_system_list() {
        let cfg = parse(&["--font", "/tmp/x.ttf"]).into_config();
        assert_eq!(cfg.font_paths, vec![PathBuf::from("/tmp/x.ttf")]);
    }

    #[test]
    fn missing_fonts_yield_none() {
        assert!(load_font_bytes(&[PathBuf::from("/definitely/not/here.ttf")]).is_none());
    }
}
