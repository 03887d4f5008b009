use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tally_core::Vocabulary;

use crate::state::ensure_tally_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParserSection {
    /// IANA timezone used for "now" and for relative dates
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Optional vocabulary TOML replacing the built-in keyword tables
    pub vocabulary: Option<PathBuf>,
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            vocabulary: None,
        }
    }
}

fn default_timezone() -> String {
    "Asia/Shanghai".to_string()
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(s).context("parse config.toml")?;
        tally_core::parse_timezone(&cfg.parser.timezone)?;
        Ok(cfg)
    }

    /// Load the configured vocabulary file, if any.
    pub fn load_vocabulary(&self) -> Result<Option<Vocabulary>> {
        let Some(path) = &self.parser.vocabulary else {
            return Ok(None);
        };
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let vocab = Vocabulary::from_toml_str(&s).with_context(|| format!("load {}", path.display()))?;
        Ok(Some(vocab))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Config::from_toml_str(&s).with_context(|| format!("load {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
