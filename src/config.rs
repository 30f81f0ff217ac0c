//
// Copyright (c) 2019 Stegos AG
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use failure::Fail;
use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;
use std::result::Result;
use toml;

/// Configuration root
///
/// Every member of this structure is deserialized from corresponding section
/// of ecsol.toml file.
///
/// Don't forget to update ecsol.toml.example after adding new options.
///
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Key input/output settings.
    pub keys: KeysConfig,
}

/// General configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log4RS configuration file, console logging is used when it is missing
    pub log4rs_config: String,
    /// Console log level: error, warn, info, debug or trace
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log4rs_config: "ecsol-log4rs.toml".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// How coordinates are printed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// SEC1 encoding and zero-padded hex coordinates.
    Hex,
    /// Decimal coordinates.
    Dec,
}

/// Key configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct KeysConfig {
    pub format: OutputFormat,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            format: OutputFormat::Hex,
        }
    }
}

/// Error type for wrapping configuration errors.
#[derive(Debug, Fail)]
pub enum ConfigError {
    /// Caused if configuration file is missing.
    #[fail(display = "Configuration file not found.")]
    NotFoundError,
    /// Caused on input/output errors.
    #[fail(display = "Failed to read configuration file: {}.", _0)]
    IOError(io::Error),
    /// Caused by parse errors.
    #[fail(display = "Failed to parse configuration file: {}.", _0)]
    ParseError(toml::de::Error),
}

///
/// Load configuration file
///
/// # Arguments
///
/// * `cfg_path` - A path to configuration file
///
/// # Errors
///
/// Returns ConfigError on error.
///
pub fn from_file<P: AsRef<Path>>(cfg_path: P) -> Result<Config, ConfigError> {
    let mut f = match File::open(cfg_path) {
        Ok(f) => f,
        Err(ref e) if e.kind() == ErrorKind::NotFound => return Err(ConfigError::NotFoundError),
        Err(e) => return Err(ConfigError::IOError(e)),
    };

    let mut contents = String::new();
    if let Err(e) = f.read_to_string(&mut contents) {
        return Err(ConfigError::IOError(e));
    }
    drop(f);

    from_str(&contents)
}

/// Parse configuration from TOML text.
pub fn from_str(contents: &str) -> Result<Config, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::ParseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = from_str("").unwrap();
        assert_eq!(cfg.general.log_level, "info");
        assert_eq!(cfg.keys.format, OutputFormat::Hex);
    }

    #[test]
    fn partial_sections() {
        let cfg = from_str("[keys]\nformat = \"dec\"\n").unwrap();
        assert_eq!(cfg.keys.format, OutputFormat::Dec);
        assert_eq!(cfg.general.log_level, "info");

        let cfg = from_str("[general]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(cfg.general.log_level, "debug");
        assert_eq!(cfg.keys.format, OutputFormat::Hex);
    }

    #[test]
    fn bad_format() {
        match from_str("[keys]\nformat = \"base58\"\n") {
            Err(ConfigError::ParseError(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_file() {
        match from_file("/nonexistent/ecsol.toml") {
            Err(ConfigError::NotFoundError) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}
