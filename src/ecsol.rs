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

mod config;
mod consts;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use ecsol_crypto::secp256k1::{self, Fq, PublicKey, SecretKey};
use failure::{bail, format_err, Error};
use log::*;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle as LogHandle;
use std::path::PathBuf;
use std::process;

use crate::config::{Config, ConfigError, OutputFormat};

fn load_configuration(args: &ArgMatches<'_>) -> Result<Config, Error> {
    if let Some(cfg_path) = args.value_of_os("config") {
        // Use --config argument for configuration.
        return Ok(config::from_file(cfg_path)?);
    }

    // Use ~/.config/ecsol.toml for configuration.
    let cfg_path = dirs::config_dir()
        .unwrap_or(PathBuf::from(r"."))
        .join(PathBuf::from(consts::CONFIG_FILE_NAME));
    match config::from_file(cfg_path) {
        Ok(cfg) => Ok(cfg),
        // Don't raise an error on missing configuration file.
        Err(ConfigError::NotFoundError) => Ok(Default::default()),
        Err(e) => Err(e.into()),
    }
}

fn initialize_logger(cfg: &Config) -> Result<LogHandle, Error> {
    // Try to load log4rs config file
    let path = PathBuf::from(&cfg.general.log4rs_config);
    if path.exists() {
        match log4rs::load_config_file(&path, Default::default()) {
            Ok(config) => return Ok(log4rs::init_config(config)?),
            Err(e) => eprintln!("Failed to read log4rs config file: {}", e),
        }
    }

    let level: LevelFilter = cfg
        .general
        .log_level
        .parse()
        .map_err(|_| format_err!("Invalid log level: {}", cfg.general.log_level))?;
    // stdout is reserved for results
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)(local)} {h({l})} {M}: {m}{n}",
        )))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(log4rs::init_config(config)?)
}

fn parse_secret(args: &ArgMatches<'_>) -> Result<SecretKey, Error> {
    let s = args.value_of("SECRET").ok_or(format_err!("Missing secret key"))?;
    Ok(SecretKey::from_hex(s)?)
}

fn parse_public(args: &ArgMatches<'_>) -> Result<PublicKey, Error> {
    let s = args.value_of("PUBKEY").ok_or(format_err!("Missing public key"))?;
    Ok(PublicKey::from_hex(s)?)
}

fn format_point(format: OutputFormat, x: &Fq, y: &Fq) -> String {
    match format {
        OutputFormat::Hex => format!("x: {}\ny: {}", x.to_hex(), y.to_hex()),
        OutputFormat::Dec => format!("x: {}\ny: {}", x, y),
    }
}

fn print_public(format: OutputFormat, pkey: &PublicKey) {
    if format == OutputFormat::Hex {
        println!("public: {}", pkey.to_hex());
    }
    println!("{}", format_point(format, pkey.x(), pkey.y()));
}

fn run() -> Result<(), Error> {
    let version = env!("CARGO_PKG_VERSION");
    let secret_arg = Arg::with_name("SECRET")
        .index(1)
        .required(true)
        .takes_value(true)
        .help("Secret scalar in hex");

    let args = App::new(consts::NAME)
        .version(version)
        .author("Stegos AG <info@stegos.com>")
        .about("secp256k1 public keys and Diffie-Hellman shared secrets.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Path to ecsol.toml configuration file")
                .takes_value(true),
        )
        .subcommand(
            SubCommand::with_name("pubkey")
                .about("Compute the public key of a secret scalar")
                .arg(secret_arg.clone()),
        )
        .subcommand(
            SubCommand::with_name("derive")
                .about("Compute the shared secret of a secret scalar and a public key")
                .arg(secret_arg)
                .arg(
                    Arg::with_name("PUBKEY")
                        .index(2)
                        .required(true)
                        .takes_value(true)
                        .help("SEC1 uncompressed public key in hex (04 || x || y)"),
                ),
        )
        .subcommand(SubCommand::with_name("keygen").about("Generate a random key pair"))
        .get_matches();

    // Parse configuration
    let cfg = load_configuration(&args)?;

    // Initialize logger
    initialize_logger(&cfg)?;
    debug!("{} {}", consts::NAME, version);

    let format = cfg.keys.format;
    match args.subcommand() {
        ("pubkey", Some(m)) => {
            let skey = parse_secret(m)?;
            let pkey = PublicKey::from(&skey);
            print_public(format, &pkey);
        }
        ("derive", Some(m)) => {
            let skey = parse_secret(m)?;
            let pkey = parse_public(m)?;
            let shared = secp256k1::derive_key(&skey, &pkey);
            println!("{}", format_point(format, shared.x(), shared.y()));
        }
        ("keygen", _) => {
            let (skey, pkey) = secp256k1::make_random_keys();
            println!("secret: {}", skey.to_hex());
            print_public(format, &pkey);
        }
        (cmd, _) => bail!("Unknown command: {}", cmd),
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Failed with error: {}", e); // Logger can be not yet initialized.
        error!("{}", e);
        process::exit(1)
    };
}
