use depositor::pipeline::config::{Config, DEFAULT_CONFIG_FILE};
use depositor::pipeline::main_cli;
use std::error::Error;

/// Remove `--config PATH` (or `--config=PATH`) from the arguments.
fn take_config_path(args: &mut Vec<String>) -> Result<String, Box<dyn Error>> {
    if let Some(pos) = args.iter().position(|a| a.starts_with("--config=")) {
        let arg = args.remove(pos);
        return Ok(arg["--config=".len()..].to_string());
    }
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        if pos + 1 >= args.len() {
            return Err("missing value for --config".into());
        }
        let path = args.remove(pos + 1);
        args.remove(pos);
        return Ok(path);
    }
    Ok(DEFAULT_CONFIG_FILE.to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = take_config_path(&mut args)?;
    let config = Config::load_or_default(&config_path)?;

    depositor::init_tracing(&config.logging.filter);

    main_cli(&args, &config)?;
    Ok(())
}
