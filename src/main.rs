use rayscript::bindings::{BindingAdapter, JsBindingAdapter};
use rayscript::bridge::Bridge;
use rayscript::config::BridgeConfig;
use rayscript::core::{init_logging, RayscriptError, RayscriptResult, ScriptError};
use rayscript::raylib::Raylib;
use std::path::PathBuf;

const USAGE: &str = "rayscript <script.js> [--config <path>] [--frames <n>]\n       rayscript --write-config <path> [--config <path>]";

struct Args {
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    frames: Option<u64>,
    write_config: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> RayscriptResult<Args> {
    let mut script = None;
    let mut config = None;
    let mut frames = None;
    let mut write_config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| RayscriptError::Usage(USAGE.to_string()))?;
                config = Some(PathBuf::from(path));
            }
            "--frames" => {
                let n = args
                    .next()
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| RayscriptError::Usage(USAGE.to_string()))?;
                frames = Some(n);
            }
            "--write-config" => {
                let path = args
                    .next()
                    .ok_or_else(|| RayscriptError::Usage(USAGE.to_string()))?;
                write_config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => return Err(RayscriptError::Usage(USAGE.to_string())),
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            _ => return Err(RayscriptError::Usage(USAGE.to_string())),
        }
    }

    if script.is_none() && write_config.is_none() {
        return Err(RayscriptError::Usage(USAGE.to_string()));
    }
    Ok(Args {
        script,
        config,
        frames,
        write_config,
    })
}

fn load_config(args: &Args) -> RayscriptResult<BridgeConfig> {
    let mut config = match &args.config {
        Some(path) => BridgeConfig::from_file(path)?,
        None => BridgeConfig::load_or_default(),
    };
    config.apply_env_overrides();
    if let Some(frames) = args.frames {
        config.host.max_frames = frames;
    }
    config.validate()?;
    Ok(config)
}

fn run_script<R: Raylib + 'static>(rl: R, config: &BridgeConfig, source: &str) -> RayscriptResult<()> {
    let bridge = Bridge::new(rl, &config.host);
    let mut js = JsBindingAdapter::new(bridge, &config.host)?;
    js.init()?;
    let result = js.execute_script(source);
    js.shutdown();
    Ok(result?)
}

fn run() -> RayscriptResult<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = load_config(&args)?;
    init_logging(&config.logging)?;

    if let Some(path) = &args.write_config {
        config.save(path)?;
        tracing::info!(target: "rayscript", path = %path.display(), "Configuration written");
        return Ok(());
    }
    let Some(script) = &args.script else {
        return Err(RayscriptError::Usage(USAGE.to_string()));
    };

    let source = std::fs::read_to_string(script)
        .map_err(|_| ScriptError::NotFound(script.display().to_string()))?;
    tracing::info!(target: "rayscript", script = %script.display(), "Running script");

    #[cfg(feature = "native")]
    return run_script(rayscript::raylib::NativeRaylib::new(&config), &config, &source);

    #[cfg(not(feature = "native"))]
    run_script(rayscript::raylib::HeadlessRaylib::from_config(&config), &config, &source)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("rayscript: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> RayscriptResult<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["game.js", "--frames", "5"]).unwrap();
        assert_eq!(parsed.script, Some(PathBuf::from("game.js")));
        assert_eq!(parsed.frames, Some(5));

        let parsed = args(&["--write-config", "rayscript.toml"]).unwrap();
        assert_eq!(parsed.write_config, Some(PathBuf::from("rayscript.toml")));
        assert!(parsed.script.is_none());

        assert!(args(&[]).is_err());
        assert!(args(&["--frames", "many", "game.js"]).is_err());
        assert!(args(&["a.js", "b.js"]).is_err());
    }
}
