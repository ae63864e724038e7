//! riemann-render - headless Riemann-sum plot renderer.
//!
//! Renders every built-in function under every rule to PNG and SVG.
//!
//! ```text
//! riemann-render [CONFIG.yaml] [OUTPUT_DIR]
//! ```

use env_logger::Env;
use log::{debug, error, info};
use riemann_viz::prelude::*;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
        None => Config::new(),
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "riemann-out".to_string()));

    if let Err(e) = run(&config, &out_dir) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(config: &Config, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;
    let mut explorer = Explorer::new(config)?;

    for function in Function::ALL {
        explorer.apply(Action::SelectFunction(function))?;
        for rule in QuadratureRule::ALL {
            explorer.apply(Action::SelectRule(rule))?;

            let stem = format!("{}_{}", function.slug(), rule.label());
            let svg = explorer.render_svg()?;
            svg.write_to_file(out_dir.join(format!("{stem}.svg")))?;
            let fb = explorer.render_raster()?;
            let (min, max, mean) = fb.luminance_stats();
            debug!("{stem}: luminance min {min:.1} max {max:.1} mean {mean:.1}");
            PngEncoder::write_to_file(&fb, out_dir.join(format!("{stem}.png")))?;

            let (lower, upper) = explorer.bounds();
            let estimate = explorer
                .engine()
                .cached()
                .map_or(f64::NAN, IntegrationResult::estimate);
            info!("{stem}: [{lower:.6}, {upper:.6}] -> {estimate:.6}");
        }
    }

    info!("wrote {} frames to {}", Function::ALL.len() * QuadratureRule::ALL.len(), out_dir.display());
    Ok(())
}
