//! Waveplot - render a two-tone sine signal and its spectrum to PNG.

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use waveplot::cli::Args;
use waveplot::pipeline::Pipeline;
use waveplot::rendering::ImageCanvas;

fn main() -> anyhow::Result<()> {
    // Fixed level: diagnostics go to stderr, stdout keeps the plot report
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let config = Args::parse().to_config();
    log::debug!("Config: {:?}", config);

    let pipeline = Pipeline::new(config).context("Invalid configuration")?;
    let render = &pipeline.config().render;

    println!("Creating {} by {} image.", render.width, render.height);
    let mut canvas = ImageCanvas::new(render.width, render.height, &render.palette);

    {
        let mut stdout = io::stdout().lock();
        pipeline
            .run(&mut canvas, &mut stdout)
            .context("Failed to render plot")?;
        stdout.flush().context("Failed to write spectrum rows")?;
    }

    println!("Creating output file '{}'.", render.output_path.display());
    canvas
        .save(&render.output_path)
        .with_context(|| format!("Failed to write '{}'", render.output_path.display()))?;
    log::info!("Wrote {}", render.output_path.display());

    Ok(())
}
