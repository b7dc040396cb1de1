mod analyser;
mod app;
mod config;
mod engine;
mod error;
mod library;
mod media;
mod mpris;
mod runtime;
mod ui;
mod visualizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
