mod app;
mod config;
mod input;
mod term;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
