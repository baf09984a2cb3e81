use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = road_fs::cli::parse();
    app::run(args)
}
