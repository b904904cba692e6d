use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = sort_fat_folder::cli::parse();
    let code = app::run(args)?;
    std::process::exit(code);
}
