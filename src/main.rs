use anyhow::Context;
use spotavail::app::cli::CliArgs;
use spotavail::ui::ansi::Painter;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let args = CliArgs::from_env()?;
    let mut stdout = std::io::stdout().lock();
    let code = spotavail::app::run(&args, &mut stdout, Painter::for_stdout())
        .with_context(|| {
            format!(
                "could not start with config {}",
                args.paths.config_path.display()
            )
        })?;
    Ok(code)
}
