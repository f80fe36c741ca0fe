use beatleap::args::{help_text, CliArgs};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = CliArgs::parse()?;
    if args.show_help {
        println!("{}", help_text());
        return Ok(());
    }
    beatleap::run(args)?;
    Ok(())
}
