use {
    anyhow::Result,
    clap::{Args, Parser},
    log::error,
};

#[derive(Parser)]
#[command(name = "mkrls", about = "Bump, tag and publish a py.* or js.* package")]
struct Mkrls {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    release: mkrls::commands::release::CommandArgs,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    #[arg(long, global = true)]
    pub verbose: bool,
}

fn main() {
    if let Err(err) = try_main() {
        error!("Error: {err}");
        for (i, cause) in err.chain().skip(1).enumerate() {
            error!("  {}: {}", i.saturating_add(1), cause);
        }
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let mkrls = Mkrls::parse();

    let level = if mkrls.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    mkrls::commands::release::run(mkrls.release)
}
