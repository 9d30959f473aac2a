use anyhow::Result;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod cmd_demo;
mod cmd_stress;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug ./userlist demo
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Demo { json } => cmd_demo::exec(json),

        cli::Cmd::Stress {
            threads,
            ops,
            keys,
            seed,
            max_records,
            atomic_upsert,
            exact,
            json,
            progress,
        } => cmd_stress::exec(cmd_stress::StressArgs {
            threads,
            ops,
            keys,
            seed,
            max_records,
            atomic_upsert,
            exact,
            json,
            progress,
        }),
    }
}
