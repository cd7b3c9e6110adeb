use clap::Parser;
use passvault::cli::commands::edit::EditArgs;
use passvault::cli::{commands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::List { trash } => commands::list::execute(&cli, trash),
        Commands::Add {
            ref service,
            ref login,
            ref group,
            generate,
            ref generator,
        } => commands::add::execute(
            &cli,
            service,
            login,
            group.as_deref(),
            generate,
            generator,
        ),
        Commands::Show { ref id, reveal } => commands::show::execute(&cli, id, reveal),
        Commands::Copy { ref id } => commands::copy::execute(&cli, id),
        Commands::Edit {
            ref id,
            ref service,
            ref login,
            ref group,
            password,
            generate,
            ref generator,
        } => commands::edit::execute(
            &cli,
            id,
            &EditArgs {
                service: service.as_deref(),
                login: login.as_deref(),
                group: group.as_deref(),
                password,
                generate,
                generator,
            },
        ),
        Commands::Delete { ref id } => commands::delete::execute(&cli, id),
        Commands::Restore { ref id } => commands::restore::execute(&cli, id),
        Commands::Purge { force } => commands::purge::execute(&cli, force),
        Commands::Generate { ref generator } => commands::generate::execute(generator),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
