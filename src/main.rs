use anyhow::Result;
use clap::Parser;

use git_semver::{ui, VersionCalculator};

#[derive(clap::Parser)]
#[command(
    name = "git-semver",
    about = "Compute a deterministic version string from repository state"
)]
struct Args {
    #[arg(default_value = ".", help = "Path inside the repository to version")]
    path: String,

    #[arg(long, help = "Print every computed field")]
    all: bool,

    #[arg(long, help = "Print the SemVer 1.0 compatible rendering")]
    semver1: bool,

    #[arg(long, help = "Print the SemVer 2.0 compatible rendering")]
    semver2: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("git-semver {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let calculator = VersionCalculator::new();

    let result = match calculator.get_result(&args.path) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if args.all {
        ui::display_result(&result);
    } else if args.semver1 {
        println!("{}", result.semver1);
    } else if args.semver2 {
        println!("{}", result.semver2);
    } else {
        println!("{}", result.version);
    }

    Ok(())
}
