use console::style;

use crate::context::VersionResult;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print every computed field, one per line
pub fn display_result(result: &VersionResult) {
    println!("{}", style("Version calculation").bold());
    println!("  Repository: {}", result.repository_path.display());
    println!("  Branch:     {}", result.branch_name);
    println!("  Sha:        {}", result.sha);
    println!("  Height:     {}", result.height);
    if let Some(build_number) = &result.build_number {
        println!("  Build:      {}", build_number);
    }
    println!("  Version:    {}", style(&result.version).green());
    println!("  SemVer 1.0: {}", result.semver1);
    println!("  SemVer 2.0: {}", result.semver2);
}
