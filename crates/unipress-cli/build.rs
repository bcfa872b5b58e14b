use std::env;
use std::fs;
use std::path::Path;

use clap::CommandFactory;

// cli.rs is compiled here a second time, standalone. It stays limited to
// clap + clap_complete (both build-dependencies) so this works.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set for build scripts");
    let man_dir = Path::new(&out_dir).join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man page directory");

    emit_man_pages(&cli::Cli::command(), &man_dir);
}

/// Render `<name>.1` for the command, then recurse into every visible
/// subcommand as `<name>-<sub>.1`.
fn emit_man_pages(cmd: &clap::Command, dir: &Path) {
    let name = cmd.get_name().to_owned();

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut page)
        .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));

    let target = dir.join(format!("{name}.1"));
    fs::write(&target, page).unwrap_or_else(|e| panic!("failed to write {}: {e}", target.display()));

    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let qualified = sub.clone().name(format!("{name}-{}", sub.get_name()));
        emit_man_pages(&qualified, dir);
    }
}
