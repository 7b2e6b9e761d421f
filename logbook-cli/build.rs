use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs, reduced to what completions need.
// Build scripts can't access src/ modules, so keep the two in step by hand.
fn build_cli() -> Command {
    let path = |name: &'static str| {
        Arg::new(name)
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };
    let output = Arg::new("output")
        .long("output")
        .short('o')
        .value_hint(ValueHint::FilePath);
    let mime = Arg::new("mime").long("mime").value_name("TYPE");
    let slug = Arg::new("slug").required(true).index(1);

    Command::new("logbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render, convert and manage Logbook articles")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .arg(path("input"))
                .arg(
                    Arg::new("variant")
                        .long("variant")
                        .value_parser(["standard", "display"]),
                )
                .arg(
                    Arg::new("standalone")
                        .long("standalone")
                        .action(ArgAction::SetTrue),
                )
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("convert")
                .arg(path("input"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_parser(["markdown", "html", "json"]),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_parser(["markdown", "html", "tree", "json"]),
                )
                .arg(output),
        )
        .subcommand(Command::new("font-split").arg(Arg::new("text").required(true).index(1)))
        .subcommand(
            Command::new("check-image")
                .arg(path("path"))
                .arg(mime.clone()),
        )
        .subcommand(
            Command::new("upload")
                .arg(path("path"))
                .arg(
                    Arg::new("endpoint")
                        .long("endpoint")
                        .value_hint(ValueHint::Url),
                )
                .arg(Arg::new("type").long("type"))
                .arg(Arg::new("alt").long("alt"))
                .arg(mime),
        )
        .subcommand(
            Command::new("article")
                .arg(
                    Arg::new("store")
                        .long("store")
                        .value_hint(ValueHint::DirPath)
                        .global(true),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("show").arg(slug.clone()))
                .subcommand(Command::new("save").arg(path("json")))
                .subcommand(Command::new("delete").arg(slug)),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "logbook", &outdir)?;
    generate_to(Zsh, &mut cmd, "logbook", &outdir)?;
    generate_to(Fish, &mut cmd, "logbook", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
