use anyhow::Context;
use sht3x_device::logger::export::{export, DEFAULT_MAX_ROWS};
use sht3x_device::logger::table::Table;
use std::path::PathBuf;
use std::process;

const USAGE: &str = "\
USAGE: sht3x-export -f <PATH> -t <TABLE> [--dir <DIR>] [--maxsamples <N>]

OPTIONS:
    -f <PATH>           output file, replaced if it exists
    -t <TABLE>          table to read
    --dir <DIR>         directory holding the tables (default: .)
    --maxsamples <N>    number of most recent rows to export (default: 1000)
    -h, --help          print this help";

struct Args {
    out: PathBuf,
    table: String,
    dir: PathBuf,
    max_rows: usize,
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut out = None;
    let mut table = None;
    let mut dir = PathBuf::from(".");
    let mut max_rows = DEFAULT_MAX_ROWS;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {}", arg))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-f" => out = Some(PathBuf::from(value()?)),
            "-t" => table = Some(value()?),
            "--dir" => dir = PathBuf::from(value()?),
            "--maxsamples" => {
                let v = value()?;
                max_rows = v
                    .parse()
                    .map_err(|_| format!("invalid number {:?} for --maxsamples", v))?;
            }
            other => return Err(format!("unexpected argument {:?}", other)),
        }
    }

    match (out, table) {
        (Some(out), Some(table)) => Ok(Some(Args {
            out,
            table,
            dir,
            max_rows,
        })),
        _ => Err("-f and -t are required".into()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let table = Table::open(&args.dir, &args.table)
        .with_context(|| format!("opening table {}", args.table))?;
    export(&table, args.max_rows, &args.out)
        .with_context(|| format!("exporting to {}", args.out.display()))?;
    Ok(())
}
