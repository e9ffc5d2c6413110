#![deny(unused_must_use)]

use std::{env, fs, path::PathBuf};

use xshell::cmd;

fn main() -> Result<(), anyhow::Error> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(|s| &**s).collect::<Vec<_>>();

    match &args[..] {
        ["ci"] => test_ci(),
        ["update"] => update(),
        _ => {
            println!("USAGE cargo xtask [ci|update]");
            Ok(())
        }
    }
}

fn update() -> Result<(), anyhow::Error> {
    let _p = xshell::pushd(root_dir())?;
    cmd!("cargo update").run()?;
    Ok(())
}

fn test_ci() -> Result<(), anyhow::Error> {
    let _e = xshell::pushenv("CI", "true");
    test_device()?;
    for member in members()? {
        if member != "device" && member != "xtask" {
            build_member(&member)?;
        }
    }
    Ok(())
}

fn test_device() -> Result<(), anyhow::Error> {
    let mut device = root_dir();
    device.push("device");

    let _p = xshell::pushd(&device)?;

    cmd!("cargo test").run()?;
    cmd!("cargo build --no-default-features").run()?;
    cmd!("cargo build --no-default-features --features log").run()?;
    Ok(())
}

fn build_member(member: &str) -> Result<(), anyhow::Error> {
    let mut dir = root_dir();
    dir.push(member);
    println!("Building {}", member);
    let _p = xshell::pushd(&dir)?;
    cmd!("cargo test").run()?;
    cmd!("cargo build --release").run()?;
    Ok(())
}

/// Workspace members as listed in the root manifest.
fn members() -> Result<Vec<String>, anyhow::Error> {
    let mut manifest = root_dir();
    manifest.push("Cargo.toml");
    let manifest: toml::Value = toml::from_str(&fs::read_to_string(manifest)?)?;
    let members = manifest
        .get("workspace")
        .and_then(|w| w.get("members"))
        .and_then(|m| m.as_array())
        .ok_or_else(|| anyhow::anyhow!("no workspace members in Cargo.toml"))?;
    Ok(members
        .iter()
        .filter_map(|m| m.as_str().map(String::from))
        .collect())
}

fn root_dir() -> PathBuf {
    let mut xtask_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    xtask_dir.pop();
    xtask_dir
}
