use std::io::Read;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let source = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            buffer
        }
    };

    match aster::parse_source(&source) {
        Ok(forms) => {
            for form in forms {
                println!("{form}");
            }
            Ok(())
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
