//! File-to-file conversion driver: read a camt.053.001.04 document, upgrade
//! it, write the 001.08 result.

use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let (input, output) = match (args.get(1), args.get(2)) {
        (Some(input), Some(output)) => (input.clone(), output.clone()),
        _ => {
            eprintln!("usage: camt-upgrade <input.xml> <output.xml>");
            return ExitCode::FAILURE;
        }
    };

    let xml = match std::fs::read_to_string(&input) {
        Ok(xml) => xml,
        Err(e) => {
            eprintln!("cannot read {input}: {e}");
            return ExitCode::FAILURE;
        }
    };

    match camt_upgrade::convert_xml(&xml) {
        Ok(converted) => {
            if let Err(e) = std::fs::write(&output, converted) {
                eprintln!("cannot write {output}: {e}");
                return ExitCode::FAILURE;
            }
            println!("conversion finished: {output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("conversion failed: {e}");
            ExitCode::FAILURE
        }
    }
}
