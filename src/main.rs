//! Command-line interface for hftf compression

use std::env;
use std::process;

use hftf::{compress_file, decompress_file};

const USAGE: &str = "usage: hftf <command> [args]

commands:
  compress <input-path> [output-name]    compress a file into <output-name>.hftf (default: out)
  decompress <input.hftf> [output-path]  recover the original bytes (default: out.txt)";

fn main() {
    let args: Vec<String> = env::args().collect();
    process::exit(run(&args));
}

fn run(args: &[String]) -> i32 {
    let Some(command) = args.get(1) else {
        eprintln!("hftf: missing command");
        eprintln!("{USAGE}");
        return 2;
    };

    match command.as_str() {
        "compress" => {
            let Some(input) = args.get(2) else {
                eprintln!("hftf: compress requires an input path");
                eprintln!("{USAGE}");
                return 2;
            };
            let output = args.get(3).map(String::as_str).unwrap_or("out");
            match compress_file(input, output) {
                Ok(stats) => {
                    if stats.input_len == 0 {
                        println!(
                            "compressed empty {} into {}.hftf ({} bytes)",
                            input, output, stats.output_len
                        );
                    } else {
                        println!(
                            "compressed {} bytes into {}.hftf ({} bytes, {} symbols, ratio {:.2})",
                            stats.input_len,
                            output,
                            stats.output_len,
                            stats.unique_symbols,
                            stats.ratio()
                        );
                    }
                    0
                }
                Err(err) => {
                    eprintln!("hftf: {err}");
                    1
                }
            }
        }
        "decompress" => {
            let Some(input) = args.get(2) else {
                eprintln!("hftf: decompress requires an input path");
                eprintln!("{USAGE}");
                return 2;
            };
            let output = args.get(3).map(String::as_str).unwrap_or("out.txt");
            match decompress_file(input, output) {
                Ok(stats) => {
                    println!(
                        "recovered {} bytes from {} into {}",
                        stats.output_len, input, output
                    );
                    0
                }
                Err(err) => {
                    eprintln!("hftf: {err}");
                    1
                }
            }
        }
        other => {
            eprintln!("hftf: unknown command '{other}'");
            eprintln!("{USAGE}");
            2
        }
    }
}
