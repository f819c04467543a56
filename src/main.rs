use std::fmt::Display;
use std::hash::Hash;
use std::io::{BufRead, BufWriter, Read, Write};
use std::*;

use huffman_code::Codec;
use log::info;

#[derive(Debug)]
enum Error {
    /// just relaying io::Error
    Io(io::Error),

    /// there is no text to encode
    NoInput,

    /// the code could not be built or used
    Codec(huffman_code::Error),

    /// decoding did not give back the input, this would never happen
    Mismatch,
}

/// read the text to encode: one prompted line from a terminal,
/// everything from a pipe, without the final line break
fn read_input() -> Result<String, Error> {
    let mut input = String::new();
    if atty::is(atty::Stream::Stdin) {
        eprint!("Enter text to encode: ");
        io::stderr().flush().map_err(Error::Io)?;
        io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(Error::Io)?;
    } else {
        io::stdin()
            .lock()
            .read_to_string(&mut input)
            .map_err(Error::Io)?;
    }
    let line_end = input.trim_end_matches(&['\r', '\n'][..]).len();
    input.truncate(line_end);
    if input.is_empty() {
        return Err(Error::NoInput);
    }
    Ok(input)
}

/// build the code for `symbols` and print what `mode` asks for
fn run<Symbol, I, W>(
    mode: Mode,
    symbols: I,
    render: impl Fn(Vec<Symbol>) -> String,
    out: &mut W,
) -> Result<(), Error>
where
    Symbol: Ord + Hash + Clone + Display,
    I: Iterator<Item = Symbol> + Clone,
    W: Write,
{
    macro_rules! println {
        ($($arg:tt)*) => ({
            $crate::writeln!(out, $($arg)*).map_err(Error::Io)?;
        })
    }

    let codec = Codec::from_sequence(symbols.clone()).map_err(Error::Codec)?;
    info!(
        "{} distinct symbols, longest codeword {} bits",
        codec.tree().len(),
        codec.tree().depth().max(1)
    );
    match mode {
        Mode::Codes => {
            println!("{}", codec.code_table().format_codebook());
        }
        Mode::Encode => {
            let encoded = codec.encode(symbols).map_err(Error::Codec)?;
            println!("{}", codec.code_table().format_codebook());
            println!();
            println!("{}", encoded);
        }
        Mode::Roundtrip => {
            let encoded = codec.encode(symbols.clone()).map_err(Error::Codec)?;
            println!("Huffman Codes:");
            println!("{}", codec.code_table().format_codebook());
            println!();
            println!("Encoded Text: {}", encoded);

            let decoded = codec.decode(&encoded).map_err(Error::Codec)?;
            if !decoded.iter().eq(symbols.collect::<Vec<Symbol>>().iter()) {
                return Err(Error::Mismatch);
            }
            println!();
            println!("Decoded Text: {}", render(decoded));
        }
    }
    Ok(())
}

// options
use clap::{ArgEnum, Parser, Subcommand};

/// represent all acceptable arguments
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// what counts as one symbol of the input
    #[clap(long, arg_enum, default_value = "chars")]
    unit: Unit,

    /// raise log verbosity, repeat for more
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,

    #[clap(subcommand)]
    mode: Option<Mode>,
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum Unit {
    /// each character is a symbol
    Chars,

    /// each byte is a symbol
    Bytes,

    /// each whitespace separated word is a symbol
    Words,
}

#[derive(Subcommand, Clone, Copy, Debug)]
enum Mode {
    /// prints the codebook, the encoded text and the decoded text
    Roundtrip,

    /// prints the codebook, an empty line and the encoded text
    Encode,

    /// prints the codebook only
    Codes,
}

fn main() -> Result<(), Error> {
    // get arguments
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let input = read_input()?;
    info!("read {} bytes of input", input.len());

    // prepare stdout with buffering
    let stdout = io::stdout();
    let mut stdout = BufWriter::new(stdout.lock());

    let mode = args.mode.unwrap_or(Mode::Roundtrip);
    match args.unit {
        Unit::Chars => run(
            mode,
            input.chars(),
            |decoded| decoded.into_iter().collect::<String>(),
            &mut stdout,
        ),
        Unit::Bytes => run(
            mode,
            input.bytes(),
            |decoded| String::from_utf8_lossy(&decoded).into_owned(),
            &mut stdout,
        ),
        Unit::Words => run(
            mode,
            input.split_whitespace(),
            |decoded| decoded.join(" "),
            &mut stdout,
        ),
    }?;
    stdout.flush().map_err(Error::Io)
}
