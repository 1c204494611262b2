//! This is a basic example with help page, usage and error printing.
use argument_getopt::{Error, Kind, Opt, Scanner};

const USAGE: &str = "basic [-n NUMBER]... [-s|--shout] [--pad[=CHAR]] [--help] [--] [WORD]...";
const HELP: &str = "basic
A small example of argument-getopt

USAGE:
    !!USAGE!!

OPTIONS:
    -n, --number <NUMBER>   adds a number to sum
    -s, --shout             shouts!
    --pad[=CHAR]            pads the words (defaults to a space)
    --help                  prints the help\
";

fn execute() -> Result<(), Error> {
    let table = [
        Opt::new("number", 'n', Kind::Required),
        Opt::new("shout", 's', Kind::None),
        Opt::long("pad", Kind::Optional),
        Opt::long("help", Kind::None),
    ];
    let args: Vec<String> = std::env::args().collect();
    let mut scanner = Scanner::new();
    let mut numbers = Vec::<i64>::new();
    let mut shout = false;
    let mut pad = None;

    while let Some(m) = scanner.next(&table, &args)? {
        if m.is_either('n', "number") {
            match m.optarg().parse() {
                Ok(num) => numbers.push(num),
                Err(err) => {
                    eprintln!("error: invalid number {:?}: {}", m.optarg(), err);
                    std::process::exit(1);
                }
            }
        } else if m.is_either('s', "shout") {
            shout = true;
        } else if m.is_long("pad") {
            pad = Some(m.optarg().chars().next().unwrap_or(' '));
        } else if m.is_long("help") {
            println!("{}", HELP.replace("!!USAGE!!", USAGE));
            return Ok(());
        }
    }

    let words = scanner.remaining(&args);
    if numbers.is_empty() && words.is_empty() {
        println!("{}", USAGE);
        return Ok(());
    }

    if !numbers.is_empty() {
        println!("Numbers: {:?}", &numbers);
        println!("Sum: {}", numbers.into_iter().sum::<i64>());
    }
    for word in words {
        let word = if shout {
            word.to_uppercase()
        } else {
            word.clone()
        };
        match pad {
            Some(c) => println!("{c}{word}{c}"),
            None => println!("{word}"),
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = execute() {
        eprintln!("error: {}", err);
        eprintln!("usage: {}", USAGE);
        std::process::exit(1);
    }
}
