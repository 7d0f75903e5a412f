use clap::{App, Arg, SubCommand};

mod command_demo;
mod command_encrypt;
mod command_keygen;

fn main() {
    let matches = App::new("SecureVote CLI")
        .version("0.1.0")
        .about("Confidential field-survey collection demo driver")
        .subcommand(
            SubCommand::with_name("keygen")
                .about("Generate a keypair and print both halves as decimal strings")
                .arg(
                    Arg::with_name("bits")
                        .long("bits")
                        .takes_value(true)
                        .help("Modulus bit length (default 256)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("encrypt")
                .about("Encrypt a binary vote under a public key, client-side")
                .arg(
                    Arg::with_name("modulus")
                        .long("modulus")
                        .takes_value(true)
                        .required(true)
                        .help("Public key modulus n as a decimal string"),
                )
                .arg(
                    Arg::with_name("PLAINTEXT")
                        .index(1)
                        .required(true)
                        .help("Vote value: 0 or 1"),
                ),
        )
        .subcommand(
            SubCommand::with_name("demo")
                .about("Seed a question and three votes, aggregate, verify the audit chain")
                .arg(
                    Arg::with_name("bits")
                        .long("bits")
                        .takes_value(true)
                        .help("Modulus bit length (default 256)"),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("keygen") {
        command_keygen::command_keygen(matches);
    }
    if let Some(matches) = matches.subcommand_matches("encrypt") {
        command_encrypt::command_encrypt(matches);
    }
    if let Some(matches) = matches.subcommand_matches("demo") {
        command_demo::command_demo(matches);
    }
}

fn parse_bits(matches: &clap::ArgMatches) -> u64 {
    match matches.value_of("bits").unwrap_or("256").parse() {
        Ok(bits) => bits,
        Err(_) => {
            eprintln!("securevote: --bits must be an integer");
            std::process::exit(1);
        }
    }
}
