use num_bigint::BigUint;
use num_traits::One;
use securevote::{encrypt, PublicKey};
use std::str::FromStr;

pub fn command_encrypt(matches: &clap::ArgMatches) {
    let modulus = matches.value_of("modulus").unwrap();
    let n = match BigUint::from_str(modulus) {
        Ok(n) => n,
        Err(_) => {
            eprintln!("securevote encrypt: modulus must be a decimal integer");
            std::process::exit(1);
        }
    };

    // Votes are binary at the application level
    let plaintext: u32 = match matches.value_of("PLAINTEXT").unwrap() {
        "0" => 0,
        "1" => 1,
        _ => {
            eprintln!("securevote encrypt: vote must be 0 or 1");
            std::process::exit(1);
        }
    };

    let public = PublicKey {
        g: &n + BigUint::one(),
        n,
    };

    match encrypt(&public, &BigUint::from(plaintext)) {
        Ok(ciphertext) => println!("{}", ciphertext),
        Err(e) => {
            eprintln!("securevote encrypt: {}", e);
            std::process::exit(1);
        }
    }
}
