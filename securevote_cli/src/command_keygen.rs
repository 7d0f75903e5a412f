use securevote::generate_keypair;

pub fn command_keygen(matches: &clap::ArgMatches) {
    let bits = crate::parse_bits(matches);

    let (public, private) = generate_keypair(bits).unwrap_or_else(|e| {
        eprintln!("securevote keygen: {}", e);
        std::process::exit(1);
    });

    let key_id = format!("key-{}", uuid::Uuid::new_v4());

    println!("key-id: {}", key_id);
    println!("n: {}", public.n.to_str_radix(10));
    println!("g: {}", public.g.to_str_radix(10));
    println!("lambda: {}", private.lambda.to_str_radix(10));
    println!("mu: {}", private.mu.to_str_radix(10));
}
