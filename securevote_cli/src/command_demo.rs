use num_bigint::BigUint;
use securevote::*;

/// Seed a question and three encrypted votes into an in-memory store,
/// aggregate them homomorphically, then verify the audit chain.
pub fn command_demo(matches: &clap::ArgMatches) {
    let bits = crate::parse_bits(matches);

    println!("generating a {}-bit keypair...", bits);
    let (public, private) = generate_keypair(bits).unwrap_or_else(|e| {
        eprintln!("securevote demo: {}", e);
        std::process::exit(1);
    });

    let key_id = format!("key-{}", uuid::Uuid::new_v4());
    let mut keyring = Keyring::new();
    keyring.insert(key_id.as_str(), public.clone(), private);

    let store = MemStore::default();
    store.insert_question("q-demo", "Is the water source functional?", "demo");

    for (participant, value) in [("alice", 1u32), ("bob", 1), ("carol", 0)].iter() {
        let ciphertext = encrypt(&public, &BigUint::from(*value)).unwrap_or_else(|e| {
            eprintln!("securevote demo: {}", e);
            std::process::exit(1);
        });

        let receipt = submit_vote(
            &store,
            &VoteRequest {
                question_id: "q-demo".to_string(),
                participant_id: participant.to_string(),
                agent_id: "agent-1".to_string(),
                ciphertext: ciphertext.to_string(),
                key_id: key_id.clone(),
            },
        )
        .unwrap_or_else(|e| {
            eprintln!("securevote demo: {}", e);
            std::process::exit(1);
        });

        println!(
            "stored vote {} (participant fingerprint {})",
            receipt.vote_id,
            &receipt.participant_fingerprint[..16]
        );
    }

    let result = aggregate(&store, &keyring, "q-demo", &key_id).unwrap_or_else(|e| {
        eprintln!("securevote demo: {}", e);
        std::process::exit(1);
    });
    println!(
        "aggregate: {}",
        serde_json::to_string_pretty(&result).expect("securevote demo: unable to render result")
    );

    let verification = verify_chain(&store.audit_entries());
    println!(
        "audit chain: ok={} length={}",
        verification.ok, verification.length
    );
    if let Err(e) = verification.into_result() {
        eprintln!("securevote demo: {}", e);
        std::process::exit(1);
    }

    let stats = store.stats();
    println!(
        "store: {} votes, {} participants, {} audit entries",
        stats.total_votes, stats.unique_participants, stats.total_audit_entries
    );
}
